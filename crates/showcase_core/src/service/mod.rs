//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validator, factory, store and interchange into use-case
//!   level APIs (form submission, delete, edit, import/export).
//! - Keep UI layers decoupled from storage details.

pub mod project_service;
