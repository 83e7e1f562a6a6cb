//! Domain model for the project showcase.
//!
//! # Responsibility
//! - Define the canonical `Project` record and its factory.
//! - Define field-level validation of raw input.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Deletion is a hard removal from the store collection.

pub mod project;
pub mod validation;
