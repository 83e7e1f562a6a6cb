//! Authoritative in-memory project collection.
//!
//! # Responsibility
//! - Define the closed set of collection mutations (`ProjectAction`).
//! - Own the collection and serialize every mutation through `reduce`.
//!
//! # Invariants
//! - `ProjectStore` is the only mutator of the collection.
//! - Snapshots handed out before a mutation never observe it.

pub mod action;
pub mod project_store;
