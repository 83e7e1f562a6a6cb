//! Real-time project search.
//!
//! # Responsibility
//! - Project the store collection down to entries matching a search term.
//! - Hold the user's current search term between renders.

pub mod filter;
