//! Shared domain types for the showroom workspace.
//!
//! Holds the wire representation of a catalog product, its display rules
//! (price grouping, condition fallback) and the upload naming convention.
//! Nothing in this crate performs I/O.

pub mod catalog;
pub mod error;
pub mod naming;
pub mod types;
