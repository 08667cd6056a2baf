//! Contact search projections.
//!
//! # Responsibility
//! - Answer read-only queries over the in-memory contact list.
//!
//! # Invariants
//! - Projections never mutate or reorder the source list.

pub mod name;
