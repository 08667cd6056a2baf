//! Authoritative in-memory contact state.
//!
//! # Responsibility
//! - Own the contact list and its synchronization to the key-value slot.
//! - Keep UI layers decoupled from storage and serialization details.

pub mod contact_store;
