//! Domain model for the contact book.
//!
//! # Responsibility
//! - Define the contact record shared by store, snapshot and FFI layers.
//!
//! # Invariants
//! - Contacts have no identity beyond their position in the list.

pub mod contact;
