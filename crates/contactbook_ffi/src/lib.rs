//! Flutter-facing bindings for contact book core.

pub mod api;
