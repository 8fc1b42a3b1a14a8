//! Domain logic for the keepsake portal.
//!
//! This crate has zero internal dependencies and performs no I/O: shared
//! id/timestamp aliases, requester roles, the access-gate decision
//! functions, and payment signature checks live here so the API layer,
//! the host adapter, and any future CLI tooling can share them.

pub mod access;
pub mod error;
pub mod payment;
pub mod roles;
pub mod types;
