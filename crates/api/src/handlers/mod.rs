//! Request handlers for the portal API.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the repositories in `keepsake_db` (and the flows in
//! `keepsake_host`) and map errors via [`crate::error::AppError`].

pub mod auth;
pub mod folders;
pub mod host_setup;
pub mod notifications;
pub mod payments;
pub mod sync;
pub mod uploads;
pub mod videos;
