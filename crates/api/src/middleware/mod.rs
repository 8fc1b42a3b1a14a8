//! Session extraction and authorization extractors.
//!
//! - [`session::Session`] -- Resolves the request's role from the session
//!   cookie or a Bearer token; never rejects (absent or invalid tokens
//!   resolve to the guest role).
//! - [`session::RequireAdmin`] -- Requires a valid admin session.

pub mod session;
