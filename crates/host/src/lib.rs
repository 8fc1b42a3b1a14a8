//! Video host integration.
//!
//! Wraps the external video platform's OAuth token, listing, and
//! resumable-upload APIs behind [`client::HostClient`], and builds the
//! two flows that orchestrate against it: the sync reconciler
//! ([`sync::run_sync`]) and the publish flow ([`publish`]).
//!
//! Everything this crate creates on the host is unlisted. The host's
//! delete API is never called anywhere in the workspace.

pub mod client;
pub mod config;
pub mod error;
pub mod publish;
pub mod sync;
pub mod token;

pub use client::{HostClient, RemoteVideo, VideoSource};
pub use config::HostConfig;
pub use error::{FlowError, HostError};
