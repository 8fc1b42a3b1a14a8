//! Access decisions for gallery records.
//!
//! Every password comparison in the workspace lives in this module, so the
//! plaintext-equality contract can later be swapped for a hashed one without
//! touching any caller. The functions here are pure: persisting an elevated
//! session after an override match is the caller's job.

use serde::Serialize;

use crate::roles::Role;
use crate::types::DbId;

/// Secrets and defaults the gate evaluates against, injected from
/// configuration at startup.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    override_codes: Vec<String>,
    default_sync_password: String,
}

impl AccessPolicy {
    /// Build a policy from the configured override codes and the password
    /// stamped onto records imported by sync.
    ///
    /// Empty override codes are discarded so a blank configuration entry can
    /// never turn an empty password prompt into an admin grant.
    pub fn new(override_codes: Vec<String>, default_sync_password: String) -> Self {
        AccessPolicy {
            override_codes: override_codes.into_iter().filter(|c| !c.is_empty()).collect(),
            default_sync_password,
        }
    }

    /// True when the supplied secret matches one of the accepted
    /// administrator override codes.
    pub fn is_override(&self, supplied: &str) -> bool {
        self.override_codes.iter().any(|code| code == supplied)
    }

    pub fn default_sync_password(&self) -> &str {
        &self.default_sync_password
    }
}

/// The fields of a video record that admission reads.
#[derive(Debug, Clone, Copy)]
pub struct VideoTarget<'a> {
    /// Stored plaintext password; empty means unprotected.
    pub password: &'a str,
    /// Containing folder, if any. Folder membership implies admission
    /// because the folder password already gated entry.
    pub folder_id: Option<DbId>,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub granted: bool,
    pub role: Role,
}

impl AccessDecision {
    fn granted(role: Role) -> Self {
        AccessDecision {
            granted: true,
            role,
        }
    }

    fn denied() -> Self {
        AccessDecision {
            granted: false,
            role: Role::Guest,
        }
    }
}

/// Decide whether a requester may play a video.
///
/// Rules in order, first match wins:
/// 1. an already-elevated session, or a supplied override code, grants
///    with [`Role::Admin`] regardless of the stored password;
/// 2. a video living inside a folder is granted to guests outright;
/// 3. an empty stored password is granted to guests outright;
/// 4. otherwise the supplied secret must equal the stored password.
pub fn evaluate_video(
    target: VideoTarget<'_>,
    supplied: &str,
    session_role: Role,
    policy: &AccessPolicy,
) -> AccessDecision {
    if session_role.is_admin() || policy.is_override(supplied) {
        return AccessDecision::granted(Role::Admin);
    }
    if target.folder_id.is_some() {
        return AccessDecision::granted(Role::Guest);
    }
    if target.password.is_empty() {
        return AccessDecision::granted(Role::Guest);
    }
    if supplied == target.password {
        return AccessDecision::granted(Role::Guest);
    }
    AccessDecision::denied()
}

/// Decide whether a requester may enter a folder.
///
/// Folders carry a mandatory password, so only the override shortcut and
/// plain equality apply.
pub fn evaluate_folder(
    stored_password: &str,
    supplied: &str,
    session_role: Role,
    policy: &AccessPolicy,
) -> AccessDecision {
    if session_role.is_admin() || policy.is_override(supplied) {
        return AccessDecision::granted(Role::Admin);
    }
    if supplied == stored_password {
        return AccessDecision::granted(Role::Guest);
    }
    AccessDecision::denied()
}
