//! Requester roles.
//!
//! Every admin-gated operation takes the role as an explicit argument;
//! there is no ambient "current user" state below the HTTP layer.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The role a requester acts under for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    /// Fail with [`CoreError::Forbidden`] unless the role is [`Role::Admin`].
    pub fn require_admin(self) -> Result<(), CoreError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(CoreError::Forbidden("administrator role required".into()))
        }
    }

    /// Stable lowercase name, e.g. for token claims.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Role::Guest),
            "admin" => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!("unknown role '{other}'"))),
        }
    }
}
