//! Profile and identity types.
//!
//! An `Identity` is the raw record issued by the directory service at login.
//! A `Profile` is the application-level user record (name, role, status)
//! resolved from the backing store after identity resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Application role. Admins have full access; employees are restricted to
/// their own transactions and cannot manage users or categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including user and category management.
    Admin,
    /// Restricted access: own transactions only.
    Employee,
}

impl Role {
    /// Returns true for the admin role.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Employee => write!(f, "employee"),
        }
    }
}

/// Account status. Deactivation is a soft transition; rows are never
/// physically removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Account can sign in.
    Active,
    /// Account has been deactivated by an administrator.
    Inactive,
}

impl UserStatus {
    /// Returns true if the account can sign in.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Raw identity record issued by the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier, shared with the profile row.
    pub id: UserId,
    /// Email address the identity was registered with.
    pub email: String,
    /// Display name from sign-up metadata, if any.
    pub name: Option<String>,
}

/// Application-level user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique identifier, shared with the identity.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Application role.
    pub role: Role,
    /// Account status.
    pub status: UserStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Synthesizes a fallback profile for an identity with no persisted
    /// profile row.
    ///
    /// The name comes from sign-up metadata when present, otherwise the local
    /// part of the email. The role defaults to the least-privileged
    /// `Employee`, except the distinguished bootstrap email which is granted
    /// `Admin`.
    #[must_use]
    pub fn fallback_for(identity: &Identity, bootstrap_admin_email: &str, now: DateTime<Utc>) -> Self {
        let name = identity
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| {
                identity
                    .email
                    .split('@')
                    .next()
                    .unwrap_or(identity.email.as_str())
                    .to_string()
            });

        let role = if identity.email.eq_ignore_ascii_case(bootstrap_admin_email) {
            Role::Admin
        } else {
            Role::Employee
        };

        Self {
            id: identity.id,
            name,
            email: identity.email.clone(),
            role,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}
