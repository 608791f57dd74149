//! Login session and capability model.
//!
//! # Responsibility
//! - Define the role of the signed-in user and the session record.
//! - Derive capabilities from the role exactly once, so views consume an
//!   explicit permission value instead of re-reading role strings.
//!
//! # Invariants
//! - Role strings persisted to storage are lowercase (`admin` / `client`).
//! - Capability grants depend only on the role.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Account role of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Back-office operator with full portal management rights.
    Admin,
    /// Regular client account scoped to its own space.
    Client,
}

/// Stable string id persisted for the role.
pub const ROLE_ADMIN: &str = "admin";
/// Stable string id persisted for the role.
pub const ROLE_CLIENT: &str = "client";

impl Role {
    /// Storage string for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Client => ROLE_CLIENT,
        }
    }

    /// Parses a persisted role string.
    pub fn parse(value: &str) -> Result<Self, RoleParseError> {
        match value.trim() {
            "" => Err(RoleParseError::Empty),
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_CLIENT => Ok(Self::Client),
            other => Err(RoleParseError::Unsupported(other.to_string())),
        }
    }

    /// Capabilities granted to this role.
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Admin => &[
                Capability::ManagePersonalDocuments,
                Capability::ManageSharedDocuments,
                Capability::ManageDirectory,
                Capability::ViewClientList,
            ],
            Self::Client => &[Capability::ManagePersonalDocuments],
        }
    }

    /// Returns whether this role grants one capability.
    pub fn grants(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

/// Role parse errors for persisted session blobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleParseError {
    Empty,
    Unsupported(String),
}

impl Display for RoleParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "role value must not be empty"),
            Self::Unsupported(value) => write!(f, "role is unsupported: {value}"),
        }
    }
}

impl Error for RoleParseError {}

/// One portal permission, granted per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Create folders and import documents in the personal space.
    ManagePersonalDocuments,
    /// Create folders and import documents in the shared Pyramide space.
    ManageSharedDocuments,
    /// Add, edit, and delete directory entries.
    ManageDirectory,
    /// See the full client list instead of a single profile.
    ViewClientList,
}

impl Capability {
    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::ManagePersonalDocuments => "Manage folders and documents in the personal space.",
            Self::ManageSharedDocuments => "Manage folders and documents in the shared space.",
            Self::ManageDirectory => "Manage contact and client directory entries.",
            Self::ViewClientList => "Browse every client record in the portal.",
        }
    }
}

/// Active login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Role granted at login.
    pub role: Role,
    /// Directory id of the signed-in client, when the role is scoped to one.
    pub client_id: Option<String>,
}

impl Session {
    /// Returns whether the session grants one capability.
    pub fn allows(&self, capability: Capability) -> bool {
        self.role.grants(capability)
    }
}

#[cfg(test)]
mod tests {
    use super::{Capability, Role, RoleParseError, Session};

    #[test]
    fn parses_persisted_role_strings() {
        assert_eq!(Role::parse("admin"), Ok(Role::Admin));
        assert_eq!(Role::parse(" client "), Ok(Role::Client));
        assert_eq!(Role::parse(""), Err(RoleParseError::Empty));
        assert_eq!(
            Role::parse("Admin"),
            Err(RoleParseError::Unsupported("Admin".to_string()))
        );
    }

    #[test]
    fn admin_holds_every_capability() {
        for capability in [
            Capability::ManagePersonalDocuments,
            Capability::ManageSharedDocuments,
            Capability::ManageDirectory,
            Capability::ViewClientList,
        ] {
            assert!(Role::Admin.grants(capability));
        }
    }

    #[test]
    fn client_is_scoped_to_personal_documents() {
        assert!(Role::Client.grants(Capability::ManagePersonalDocuments));
        assert!(!Role::Client.grants(Capability::ManageSharedDocuments));
        assert!(!Role::Client.grants(Capability::ManageDirectory));
        assert!(!Role::Client.grants(Capability::ViewClientList));
    }

    #[test]
    fn session_delegates_to_role() {
        let session = Session {
            role: Role::Client,
            client_id: Some("1".to_string()),
        };
        assert!(session.allows(Capability::ManagePersonalDocuments));
        assert!(!session.allows(Capability::ManageDirectory));
    }
}
