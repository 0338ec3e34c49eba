use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod logging;

// ============================================================================
// Roles
// ============================================================================

/// Access level of a logged-in principal.
///
/// The enumeration is closed: every persisted or transmitted role must parse
/// into one of these variants, and a value that does not parse is treated as
/// "no session" rather than as a fifth role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Admin,
    Manager,
    Client,
    Caretaker,
}

/// Error returned when parsing an unknown role string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Superadmin,
        Role::Admin,
        Role::Manager,
        Role::Client,
        Role::Caretaker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Client => "client",
            Role::Caretaker => "caretaker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Role::Superadmin),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "client" => Ok(Role::Client),
            "caretaker" => Ok(Role::Caretaker),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

// ============================================================================
// Identity
// ============================================================================

/// Opaque reference to a logged-in principal.
///
/// Produced by a login flow and read-only everywhere else. The credential
/// reference points at the directory entry that authenticated this identity;
/// no secret material is carried here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub contact: Option<String>,
    pub credential_ref: String,
}

impl Identity {
    pub fn new(display_name: impl Into<String>, credential_ref: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            display_name: display_name.into(),
            contact: None,
            credential_ref: credential_ref.into(),
        }
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }
}

// ============================================================================
// Session snapshot
// ============================================================================

/// Point-in-time view of the session state, as observed by the route guard.
///
/// Invariant: a session has a role if and only if it has an identity. The
/// snapshot does not enforce this structurally (the holder's setters are
/// independent, matching the trusted-caller contract), so observers use
/// [`SessionSnapshot::authenticated`] which requires both fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub role: Option<Role>,
    pub is_loading: bool,
}

impl SessionSnapshot {
    /// Initial state at process start: nothing known yet, restore in flight.
    pub fn loading() -> Self {
        Self {
            identity: None,
            role: None,
            is_loading: true,
        }
    }

    /// Settled state with no principal.
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            role: None,
            is_loading: false,
        }
    }

    /// Both identity and role present, or neither usable.
    pub fn authenticated(&self) -> Option<(&Identity, Role)> {
        match (&self.identity, self.role) {
            (Some(identity), Some(role)) => Some((identity, role)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_fails_to_parse() {
        let err = "owner".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("owner".to_string()));
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Superadmin).unwrap();
        assert_eq!(json, "\"superadmin\"");
        let back: Role = serde_json::from_str("\"caretaker\"").unwrap();
        assert_eq!(back, Role::Caretaker);
    }

    #[test]
    fn snapshot_requires_both_fields_for_authentication() {
        let mut snapshot = SessionSnapshot::anonymous();
        assert!(snapshot.authenticated().is_none());

        snapshot.role = Some(Role::Admin);
        assert!(snapshot.authenticated().is_none());

        snapshot.identity = Some(Identity::new("Pat Admin", "admins/pat"));
        assert!(snapshot.authenticated().is_some());
    }
}
