//! Persisted Session Entry
//!
//! The single durable record written on every successful login, deleted on
//! logout, and read once at process start.

use cb_common::{Identity, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serialized `{identity, role}` pair stored under the session entry.
///
/// A record whose role no longer parses into the closed [`Role`] enumeration
/// fails deserialization and is treated as malformed, i.e. no session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub identity: Identity,
    pub role: Role,

    /// When the entry was written; informational only, the entry does not
    /// expire.
    pub saved_at: DateTime<Utc>,
}

impl PersistedSession {
    pub fn new(identity: Identity, role: Role) -> Self {
        Self {
            identity,
            role,
            saved_at: Utc::now(),
        }
    }
}
