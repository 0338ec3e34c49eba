//! Principal Directory
//!
//! Lookup of login credentials per portal area. The directory is an external
//! collaborator behind a trait; the shipped implementation is an in-memory
//! seeded directory for development and tests.

use async_trait::async_trait;
use cb_common::{Identity, Role};
use std::collections::HashMap;

use crate::error::Result;
use crate::guard::LoginArea;

/// Directory entry backing one login.
#[derive(Debug, Clone)]
pub struct PrincipalRecord {
    pub identity: Identity,
    pub role: Role,
    pub password: String,
    pub active: bool,
}

impl PrincipalRecord {
    pub fn new(identity: Identity, role: Role, password: impl Into<String>) -> Self {
        Self {
            identity,
            role,
            password: password.into(),
            active: true,
        }
    }

    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Credential lookup, keyed by portal area and username.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    async fn find_by_username(
        &self,
        area: LoginArea,
        username: &str,
    ) -> Result<Option<PrincipalRecord>>;
}

/// In-memory directory.
#[derive(Default)]
pub struct MemoryDirectory {
    records: HashMap<(LoginArea, String), PrincipalRecord>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, area: LoginArea, username: impl Into<String>, record: PrincipalRecord) {
        self.records.insert((area, username.into()), record);
    }
}

#[async_trait]
impl PrincipalDirectory for MemoryDirectory {
    async fn find_by_username(
        &self,
        area: LoginArea,
        username: &str,
    ) -> Result<Option<PrincipalRecord>> {
        Ok(self.records.get(&(area, username.to_string())).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_is_scoped_by_area() {
        let mut directory = MemoryDirectory::new();
        directory.insert(
            LoginArea::Admin,
            "sam",
            PrincipalRecord::new(Identity::new("Sam Admin", "admins/sam"), Role::Admin, "pw"),
        );

        assert!(directory
            .find_by_username(LoginArea::Admin, "sam")
            .await
            .unwrap()
            .is_some());
        // Same username through another portal's form finds nothing
        assert!(directory
            .find_by_username(LoginArea::Client, "sam")
            .await
            .unwrap()
            .is_none());
    }
}
