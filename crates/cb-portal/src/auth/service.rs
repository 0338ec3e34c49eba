//! Authentication Service
//!
//! Per-area login and logout against the principal directory, updating the
//! session holder and its persisted entry.

use std::sync::Arc;

use cb_common::{Identity, Role};
use tracing::{info, warn};

use crate::auth::directory::PrincipalDirectory;
use crate::error::{PortalError, Result};
use crate::guard::{home_for, LoginArea};
use crate::session::SessionStore;

/// What a successful login hands back to the shell.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub identity: Identity,
    pub role: Role,
    pub home: &'static str,
}

pub struct AuthService {
    directory: Arc<dyn PrincipalDirectory>,
    store: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(directory: Arc<dyn PrincipalDirectory>, store: Arc<SessionStore>) -> Self {
        Self { directory, store }
    }

    /// Authenticate through one portal area's login form.
    ///
    /// Unknown user, wrong password, inactive account, and a role that does
    /// not belong to the requested area all fail identically with
    /// [`PortalError::InvalidCredentials`].
    pub async fn login(
        &self,
        area: LoginArea,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome> {
        let record = self
            .directory
            .find_by_username(area, username)
            .await?
            .ok_or(PortalError::InvalidCredentials)?;

        if record.password != password || !record.active {
            warn!(%area, username, "Rejected login");
            return Err(PortalError::InvalidCredentials);
        }

        if !area.accepts(record.role) {
            warn!(%area, username, role = %record.role, "Role does not belong to this portal area");
            return Err(PortalError::InvalidCredentials);
        }

        self.store.login(record.identity.clone(), record.role)?;
        info!(%area, principal_id = %record.identity.id, role = %record.role, "Login accepted");

        Ok(LoginOutcome {
            home: home_for(record.role),
            identity: record.identity,
            role: record.role,
        })
    }

    /// Clear the current session; always succeeds from the caller's view.
    pub fn logout(&self) {
        self.store.logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::seed::seeded_directory;
    use crate::session::{MemorySessionStorage, NoopLogoutNotifier};

    fn service() -> (AuthService, Arc<SessionStore>) {
        let store = Arc::new(SessionStore::new(
            Arc::new(MemorySessionStorage::new()),
            Arc::new(NoopLogoutNotifier),
        ));
        store.restore();
        let service = AuthService::new(Arc::new(seeded_directory()), store.clone());
        (service, store)
    }

    #[tokio::test]
    async fn seeded_superadmin_can_log_in() {
        let (service, store) = service();
        let outcome = service
            .login(LoginArea::Superadmin, "superadmin", "superadmin")
            .await
            .unwrap();

        assert_eq!(outcome.role, Role::Superadmin);
        assert_eq!(outcome.home, "/superadmin/dashboard");
        assert!(store.snapshot().authenticated().is_some());
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let (service, store) = service();
        let err = service
            .login(LoginArea::Superadmin, "superadmin", "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::InvalidCredentials));
        assert!(store.snapshot().authenticated().is_none());
    }

    #[tokio::test]
    async fn unknown_user_is_indistinguishable_from_wrong_password() {
        let (service, _) = service();
        let err = service
            .login(LoginArea::Admin, "nobody", "whatever")
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::InvalidCredentials));
    }

    #[tokio::test]
    async fn caretaker_cannot_use_the_admin_form() {
        let (service, _) = service();
        // "ada" exists in the carer area only; admin-area lookup misses
        let err = service
            .login(LoginArea::Admin, "ada", "DevPassword123!")
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::InvalidCredentials));
    }

    #[tokio::test]
    async fn inactive_account_is_invalid_credentials() {
        use crate::auth::directory::{MemoryDirectory, PrincipalRecord};

        let mut directory = MemoryDirectory::new();
        directory.insert(
            LoginArea::Admin,
            "dana",
            PrincipalRecord::new(Identity::new("Dana Admin", "admins/dana"), Role::Admin, "pw")
                .deactivated(),
        );
        let store = Arc::new(SessionStore::new(
            Arc::new(crate::session::MemorySessionStorage::new()),
            Arc::new(crate::session::NoopLogoutNotifier),
        ));
        store.restore();
        let service = AuthService::new(Arc::new(directory), store);

        let err = service
            .login(LoginArea::Admin, "dana", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::InvalidCredentials));
    }

    #[tokio::test]
    async fn manager_logs_in_through_the_admin_area() {
        let (service, _) = service();
        let outcome = service
            .login(LoginArea::Admin, "max", "DevPassword123!")
            .await
            .unwrap();
        assert_eq!(outcome.role, Role::Manager);
        assert_eq!(outcome.home, "/admin/dashboard");
    }

    #[tokio::test]
    async fn logout_clears_the_session() {
        let (service, store) = service();
        service
            .login(LoginArea::Client, "cleo", "DevPassword123!")
            .await
            .unwrap();
        assert!(store.snapshot().authenticated().is_some());

        service.logout();
        assert!(store.snapshot().authenticated().is_none());
    }
}
