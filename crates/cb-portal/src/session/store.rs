//! Session State Holder
//!
//! The single process-wide record of the authenticated principal. Explicitly
//! constructed and injected wherever it is needed; the guard only ever reads
//! snapshots, all mutation goes through the holder's own methods.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cb_common::{Identity, Role, SessionSnapshot};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::session::entity::PersistedSession;
use crate::session::notifier::LogoutNotifier;
use crate::session::storage::SessionStorage;

pub struct SessionStore {
    state: RwLock<SessionSnapshot>,
    storage: Arc<dyn SessionStorage>,
    notifier: Arc<dyn LogoutNotifier>,
    restored: AtomicBool,
}

impl SessionStore {
    /// New holder in the initial loading state; call [`SessionStore::restore`]
    /// once at startup to settle it.
    pub fn new(storage: Arc<dyn SessionStorage>, notifier: Arc<dyn LogoutNotifier>) -> Self {
        Self {
            state: RwLock::new(SessionSnapshot::loading()),
            storage,
            notifier,
            restored: AtomicBool::new(false),
        }
    }

    /// Cheap point-in-time copy for the guard.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.read().clone()
    }

    /// Replace the identity. No validation: callers are trusted login flows.
    pub fn set_identity(&self, identity: Identity) {
        self.state.write().identity = Some(identity);
    }

    /// Replace the role. No validation: callers are trusted login flows.
    pub fn set_role(&self, role: Role) {
        self.state.write().role = Some(role);
    }

    pub fn set_loading(&self, loading: bool) {
        self.state.write().is_loading = loading;
    }

    /// Record a successful login and write the persisted entry so a process
    /// restart restores the session.
    pub fn login(&self, identity: Identity, role: Role) -> Result<()> {
        self.storage
            .save(&PersistedSession::new(identity.clone(), role))?;

        let mut state = self.state.write();
        state.identity = Some(identity);
        state.role = Some(role);
        Ok(())
    }

    /// Clear the session.
    ///
    /// The in-memory clear and the removal of the persisted entry happen
    /// synchronously; the external notification is spawned fire-and-forget
    /// and can neither delay nor reverse the clear.
    pub fn logout(&self) {
        let identity = {
            let mut state = self.state.write();
            let identity = state.identity.take();
            state.role = None;
            identity
        };

        if let Err(e) = self.storage.delete() {
            warn!(error = %e, "Failed to delete persisted session entry");
        }

        if let Some(identity) = identity {
            info!(principal_id = %identity.id, "Session logged out");
            let notifier = Arc::clone(&self.notifier);
            tokio::spawn(async move {
                if let Err(e) = notifier.notify(&identity).await {
                    warn!(error = %e, "Logout notification failed");
                }
            });
        }
    }

    /// One-shot startup restore of the persisted session entry.
    ///
    /// Malformed or unreadable data is logged and treated as no session.
    /// Whatever happens, `is_loading` becomes false after the attempt, and
    /// repeat calls are no-ops.
    pub fn restore(&self) {
        if self.restored.swap(true, Ordering::SeqCst) {
            debug!("Session already restored; ignoring repeat restore");
            return;
        }

        match self.storage.load() {
            Ok(Some(entry)) => {
                info!(principal_id = %entry.identity.id, role = %entry.role, "Restored persisted session");
                let mut state = self.state.write();
                state.identity = Some(entry.identity);
                state.role = Some(entry.role);
            }
            Ok(None) => {
                debug!("No persisted session entry");
            }
            Err(e) => {
                warn!(error = %e, "Persisted session unreadable; starting unauthenticated");
            }
        }

        self.set_loading(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::notifier::NoopLogoutNotifier;
    use crate::session::storage::{FileSessionStorage, MemorySessionStorage};

    fn store_with(storage: Arc<dyn SessionStorage>) -> SessionStore {
        SessionStore::new(storage, Arc::new(NoopLogoutNotifier))
    }

    #[test]
    fn starts_loading_and_settles_after_restore() {
        let store = store_with(Arc::new(MemorySessionStorage::new()));
        assert!(store.snapshot().is_loading);

        store.restore();
        let snapshot = store.snapshot();
        assert!(!snapshot.is_loading);
        assert!(snapshot.authenticated().is_none());
    }

    #[test]
    fn restore_populates_from_persisted_entry() {
        let entry = PersistedSession::new(Identity::new("Sam Admin", "admins/sam"), Role::Admin);
        let storage = Arc::new(MemorySessionStorage::with_entry(entry.clone()));

        let store = store_with(storage);
        store.restore();

        let snapshot = store.snapshot();
        assert!(!snapshot.is_loading);
        let (identity, role) = snapshot.authenticated().unwrap();
        assert_eq!(identity, &entry.identity);
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn restore_is_one_shot() {
        let storage = Arc::new(MemorySessionStorage::new());
        let store = store_with(storage.clone());
        store.restore();

        // A login after restore must survive a second (ignored) restore call
        store
            .login(Identity::new("Cleo Client", "clients/cleo"), Role::Client)
            .unwrap();
        store.restore();
        assert!(store.snapshot().authenticated().is_some());
    }

    #[test]
    fn unreadable_entry_means_no_session_but_still_settles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not json at all").unwrap();

        let store = store_with(Arc::new(FileSessionStorage::new(&path)));
        store.restore();

        let snapshot = store.snapshot();
        assert!(!snapshot.is_loading);
        assert!(snapshot.authenticated().is_none());
    }

    #[test]
    fn login_persists_for_the_next_process() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let storage = Arc::new(FileSessionStorage::new(&path));
        let store = store_with(storage);
        store.restore();
        store
            .login(Identity::new("Ada Carer", "carers/ada"), Role::Caretaker)
            .unwrap();

        // "Restart": a fresh holder over the same file
        let store = store_with(Arc::new(FileSessionStorage::new(&path)));
        store.restore();
        let snapshot = store.snapshot();
        assert!(!snapshot.is_loading);
        let (identity, role) = snapshot.authenticated().unwrap();
        assert_eq!(identity.display_name, "Ada Carer");
        assert_eq!(role, Role::Caretaker);
    }

    #[tokio::test]
    async fn logout_clears_memory_and_disk() {
        let storage = Arc::new(MemorySessionStorage::new());
        let store = store_with(storage.clone());
        store.restore();
        store
            .login(Identity::new("Sam Admin", "admins/sam"), Role::Admin)
            .unwrap();
        assert!(storage.load().unwrap().is_some());

        store.logout();

        let snapshot = store.snapshot();
        assert!(snapshot.identity.is_none());
        assert!(snapshot.role.is_none());
        assert!(!snapshot.is_loading);
        assert!(storage.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn setters_replace_fields_independently() {
        let store = store_with(Arc::new(MemorySessionStorage::new()));
        store.restore();

        store.set_role(Role::Manager);
        assert_eq!(store.snapshot().role, Some(Role::Manager));
        // Role without identity is not an authenticated session
        assert!(store.snapshot().authenticated().is_none());

        store.set_identity(Identity::new("Max Manager", "admins/max"));
        assert!(store.snapshot().authenticated().is_some());
    }
}
