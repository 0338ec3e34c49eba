//! Session State
//!
//! The session holder, its persisted entry, the storage adapters, and the
//! fire-and-forget logout notifier.

pub mod entity;
pub mod notifier;
pub mod storage;
pub mod store;

pub use entity::PersistedSession;
pub use notifier::{HttpLogoutNotifier, LogoutNotifier, NoopLogoutNotifier};
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use store::SessionStore;
