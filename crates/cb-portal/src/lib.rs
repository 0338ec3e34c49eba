//! CareBridge Portal Access Control
//!
//! Role-based access control for the care-management portal:
//! - Route guard: pure decision logic gating every navigation
//! - Route table: static declaration of which roles may view which paths
//! - Session holder: the single process-wide authenticated-principal record,
//!   persisted to and restored from durable local storage
//! - Auth flows: per-area login/logout against a principal directory
//! - API: HTTP portal shell translating guard outcomes into responses

pub mod api;
pub mod auth;
pub mod error;
pub mod guard;
pub mod session;

pub use error::{PortalError, Result};

pub use guard::{
    decide, home_for, infer_login_area, LoginArea, Outcome, RouteRule, RouteTable, LANDING_PATH,
};

pub use session::{
    FileSessionStorage, HttpLogoutNotifier, LogoutNotifier, MemorySessionStorage, NoopLogoutNotifier,
    PersistedSession, SessionStorage, SessionStore,
};

pub use auth::{
    seeded_directory, AuthService, LoginOutcome, MemoryDirectory, PrincipalDirectory,
    PrincipalRecord,
};

pub use api::{portal_router, PortalState};
