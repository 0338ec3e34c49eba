//! Authentication
//!
//! Per-area login flows against the principal directory.

pub mod directory;
pub mod seed;
pub mod service;

pub use directory::{MemoryDirectory, PrincipalDirectory, PrincipalRecord};
pub use seed::seeded_directory;
pub use service::{AuthService, LoginOutcome};
