//! Route Guard
//!
//! Pure decision logic gating every navigation. Given the current session
//! snapshot, the attempted path, and the roles allowed on that path, the guard
//! produces one of four outcomes; the surrounding shell performs the actual
//! render or redirect. The guard never mutates session state.
//!
//! State machine view: Loading (initial, left exactly once when the persisted
//! session check settles), Unauthenticated, AuthenticatedAuthorized, and
//! AuthenticatedUnauthorized. Transitions are driven by the session holder and
//! by navigation; there is no terminal state.

pub mod routes;

use cb_common::{Role, SessionSnapshot};

pub use routes::{home_for, infer_login_area, LoginArea, RouteRule, RouteTable, LANDING_PATH};

/// Navigation outcome surfaced to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The guarded content is shown as-is.
    Render,
    /// Persisted-session restore is still in flight; render a loading
    /// indicator and do not redirect yet.
    ShowLoading,
    /// No usable session; send the visitor to the login page for the area
    /// they were trying to reach. `return_to` carries the original path as a
    /// hint for after login; it is not enforced.
    RedirectToLogin {
        target: &'static str,
        return_to: String,
    },
    /// Logged in but not allowed here; send them to their own home.
    RedirectToHome { target: &'static str },
}

/// Decide what to render for a navigation.
///
/// `declared_area` is the route's explicit login-area metadata; when absent
/// (paths with no declared rule) the area is inferred from the path text,
/// falling back to the landing page.
pub fn decide(
    snapshot: &SessionSnapshot,
    path: &str,
    allowed_roles: &[Role],
    declared_area: Option<LoginArea>,
) -> Outcome {
    if snapshot.is_loading {
        return Outcome::ShowLoading;
    }

    let Some((_identity, role)) = snapshot.authenticated() else {
        let target = declared_area
            .or_else(|| infer_login_area(path))
            .map(|area| area.login_path())
            .unwrap_or(LANDING_PATH);
        return Outcome::RedirectToLogin {
            target,
            return_to: path.to_string(),
        };
    };

    if !allowed_roles.contains(&role) {
        return Outcome::RedirectToHome {
            target: home_for(role),
        };
    }

    Outcome::Render
}

impl RouteTable {
    /// Evaluate a navigation against the declared route map.
    ///
    /// Protected paths go through [`decide`]; public paths render as-is;
    /// anything else is the catch-all redirect to the landing page.
    pub fn navigate(&self, snapshot: &SessionSnapshot, path: &str) -> Outcome {
        if let Some(rule) = self.find(path) {
            return decide(snapshot, path, &rule.allowed_roles, Some(rule.login_area));
        }

        if self.is_public(path) {
            return Outcome::Render;
        }

        Outcome::RedirectToHome {
            target: LANDING_PATH,
        }
    }
}
