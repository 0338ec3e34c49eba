//! Route Declarations
//!
//! Static table mapping portal paths to the roles allowed to view them, plus
//! the login area each protected path belongs to. Declared at build time,
//! evaluated on every navigation, never persisted.

use cb_common::Role;
use std::fmt;
use std::str::FromStr;

use crate::error::PortalError;

/// The public landing page, also the fallback redirect target.
pub const LANDING_PATH: &str = "/";

/// Portal area a login page belongs to.
///
/// Carried as explicit metadata on every protected route so that the guard
/// does not have to infer the login target from path substrings. Substring
/// inference survives only as a fallback for paths with no declared rule
/// (see [`infer_login_area`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginArea {
    Superadmin,
    Admin,
    Client,
    Carer,
}

impl LoginArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginArea::Superadmin => "superadmin",
            LoginArea::Admin => "admin",
            LoginArea::Client => "client",
            LoginArea::Carer => "carer",
        }
    }

    /// Login page for this area.
    pub fn login_path(&self) -> &'static str {
        match self {
            LoginArea::Superadmin => "/superadmin/login",
            LoginArea::Admin => "/admin/login",
            LoginArea::Client => "/client/login",
            LoginArea::Carer => "/carer/login",
        }
    }

    /// Whether a role may authenticate through this area's login form.
    pub fn accepts(&self, role: Role) -> bool {
        matches!(
            (self, role),
            (LoginArea::Superadmin, Role::Superadmin)
                | (LoginArea::Admin, Role::Admin)
                | (LoginArea::Admin, Role::Manager)
                | (LoginArea::Client, Role::Client)
                | (LoginArea::Carer, Role::Caretaker)
        )
    }
}

impl fmt::Display for LoginArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoginArea {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(LoginArea::Superadmin),
            "admin" => Ok(LoginArea::Admin),
            "client" => Ok(LoginArea::Client),
            "carer" | "caretaker" => Ok(LoginArea::Carer),
            other => Err(PortalError::unauthorized(format!(
                "Unknown login area: {other}"
            ))),
        }
    }
}

/// Role-appropriate home page.
pub fn home_for(role: Role) -> &'static str {
    match role {
        Role::Superadmin => "/superadmin/dashboard",
        Role::Admin | Role::Manager => "/admin/dashboard",
        Role::Client => "/client/dashboard",
        Role::Caretaker => "/caretaker/my-day",
    }
}

/// Infer the login area from raw path text.
///
/// Fallback for paths without a declared rule. Check order matters:
/// `/superadmin/...` also contains `admin` as a substring, so `superadmin`
/// must be tested first.
pub fn infer_login_area(path: &str) -> Option<LoginArea> {
    if path.contains("superadmin") {
        Some(LoginArea::Superadmin)
    } else if path.contains("admin") {
        Some(LoginArea::Admin)
    } else if path.contains("client") {
        Some(LoginArea::Client)
    } else if path.contains("carer") || path.contains("caretaker") {
        Some(LoginArea::Carer)
    } else {
        None
    }
}

/// Static declaration of which roles may access a path prefix.
#[derive(Debug, Clone)]
pub struct RouteRule {
    pub path_prefix: String,
    pub allowed_roles: Vec<Role>,
    pub login_area: LoginArea,
}

impl RouteRule {
    pub fn new(path_prefix: impl Into<String>, allowed_roles: &[Role], login_area: LoginArea) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            allowed_roles: allowed_roles.to_vec(),
            login_area,
        }
    }

    /// Prefix match on path segment boundaries: `/admin/carers` matches
    /// `/admin/carers` and `/admin/carers/42`, not `/admin/carersx`.
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.path_prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// The portal's declared route map.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    public_paths: Vec<String>,
}

impl RouteTable {
    pub fn new(rules: Vec<RouteRule>, public_paths: Vec<String>) -> Self {
        Self { rules, public_paths }
    }

    /// Most specific (longest-prefix) matching rule for a path.
    pub fn find(&self, path: &str) -> Option<&RouteRule> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(path))
            .max_by_key(|rule| rule.path_prefix.len())
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }
}

impl Default for RouteTable {
    /// The care-management portal's route map.
    fn default() -> Self {
        const SUPERADMIN: &[Role] = &[Role::Superadmin];
        const ADMIN: &[Role] = &[Role::Admin, Role::Manager];
        const CLIENT: &[Role] = &[Role::Client];
        const CARETAKER: &[Role] = &[Role::Caretaker];

        let mut rules = Vec::new();

        for page in [
            "dashboard",
            "manage-admins",
            "manage-clients",
            "carers",
            "clients",
            "scheduling",
            "client-tracking",
            "messages",
            "feedback",
        ] {
            rules.push(RouteRule::new(
                format!("/superadmin/{page}"),
                SUPERADMIN,
                LoginArea::Superadmin,
            ));
        }

        for page in [
            "dashboard",
            "clients",
            "manage-clients",
            "scheduling",
            "client-tracking",
            "actions",
            "carers",
            "training",
            "messages",
            "feedback",
            "reports",
            "finance",
            "policies",
            "settings",
        ] {
            rules.push(RouteRule::new(
                format!("/admin/{page}"),
                ADMIN,
                LoginArea::Admin,
            ));
        }

        rules.push(RouteRule::new(
            "/client/dashboard",
            CLIENT,
            LoginArea::Client,
        ));

        for page in ["my-day", "visits", "messages", "feedback", "profile"] {
            rules.push(RouteRule::new(
                format!("/caretaker/{page}"),
                CARETAKER,
                LoginArea::Carer,
            ));
        }

        let public_paths = [
            LANDING_PATH,
            "/superadmin/login",
            "/admin/login",
            "/carer/login",
            "/client/login",
            "/client/signup",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self::new(rules, public_paths)
    }
}
