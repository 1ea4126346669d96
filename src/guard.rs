//! Navigation guard
//!
//! Decides, for a navigation target, whether to proceed, send the user to the
//! login page, or bounce them to the landing page for lack of a role. The
//! router that acts on the decision lives in the host application.

use crate::roles::RoleEvaluator;

pub const LOGIN_ROUTE: &str = "Login";
pub const DEMO_ROUTE: &str = "Demo";
pub const ADMIN_ROUTE: &str = "Admin";

/// Per-route access requirements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_role: Option<String>,
}

/// A resolved navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: Option<String>,
    pub path: String,
    pub meta: RouteMeta,
}

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    /// Go to the login page, returning to `redirect` afterwards. Replaces the
    /// current history entry.
    Login { redirect: String },
    /// Go to the named route instead.
    Redirect { name: String },
}

/// The application's route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    fallback_path: String,
}

impl RouteTable {
    /// Login, demo and admin pages; `/` and unknown paths land on `/demo`.
    pub fn standard() -> Self {
        Self {
            routes: vec![
                Route {
                    name: Some(LOGIN_ROUTE.to_string()),
                    path: "/login".to_string(),
                    meta: RouteMeta::default(),
                },
                Route {
                    name: Some(DEMO_ROUTE.to_string()),
                    path: "/demo".to_string(),
                    meta: RouteMeta {
                        requires_auth: true,
                        requires_role: None,
                    },
                },
                Route {
                    name: Some(ADMIN_ROUTE.to_string()),
                    path: "/admin".to_string(),
                    meta: RouteMeta {
                        requires_auth: true,
                        requires_role: Some("admin".to_string()),
                    },
                },
            ],
            fallback_path: "/demo".to_string(),
        }
    }

    /// Resolve a path, following the catch-all redirect for unknown paths.
    pub fn resolve(&self, path: &str) -> &Route {
        let path = path.split(&['?', '#'][..]).next().unwrap_or(path);
        self.by_path(path)
            .or_else(|| self.by_path(&self.fallback_path))
            .unwrap_or(&self.routes[0])
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name.as_deref() == Some(name))
    }

    fn by_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }
}

/// Guard a navigation to `to`.
///
/// Authentication is checked before roles. Unauthenticated users are sent to
/// login with a redirect back to the admin page when that was the target, and
/// to the demo page otherwise.
pub fn guard(to: &Route, authenticated: bool, roles: &RoleEvaluator) -> GuardDecision {
    if to.meta.requires_auth && !authenticated {
        let redirect = match to.name.as_deref() {
            Some(ADMIN_ROUTE) => "/admin",
            _ => "/demo",
        };
        return GuardDecision::Login {
            redirect: redirect.to_string(),
        };
    }

    if let Some(required) = &to.meta.requires_role {
        if !roles.has_role(required) {
            return GuardDecision::Redirect {
                name: DEMO_ROUTE.to_string(),
            };
        }
    }

    GuardDecision::Proceed
}
