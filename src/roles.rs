//! Role-based access control
//!
//! Roles come from two optional sources: the authenticated session (primary)
//! and the roles claim of a configuration token (fallback). The primary source
//! wins whenever it is non-empty; the two are never merged.

use crate::admin::token_roles;
use serde_json::Value;

/// Resolve the effective role set from the two sources.
pub fn effective_roles(primary: Option<&[String]>, fallback_token: Option<&Value>) -> Vec<String> {
    if let Some(roles) = primary {
        if !roles.is_empty() {
            return roles.to_vec();
        }
    }
    token_roles(fallback_token)
}

/// Membership checks over an effective role set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleEvaluator {
    roles: Vec<String>,
}

impl RoleEvaluator {
    pub fn new(primary: Option<&[String]>, fallback_token: Option<&Value>) -> Self {
        Self {
            roles: effective_roles(primary, fallback_token),
        }
    }

    /// Evaluator over an already resolved role list.
    pub fn from_roles(roles: Vec<String>) -> Self {
        Self { roles }
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Case-sensitive exact match.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// True if any of `roles` is held. An empty request never matches.
    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        roles.iter().any(|role| self.has_role(role.as_ref()))
    }
}
