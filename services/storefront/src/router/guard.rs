use std::collections::HashSet;

use ecommerce_common::config::AppNavigationCfg;
use ecommerce_common::WebApiPath;

use super::table::{normalize_path, ResolvedRoute};
use crate::model::SessionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allowed,
    RedirectLogin,
    RedirectForbidden,
}

pub struct RolePolicy;

impl RolePolicy {
    /// routes without required roles are open to every authenticated user
    pub fn permits(required: Option<&HashSet<String>>, role: Option<&str>) -> bool {
        match (required, role) {
            (None, _) => true,
            (Some(set), Some(r)) => set.contains(r),
            (Some(_), None) => false,
        }
    }
}

/// Decides whether navigation to a resolved route may proceed, it never
/// blocks and never reads storage by itself.
pub struct RouteGuard {
    login_path: WebApiPath,
    register_path: WebApiPath,
}

impl RouteGuard {
    pub fn from_cfg(cfg: &AppNavigationCfg) -> Self {
        Self {
            login_path: normalize_path(cfg.login_path.as_str()),
            register_path: normalize_path(cfg.register_path.as_str()),
        }
    }

    pub fn evaluate(&self, route: &ResolvedRoute, session: &SessionContext) -> GuardDecision {
        if !session.is_authenticated() {
            let public = route.path == self.login_path || route.path == self.register_path;
            if public {
                GuardDecision::Allowed
            } else {
                GuardDecision::RedirectLogin
            }
        } else if RolePolicy::permits(route.required_roles(), session.role()) {
            GuardDecision::Allowed
        } else {
            GuardDecision::RedirectForbidden
        }
    }
}
