pub mod guard;
pub mod table;

use std::sync::{Arc, RwLock};

use ecommerce_common::config::AppNavigationCfg;
use ecommerce_common::logging::{app_log_event, AppLogContext, AppLogLevel};
use ecommerce_common::WebApiPath;

use crate::error::AppError;
use crate::model::SessionContext;

pub use guard::{GuardDecision, RolePolicy, RouteGuard};
pub use table::{normalize_path, NavigationTable, ResolvedRoute, RouteDescriptor};

/// Sink of page titles, e.g. the document title of a browser tab
pub trait AbstractPageTitle: Send + Sync {
    fn set_title(&self, title: &str);
}

#[derive(Default)]
pub struct PageTitleCell {
    inner: RwLock<Option<String>>,
}

impl PageTitleCell {
    pub fn current(&self) -> Option<String> {
        self.inner.read().ok().and_then(|g| g.clone())
    }
}

impl AbstractPageTitle for PageTitleCell {
    fn set_title(&self, title: &str) {
        if let Ok(mut g) = self.inner.write() {
            *g = Some(title.to_string());
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigationOutcome {
    pub requested: String,
    /// route actually rendered
    pub landed: ResolvedRoute,
    /// decision made on the requested route
    pub decision: GuardDecision,
    /// last title applied to the page
    pub title: Option<String>,
}

pub struct Navigator {
    table: Arc<NavigationTable>,
    guard: RouteGuard,
    login_path: WebApiPath,
    forbidden_path: WebApiPath,
    title_sink: Arc<Box<dyn AbstractPageTitle>>,
    logctx: Arc<AppLogContext>,
}

impl Navigator {
    pub fn new(
        table: Arc<NavigationTable>,
        cfg: &AppNavigationCfg,
        title_sink: Arc<Box<dyn AbstractPageTitle>>,
        logctx: Arc<AppLogContext>,
    ) -> Self {
        Self {
            table,
            guard: RouteGuard::from_cfg(cfg),
            login_path: cfg.login_path.clone(),
            forbidden_path: cfg.forbidden_path.clone(),
            title_sink,
            logctx,
        }
    }

    pub fn table(&self) -> &NavigationTable {
        self.table.as_ref()
    }

    fn apply_title(&self, route: &ResolvedRoute, last: &mut Option<String>) {
        if let Some(t) = route.title() {
            self.title_sink.set_title(t);
            *last = Some(t.to_string());
        }
    }

    /// Resolve the path, report its title, then run the guard. Login and
    /// forbidden destinations are rendered without another guard pass.
    pub fn navigate(
        &self,
        path: &str,
        session: &SessionContext,
    ) -> Result<NavigationOutcome, AppError> {
        let resolved = self.table.resolve(path)?;
        let mut title = None;
        self.apply_title(&resolved, &mut title);
        let decision = self.guard.evaluate(&resolved, session);
        let landed = match decision {
            GuardDecision::Allowed => resolved,
            GuardDecision::RedirectLogin => self.table.resolve(self.login_path.as_str())?,
            GuardDecision::RedirectForbidden => {
                let logctx = &self.logctx;
                app_log_event!(
                    logctx,
                    AppLogLevel::INFO,
                    "forbidden, path:{}, role:{:?}",
                    resolved.path,
                    session.role()
                );
                self.table.resolve(self.forbidden_path.as_str())?
            }
        };
        if decision != GuardDecision::Allowed {
            self.apply_title(&landed, &mut title);
        }
        Ok(NavigationOutcome {
            requested: path.to_string(),
            landed,
            decision,
            title,
        })
    } // end of fn navigate
} // end of impl Navigator
