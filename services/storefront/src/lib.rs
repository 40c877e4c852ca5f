pub mod adapter;
pub mod api;
pub mod constant;
pub mod error;
pub mod model;
pub mod router;

use std::result::Result;
use std::sync::Arc;

use ecommerce_common::config::AppConfig;
use ecommerce_common::logging::AppLogContext;

use crate::adapter::browsing::{AbstractBrowsingContext, FormRelayContext};
use crate::adapter::transport::{AbstractHttpTransport, AppHttpTransport};
use crate::api::endpoint::EndpointRegistry;
use crate::api::{AbstractCallInterceptor, AppApiClient, LoggingInterceptor};
use crate::error::AppError;
use crate::router::{AbstractPageTitle, NavigationTable, Navigator, PageTitleCell};

/// Everything a UI host needs from this crate, built once from
/// configuration and shared afterwards
pub struct AppClientContext {
    _config: Arc<AppConfig>,
    _log_ctx: Arc<AppLogContext>,
    _api: Arc<AppApiClient>,
    _navigator: Arc<Navigator>,
    _browsing: Arc<Box<dyn AbstractBrowsingContext>>,
    _title: Arc<PageTitleCell>,
}

struct TitleForward(Arc<PageTitleCell>);

impl AbstractPageTitle for TitleForward {
    fn set_title(&self, title: &str) {
        self.0.set_title(title)
    }
}

impl AppClientContext {
    pub fn new(cfg: AppConfig) -> Result<Self, AppError> {
        let logctx = {
            let lc = AppLogContext::new(&cfg.basepath, &cfg.client.logging)?;
            Arc::new(lc)
        };
        let backend = cfg.client.backend.clone();
        let _api = {
            let transport: Box<dyn AbstractHttpTransport> =
                Box::new(AppHttpTransport::new(backend.clone(), logctx.clone()));
            let interceptor: Box<dyn AbstractCallInterceptor> =
                Box::new(LoggingInterceptor::new(logctx.clone()));
            let registry = EndpointRegistry::new(backend.api_root.as_str());
            let c = AppApiClient::new(Arc::new(transport), Arc::new(interceptor), registry);
            Arc::new(c)
        };
        let _title = Arc::new(PageTitleCell::default());
        let _navigator = {
            let table = NavigationTable::storefront()?;
            let sink: Box<dyn AbstractPageTitle> = Box::new(TitleForward(_title.clone()));
            let n = Navigator::new(
                Arc::new(table),
                &cfg.client.navigation,
                Arc::new(sink),
                logctx.clone(),
            );
            Arc::new(n)
        };
        let _browsing = {
            let b: Box<dyn AbstractBrowsingContext> =
                Box::new(FormRelayContext::new(backend, logctx.clone()));
            Arc::new(b)
        };
        Ok(Self {
            _config: Arc::new(cfg),
            _log_ctx: logctx,
            _api,
            _navigator,
            _browsing,
            _title,
        })
    } // end of fn new

    pub fn api(&self) -> Arc<AppApiClient> {
        self._api.clone()
    }
    pub fn navigator(&self) -> Arc<Navigator> {
        self._navigator.clone()
    }
    pub fn browsing_context(&self) -> Arc<Box<dyn AbstractBrowsingContext>> {
        self._browsing.clone()
    }
    pub fn page_title(&self) -> Option<String> {
        self._title.current()
    }
    pub fn log_context(&self) -> Arc<AppLogContext> {
        self._log_ctx.clone()
    }
    pub fn config(&self) -> Arc<AppConfig> {
        self._config.clone()
    }
} // end of impl AppClientContext
