use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Method, Uri};

use ecommerce_common::config::AppBackendCfg;
use ecommerce_common::error::AppErrorCode;
use ecommerce_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use super::transport::BaseClient;
use crate::constant::HTTP_CONTENT_TYPE_FORM;
use crate::error::AppError;
use crate::model::HtmlFormModel;

/// Host environment able to open a new browsing window, e.g. a browser tab
/// or a headless relay
#[async_trait]
pub trait AbstractBrowsingContext: Send + Sync {
    /// `None` if the host refuses to open a window (popup blocked or similar)
    async fn open_window(&self) -> Option<Box<dyn AbstractBrowsingWindow>>;
}

#[async_trait]
pub trait AbstractBrowsingWindow: Send {
    fn write_document(&mut self, html: &str);

    /// Submit the first form of the written document. Returns `Ok(false)`
    /// when the document contains no form.
    async fn submit_first_form(&mut self) -> Result<bool, AppError>;

    fn close(&mut self);
}

/// Browsing context without a UI, it extracts the first form from the
/// document and relays it over HTTP the way a browser would submit it.
pub struct FormRelayContext {
    backend: Arc<AppBackendCfg>,
    logctx: Arc<AppLogContext>,
}

struct FormRelayWindow {
    backend: Arc<AppBackendCfg>,
    logctx: Arc<AppLogContext>,
    document: Option<String>,
}

struct RelayTarget {
    host: String,
    port: u16,
    secure: bool,
    path: String,
}

impl FormRelayContext {
    pub fn new(backend: Arc<AppBackendCfg>, logctx: Arc<AppLogContext>) -> Self {
        Self { backend, logctx }
    }
}

#[async_trait]
impl AbstractBrowsingContext for FormRelayContext {
    async fn open_window(&self) -> Option<Box<dyn AbstractBrowsingWindow>> {
        let w = FormRelayWindow {
            backend: self.backend.clone(),
            logctx: self.logctx.clone(),
            document: None,
        };
        Some(Box::new(w))
    }
}

impl FormRelayWindow {
    // relative actions are resolved against the backend the document came from
    fn resolve_target(&self, action: &str) -> Result<RelayTarget, AppError> {
        // a bare `pay.do` would otherwise be parsed as authority
        let action = if action.starts_with('/') || action.contains("://") {
            action.to_string()
        } else {
            format!("/{action}")
        };
        let uri = action.parse::<Uri>().map_err(|e| AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some(format!("form-action:{action}, {e}")),
        })?;
        let path = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .filter(|p| p.starts_with('/'))
            .unwrap_or_else(|| format!("/{}", uri.path().trim_start_matches('/')));
        let target = if let Some(host) = uri.host() {
            let secure = uri.scheme_str() == Some("https");
            let port = uri.port_u16().unwrap_or(if secure { 443 } else { 80 });
            RelayTarget {
                host: host.to_string(),
                port,
                secure,
                path,
            }
        } else {
            RelayTarget {
                host: self.backend.host.clone(),
                port: self.backend.port,
                secure: self.backend.secure,
                path,
            }
        };
        Ok(target)
    }

    async fn relay(&self, form: HtmlFormModel) -> Result<(), AppError> {
        if form.action.is_empty() {
            return Err(AppError {
                code: AppErrorCode::InvalidInput,
                detail: Some("form-action-empty".to_string()),
            });
        }
        let RelayTarget {
            host,
            port,
            secure,
            mut path,
        } = self.resolve_target(form.action.as_str())?;
        // repeated names are kept, pairs go out in document order
        let encoded = serde_urlencoded::to_string(form.fields.as_slice())?;
        let (method, body) = if form.method == "POST" {
            (Method::POST, Some(encoded.into_bytes()))
        } else {
            if !encoded.is_empty() {
                let delimiter = if path.contains('?') { '&' } else { '?' };
                path.push(delimiter);
                path += encoded.as_str();
            }
            (Method::GET, None)
        };
        let headers = if body.is_some() {
            vec![(
                CONTENT_TYPE,
                HeaderValue::from_static(HTTP_CONTENT_TYPE_FORM),
            )]
        } else {
            Vec::new()
        };
        let logctx = &self.logctx;
        app_log_event!(
            logctx,
            AppLogLevel::DEBUG,
            "form-relay, {host}:{port}, method:{method}, path:{path}"
        );
        let mut client = BaseClient::try_build(host, port, secure, self.logctx.clone()).await?;
        let (resp_body, status) = client.execute(path.as_str(), method, headers, body).await?;
        if status.is_success() || status.is_redirection() {
            Ok(())
        } else {
            let detail = String::from_utf8_lossy(&resp_body).into_owned();
            Err(AppError {
                code: AppErrorCode::HttpNonSuccessStatus(status.as_u16()),
                detail: Some(detail),
            })
        }
    } // end of fn relay
} // end of impl FormRelayWindow

#[async_trait]
impl AbstractBrowsingWindow for FormRelayWindow {
    fn write_document(&mut self, html: &str) {
        self.document = Some(html.to_string());
    }

    async fn submit_first_form(&mut self) -> Result<bool, AppError> {
        let form = match self.document.as_deref().and_then(HtmlFormModel::first_in) {
            Some(f) => f,
            None => return Ok(false),
        };
        let limit = Duration::from_secs(self.backend.timeout_secs as u64);
        match tokio::time::timeout(limit, self.relay(form)).await {
            Ok(result) => result.map(|()| true),
            Err(_elapsed) => Err(AppError {
                code: AppErrorCode::HttpTimeout,
                detail: Some("form-relay".to_string()),
            }),
        }
    }

    fn close(&mut self) {
        self.document = None;
    }
}
