mod base_client;

use std::marker::{Send, Sync};
use std::result::Result;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Method, StatusCode};

use ecommerce_common::config::AppBackendCfg;
use ecommerce_common::error::AppErrorCode;
use ecommerce_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use crate::error::AppError;

pub(crate) use base_client::BaseClient;

/// Request ready to be sent, `path` is in origin form and already
/// carries the query string.
#[derive(Debug, Clone)]
pub struct HttpRequestSpec {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(HeaderName, HeaderValue)>,
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct HttpRawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait AbstractHttpTransport: Send + Sync {
    async fn execute(&self, req: HttpRequestSpec) -> Result<HttpRawResponse, AppError>;
}

/// Transport to the storefront backend, every request opens a fresh
/// connection and is bounded by the timeout in configuration.
pub struct AppHttpTransport {
    _backend: Arc<AppBackendCfg>,
    _logctx: Arc<AppLogContext>,
}

impl AppHttpTransport {
    pub fn new(backend: Arc<AppBackendCfg>, logctx: Arc<AppLogContext>) -> Self {
        Self {
            _backend: backend,
            _logctx: logctx,
        }
    }

    async fn _execute_inner(&self, req: HttpRequestSpec) -> Result<HttpRawResponse, AppError> {
        let cfg = self._backend.as_ref();
        let mut client = BaseClient::try_build(
            cfg.host.clone(),
            cfg.port,
            cfg.secure,
            self._logctx.clone(),
        )
        .await?;
        let HttpRequestSpec {
            method,
            path,
            headers,
            body,
        } = req;
        let (body, status) = client
            .execute(path.as_str(), method, headers, body)
            .await?;
        Ok(HttpRawResponse { status, body })
    }
}

#[async_trait]
impl AbstractHttpTransport for AppHttpTransport {
    async fn execute(&self, req: HttpRequestSpec) -> Result<HttpRawResponse, AppError> {
        let limit = Duration::from_secs(self._backend.timeout_secs as u64);
        let path_log = req.path.clone();
        match tokio::time::timeout(limit, self._execute_inner(req)).await {
            Ok(result) => result,
            Err(_elapsed) => {
                let logctx = &self._logctx;
                app_log_event!(
                    logctx,
                    AppLogLevel::DEBUG,
                    "request-expired, path:{path_log}, secs:{}",
                    limit.as_secs()
                );
                Err(AppError {
                    code: AppErrorCode::HttpTimeout,
                    detail: Some(format!("path:{path_log}")),
                })
            }
        }
    }
}
