pub mod account;
pub mod advertisement;
pub mod cart;
pub mod coupon;
pub mod dto;
pub mod endpoint;
pub mod orders;
pub mod product;
pub mod recommend;

use std::sync::Arc;

use hyper::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use hyper::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsnVal;

use ecommerce_common::error::AppErrorCode;
use ecommerce_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use crate::adapter::transport::{AbstractHttpTransport, HttpRequestSpec};
use crate::constant::{hard_limit, HTTP_CONTENT_TYPE_JSON};
use crate::error::AppError;

use self::account::AccountApi;
use self::advertisement::AdvertisementApi;
use self::cart::CartApi;
use self::coupon::CouponApi;
use self::endpoint::{ApiDomain, EndpointRegistry};
use self::orders::OrderApi;
use self::product::ProductApi;
use self::recommend::RecommendApi;

const HTTP_ACCEPT_TEXT: &str = "text/html, text/plain, */*";

/// Request to one backend resource, built by the resource access modules.
/// Serialization failures are kept and reported when the request is sent.
pub struct ApiRequest {
    method: Method,
    domain: ApiDomain,
    resource: String,
    query: Option<String>,
    body: Option<Vec<u8>>,
    accept_text: bool,
    build_error: Option<AppError>,
}

impl ApiRequest {
    /// `resource` is relative to the domain prefix, either empty or
    /// starting with `/`
    pub fn new(method: Method, domain: ApiDomain, resource: impl Into<String>) -> Self {
        Self {
            method,
            domain,
            resource: resource.into(),
            query: None,
            body: None,
            accept_text: false,
            build_error: None,
        }
    }

    pub fn query<T: Serialize>(mut self, params: &T) -> Self {
        match serde_qs::to_string(params) {
            Ok(q) if q.is_empty() => {}
            Ok(q) => {
                self.query = Some(q);
            }
            Err(e) => {
                self.build_error = Some(e.into());
            }
        }
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        match serde_json::to_vec(body) {
            Ok(v) => {
                self.body = Some(v);
            }
            Err(e) => {
                self.build_error = Some(e.into());
            }
        }
        self
    }

    pub fn accept_text(mut self) -> Self {
        self.accept_text = true;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// label used in log messages, e.g. `POST orders/pay`
    pub fn label(&self) -> String {
        format!("{} {}{}", self.method, self.domain, self.resource)
    }

    fn into_spec(self, registry: &EndpointRegistry) -> Result<HttpRequestSpec, AppError> {
        let Self {
            method,
            domain,
            resource,
            query,
            body,
            accept_text,
            build_error,
        } = self;
        if let Some(e) = build_error {
            return Err(e);
        }
        let mut path = registry.prefix(domain) + resource.as_str();
        if let Some(q) = query {
            path.push('?');
            path += q.as_str();
        }
        let accept = if accept_text {
            HTTP_ACCEPT_TEXT
        } else {
            HTTP_CONTENT_TYPE_JSON
        };
        let mut headers = vec![(ACCEPT, HeaderValue::from_static(accept))];
        if body.is_some() {
            headers.push((CONTENT_TYPE, HeaderValue::from_static(HTTP_CONTENT_TYPE_JSON)));
        }
        Ok(HttpRequestSpec {
            method,
            path,
            headers,
            body,
        })
    }
} // end of impl ApiRequest

/// Whole response of a successful call, status is always in 2xx range
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        let out = serde_json::from_slice::<T>(self.body.as_slice())?;
        Ok(out)
    }
    pub fn value(&self) -> Result<JsnVal, AppError> {
        self.json::<JsnVal>()
    }
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.body.as_slice()).into_owned()
    }
}

/// Central hook invoked for every failed call and every notable
/// non-fatal outcome, the caller still receives the failure unchanged.
pub trait AbstractCallInterceptor: Send + Sync {
    fn on_failure(&self, label: &str, error: &AppError);
    fn on_notice(&self, label: &str, detail: &str);
}

pub struct LoggingInterceptor {
    logctx: Arc<AppLogContext>,
}

impl LoggingInterceptor {
    pub fn new(logctx: Arc<AppLogContext>) -> Self {
        Self { logctx }
    }
}

impl AbstractCallInterceptor for LoggingInterceptor {
    fn on_failure(&self, label: &str, error: &AppError) {
        let logctx = &self.logctx;
        app_log_event!(logctx, AppLogLevel::ERROR, "api-call-failed, {label}, {error}");
    }
    fn on_notice(&self, label: &str, detail: &str) {
        let logctx = &self.logctx;
        app_log_event!(logctx, AppLogLevel::WARNING, "api-call, {label}, {detail}");
    }
}

pub struct AppApiClient {
    transport: Arc<Box<dyn AbstractHttpTransport>>,
    interceptor: Arc<Box<dyn AbstractCallInterceptor>>,
    registry: EndpointRegistry,
}

impl AppApiClient {
    pub fn new(
        transport: Arc<Box<dyn AbstractHttpTransport>>,
        interceptor: Arc<Box<dyn AbstractCallInterceptor>>,
        registry: EndpointRegistry,
    ) -> Self {
        Self {
            transport,
            interceptor,
            registry,
        }
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub(crate) fn interceptor(&self) -> &dyn AbstractCallInterceptor {
        &**self.interceptor
    }

    /// Issue exactly one HTTP call. Transport failures and non-2xx replies
    /// are reported to the interceptor once and returned as they are.
    pub async fn send(&self, req: ApiRequest) -> Result<ApiResponse, AppError> {
        let label = req.label();
        let result = self._send(req).await;
        if let Err(e) = result.as_ref() {
            self.interceptor.on_failure(label.as_str(), e);
        }
        result
    }

    async fn _send(&self, req: ApiRequest) -> Result<ApiResponse, AppError> {
        let spec = req.into_spec(&self.registry)?;
        let raw = self.transport.execute(spec).await?;
        let status = raw.status.as_u16();
        if raw.status.is_success() {
            Ok(ApiResponse {
                status,
                body: raw.body,
            })
        } else {
            let detail = Self::truncate_detail(raw.body.as_slice());
            Err(AppError {
                code: AppErrorCode::HttpNonSuccessStatus(status),
                detail: Some(detail),
            })
        }
    }

    fn truncate_detail(raw: &[u8]) -> String {
        let mut s = String::from_utf8_lossy(raw).into_owned();
        if s.len() > hard_limit::MAX_NBYTES_ERROR_DETAIL {
            let mut end = hard_limit::MAX_NBYTES_ERROR_DETAIL;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            s.truncate(end);
        }
        s
    }

    /// send the request and decode its body, decode failure is reported
    /// the same way as transport failure
    pub(crate) async fn send_decoded<T: DeserializeOwned>(
        &self,
        req: ApiRequest,
    ) -> Result<T, AppError> {
        let label = req.label();
        let resp = self.send(req).await?;
        resp.json::<T>().map_err(|e| {
            self.interceptor.on_failure(label.as_str(), &e);
            e
        })
    }

    pub(crate) async fn send_value(&self, req: ApiRequest) -> Result<JsnVal, AppError> {
        self.send_decoded::<JsnVal>(req).await
    }

    pub(crate) fn report_failure(&self, label: &str, e: AppError) -> AppError {
        self.interceptor.on_failure(label, &e);
        e
    }

    pub fn account(&self) -> AccountApi<'_> {
        AccountApi::new(self)
    }
    pub fn product(&self) -> ProductApi<'_> {
        ProductApi::new(self)
    }
    pub fn cart(&self) -> CartApi<'_> {
        CartApi::new(self)
    }
    pub fn orders(&self) -> OrderApi<'_> {
        OrderApi::new(self)
    }
    pub fn coupon(&self) -> CouponApi<'_> {
        CouponApi::new(self)
    }
    pub fn advertisement(&self) -> AdvertisementApi<'_> {
        AdvertisementApi::new(self)
    }
    pub fn recommend(&self) -> RecommendApi<'_> {
        RecommendApi::new(self)
    }
} // end of impl AppApiClient
