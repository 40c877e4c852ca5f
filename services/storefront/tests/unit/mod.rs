mod adapter;

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use hyper::StatusCode;

use ecommerce_common::config::{AppCfgHardLimit, AppCfgInitArgs, AppConfig};
use ecommerce_common::constant::env_vars::{CFG_FILEPATH, SERVICE_BASEPATH, SYS_BASEPATH};
use ecommerce_common::error::AppErrorCode;
use ecommerce_common::logging::AppLogContext;

use storefront::adapter::transport::{AbstractHttpTransport, HttpRawResponse, HttpRequestSpec};
use storefront::api::endpoint::EndpointRegistry;
use storefront::api::{AbstractCallInterceptor, AppApiClient};
use storefront::constant::hard_limit;
use storefront::error::AppError;

pub(crate) const EXAMPLE_REL_PATH: &str = "tests/unit/examples/";

pub(crate) fn ut_setup_config(cfg_filename: &str) -> AppConfig {
    let env_var_map = HashMap::from([
        (
            SYS_BASEPATH.to_string(),
            std::env::temp_dir().to_string_lossy().into_owned(),
        ),
        (
            SERVICE_BASEPATH.to_string(),
            env!("CARGO_MANIFEST_DIR").to_string(),
        ),
        (
            CFG_FILEPATH.to_string(),
            EXAMPLE_REL_PATH.to_string() + cfg_filename,
        ),
    ]);
    let limit = AppCfgHardLimit {
        max_timeout_secs: hard_limit::MAX_SECONDS_REQUEST_TIMEOUT,
    };
    let args = AppCfgInitArgs { env_var_map, limit };
    AppConfig::new(args).unwrap()
}

pub(crate) fn ut_setup_logctx() -> Arc<AppLogContext> {
    static GUARD_LOGCTX: OnceLock<Arc<AppLogContext>> = OnceLock::new();
    GUARD_LOGCTX
        .get_or_init(|| {
            let cfg = ut_setup_config("config_ok.json");
            let lc = AppLogContext::new(&cfg.basepath, &cfg.client.logging).unwrap();
            Arc::new(lc)
        })
        .clone()
}

pub(crate) type UtReply = Result<HttpRawResponse, AppError>;

pub(crate) struct MockTransport {
    _replies: Mutex<VecDeque<UtReply>>,
    _requests: Arc<Mutex<Vec<HttpRequestSpec>>>,
}

#[async_trait]
impl AbstractHttpTransport for MockTransport {
    async fn execute(&self, req: HttpRequestSpec) -> Result<HttpRawResponse, AppError> {
        self._requests.lock().unwrap().push(req);
        let mut g = self._replies.lock().unwrap();
        g.pop_front().unwrap()
    }
}

#[derive(Default)]
pub(crate) struct UtCallCounter {
    pub failures: AtomicUsize,
    pub notices: AtomicUsize,
    pub last_failure: Mutex<Option<AppErrorCode>>,
}

struct CountingInterceptor(Arc<UtCallCounter>);

impl AbstractCallInterceptor for CountingInterceptor {
    fn on_failure(&self, _label: &str, error: &AppError) {
        let _ = self.0.failures.fetch_add(1, Ordering::SeqCst);
        *self.0.last_failure.lock().unwrap() = Some(error.code.clone());
    }
    fn on_notice(&self, _label: &str, _detail: &str) {
        let _ = self.0.notices.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) struct UtApiBundle {
    pub client: AppApiClient,
    pub requests: Arc<Mutex<Vec<HttpRequestSpec>>>,
    pub counter: Arc<UtCallCounter>,
}

impl UtApiBundle {
    pub(crate) fn num_failures(&self) -> usize {
        self.counter.failures.load(Ordering::SeqCst)
    }
    pub(crate) fn num_notices(&self) -> usize {
        self.counter.notices.load(Ordering::SeqCst)
    }
    pub(crate) fn sent(&self) -> Vec<HttpRequestSpec> {
        self.requests.lock().unwrap().clone()
    }
    pub(crate) fn sent_body_json(&self, idx: usize) -> serde_json::Value {
        let reqs = self.requests.lock().unwrap();
        let raw = reqs[idx].body.as_ref().unwrap();
        serde_json::from_slice(raw.as_slice()).unwrap()
    }
}

pub(crate) fn ut_setup_api(replies: Vec<UtReply>) -> UtApiBundle {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let counter = Arc::new(UtCallCounter::default());
    let transport: Box<dyn AbstractHttpTransport> = Box::new(MockTransport {
        _replies: Mutex::new(VecDeque::from(replies)),
        _requests: requests.clone(),
    });
    let interceptor: Box<dyn AbstractCallInterceptor> =
        Box::new(CountingInterceptor(counter.clone()));
    let client = AppApiClient::new(
        Arc::new(transport),
        Arc::new(interceptor),
        EndpointRegistry::default(),
    );
    UtApiBundle {
        client,
        requests,
        counter,
    }
}

pub(crate) fn ut_reply(status: u16, body: &str) -> UtReply {
    Ok(HttpRawResponse {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.as_bytes().to_vec(),
    })
}

pub(crate) fn ut_reply_json(status: u16, body: serde_json::Value) -> UtReply {
    ut_reply(status, body.to_string().as_str())
}

pub(crate) fn ut_transport_error() -> UtReply {
    Err(AppError {
        code: AppErrorCode::HttpTransportFailure,
        detail: Some("connection reset".to_string()),
    })
}
