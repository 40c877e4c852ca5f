use std::fmt::{Debug, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum AppErrorCode {
    MissingSysBasePath,
    MissingAppBasePath,
    MissingConfigPath,
    InvalidJsonFormat,
    InvalidBackendCfg,
    InvalidNavigationCfg,
    MissingAliasLogHdlerCfg,
    MissingAliasLoggerCfg,
    NoLogHandlerCfg,
    NoLoggerCfg,
    NoHandlerInLoggerCfg,
    InvalidHandlerLoggerCfg,
    ExceedingMaxLimit,
    InvalidInput, // for malformed arguments given by the caller
    InvalidRoutePattern,
    RedirectLoop,
    CryptoFailure,
    HttpHandshakeFailure,
    HttpTransportFailure,
    HttpTimeout,
    HttpNonSuccessStatus(u16),
    MissingPayload,
    DataCorruption,
    IOerror(std::io::ErrorKind),
} // end of AppErrorCode

pub struct AppCfgError {
    pub code: AppErrorCode,
    pub detail: Option<String>,
}

impl Debug for AppCfgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let detail = self.detail.as_deref().unwrap_or("none");
        write!(f, "code:{:?}, detail:{}", self.code, detail)
    }
}

impl Display for AppCfgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}
