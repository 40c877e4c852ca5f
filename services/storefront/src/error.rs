use std::fmt::{Debug, Display};

use ecommerce_common::error::{AppCfgError, AppErrorCode};

#[derive(Debug, Clone, PartialEq)]
pub struct AppError {
    pub code: AppErrorCode,
    pub detail: Option<String>,
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let default_detail = "none";
        let dp = if let Some(s) = &self.detail {
            s.as_str()
        } else {
            default_detail
        };
        write!(f, "code:{:?}, detail:{}", self.code, dp)
    }
}

impl std::error::Error for AppError {}

impl From<AppCfgError> for AppError {
    fn from(value: AppCfgError) -> Self {
        AppError {
            code: value.code,
            detail: value.detail,
        }
    }
}
impl From<(AppErrorCode, String)> for AppError {
    fn from(value: (AppErrorCode, String)) -> Self {
        AppError {
            code: value.0,
            detail: Some(value.1),
        }
    }
}
impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError {
            code: AppErrorCode::InvalidJsonFormat,
            detail: Some(value.to_string()),
        }
    }
}
impl From<serde_qs::Error> for AppError {
    fn from(value: serde_qs::Error) -> Self {
        AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some(value.to_string()),
        }
    }
}
impl From<serde_urlencoded::ser::Error> for AppError {
    fn from(value: serde_urlencoded::ser::Error) -> Self {
        AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some(value.to_string()),
        }
    }
}
