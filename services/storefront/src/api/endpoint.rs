use std::fmt::{Display, Formatter, Result as FmtResult};

use ecommerce_common::WebApiPath;

pub const DEFAULT_API_ROOT: &str = "/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiDomain {
    Accounts,
    Products,
    Cart,
    Orders,
    Advertisements,
    Coupons,
    Recommend,
}

impl ApiDomain {
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Products => "products",
            Self::Cart => "cart",
            Self::Orders => "orders",
            Self::Advertisements => "advertisements",
            Self::Coupons => "coupons",
            Self::Recommend => "recommend",
        }
    }
}

impl Display for ApiDomain {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.segment())
    }
}

/// Path prefixes of all backend resource domains, composed from a single
/// API root
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    root: WebApiPath,
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_API_ROOT)
    }
}

impl EndpointRegistry {
    pub fn new(api_root: &str) -> Self {
        let root = api_root.trim_end_matches('/').to_string();
        Self { root }
    }

    pub fn root(&self) -> &str {
        self.root.as_str()
    }

    pub fn prefix(&self, domain: ApiDomain) -> WebApiPath {
        format!("{}/{}", self.root, domain.segment())
    }
}
