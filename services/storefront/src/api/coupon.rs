use hyper::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use ecommerce_common::error::AppErrorCode;

use super::dto::{CouponDto, ResultEnvelope};
use super::endpoint::ApiDomain;
use super::{ApiRequest, AppApiClient};
use crate::error::AppError;

#[derive(Serialize)]
struct CouponIdQuery {
    id: u64,
}

/// Coupon operations, each returns the inner `data` of the envelope
pub struct CouponApi<'a> {
    client: &'a AppApiClient,
}

impl<'a> CouponApi<'a> {
    pub(super) fn new(client: &'a AppApiClient) -> Self {
        Self { client }
    }

    async fn send_for_data<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T, AppError> {
        let label = req.label();
        let envelope = self.client.send_decoded::<ResultEnvelope<T>>(req).await?;
        envelope.data.ok_or_else(|| {
            let e = AppError {
                code: AppErrorCode::MissingPayload,
                detail: Some(format!("coupon, code:{}", envelope.code)),
            };
            self.client.report_failure(label.as_str(), e)
        })
    }

    pub async fn get_free_coupon(&self, user_id: u64) -> Result<CouponDto, AppError> {
        let resource = format!("/{user_id}");
        let req = ApiRequest::new(Method::POST, ApiDomain::Coupons, resource);
        self.send_for_data(req).await
    }

    pub async fn get_all_coupons(&self, user_id: u64) -> Result<Vec<CouponDto>, AppError> {
        let resource = format!("/all/{user_id}");
        let req = ApiRequest::new(Method::GET, ApiDomain::Coupons, resource);
        self.send_for_data(req).await
    }

    /// the coupon id goes to both query string and body, the backend
    /// reads either of them depending on its version
    pub async fn use_coupon(&self, coupon_id: u64) -> Result<bool, AppError> {
        let q = CouponIdQuery { id: coupon_id };
        let req = ApiRequest::new(Method::POST, ApiDomain::Coupons, "/use")
            .query(&q)
            .json(&q);
        self.send_for_data(req).await
    }
} // end of impl CouponApi
