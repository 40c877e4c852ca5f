use hyper::Method;
use serde::Serialize;
use serde_json::Value as JsnVal;

use super::dto::{AdvertisementCreateDto, AdvertisementDto};
use super::endpoint::ApiDomain;
use super::{ApiRequest, AppApiClient};
use crate::error::AppError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdvIdQuery {
    adv_id: u64,
}

pub struct AdvertisementApi<'a> {
    client: &'a AppApiClient,
}

impl<'a> AdvertisementApi<'a> {
    pub(super) fn new(client: &'a AppApiClient) -> Self {
        Self { client }
    }

    fn request(method: Method, resource: &str) -> ApiRequest {
        ApiRequest::new(method, ApiDomain::Advertisements, resource)
    }

    pub async fn get_all_advertisements(&self) -> Result<JsnVal, AppError> {
        self.client.send_value(Self::request(Method::GET, "")).await
    }

    pub async fn get_single_advertisement(&self, adv_id: u64) -> Result<JsnVal, AppError> {
        let req = Self::request(Method::GET, "/single").query(&AdvIdQuery { adv_id });
        self.client.send_value(req).await
    }

    pub async fn update_advertisement(&self, info: &AdvertisementDto) -> Result<JsnVal, AppError> {
        let req = Self::request(Method::PUT, "").json(info);
        self.client.send_value(req).await
    }

    pub async fn create_advertisement(
        &self,
        info: &AdvertisementCreateDto,
    ) -> Result<JsnVal, AppError> {
        let req = Self::request(Method::POST, "").json(info);
        self.client.send_value(req).await
    }

    pub async fn delete_advertisement(&self, adv_id: u64) -> Result<JsnVal, AppError> {
        let req = Self::request(Method::DELETE, "").query(&AdvIdQuery { adv_id });
        self.client.send_value(req).await
    }
}
