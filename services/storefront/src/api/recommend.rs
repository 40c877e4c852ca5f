use hyper::Method;

use super::endpoint::ApiDomain;
use super::{ApiRequest, ApiResponse, AppApiClient};
use crate::error::AppError;

pub struct RecommendApi<'a> {
    client: &'a AppApiClient,
}

impl<'a> RecommendApi<'a> {
    pub(super) fn new(client: &'a AppApiClient) -> Self {
        Self { client }
    }

    pub async fn get_everyday_recommend(&self) -> Result<ApiResponse, AppError> {
        let req = ApiRequest::new(Method::GET, ApiDomain::Recommend, "");
        self.client.send(req).await
    }
}
