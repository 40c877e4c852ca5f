use hyper::Method;
use serde::Serialize;
use serde_json::Value as JsnVal;

use super::dto::{ProductCreateDto, ProductTagDto, ProductUpdateDto, StockpileDto};
use super::endpoint::ApiDomain;
use super::{ApiRequest, ApiResponse, AppApiClient};
use crate::error::AppError;

#[derive(Serialize)]
struct NameQuery<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct TagQuery {
    tag: ProductTagDto,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductIdQuery {
    product_id: u64,
}

pub struct ProductApi<'a> {
    client: &'a AppApiClient,
}

impl<'a> ProductApi<'a> {
    pub(super) fn new(client: &'a AppApiClient) -> Self {
        Self { client }
    }

    fn request(method: Method, resource: &str) -> ApiRequest {
        ApiRequest::new(method, ApiDomain::Products, resource)
    }

    pub async fn create_product(&self, info: &ProductCreateDto) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::POST, "/").json(info);
        self.client.send(req).await
    }

    /// returns decoded body instead of the envelope
    pub async fn update_product(&self, info: &ProductUpdateDto) -> Result<JsnVal, AppError> {
        let req = Self::request(Method::PUT, "/").json(info);
        self.client.send_value(req).await
    }

    pub async fn get_all_products(&self) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::GET, "");
        self.client.send(req).await
    }

    pub async fn get_one_product(&self, id: u64) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::GET, format!("/{id}").as_str());
        self.client.send(req).await
    }

    pub async fn update_amount(
        &self,
        id: u64,
        stockpile: &StockpileDto,
    ) -> Result<ApiResponse, AppError> {
        let resource = format!("/stockpile/{id}");
        let req = Self::request(Method::PATCH, resource.as_str()).json(stockpile);
        self.client.send(req).await
    }

    pub async fn get_one_product_amount(&self, id: u64) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::GET, format!("/stockpile/{id}").as_str());
        self.client.send(req).await
    }

    pub async fn delete_product(&self, id: u64) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::DELETE, format!("/{id}").as_str());
        self.client.send(req).await
    }

    pub async fn search_name(&self, name: &str) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::GET, "/search").query(&NameQuery { name });
        self.client.send(req).await
    }

    /// the tag is sent as its display label
    pub async fn search_by_tag(&self, tag: ProductTagDto) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::GET, "/tag").query(&TagQuery { tag });
        self.client.send(req).await
    }

    pub async fn get_product_comments(&self, product_id: u64) -> Result<JsnVal, AppError> {
        let req = Self::request(Method::GET, "/comment").query(&ProductIdQuery { product_id });
        self.client.send_value(req).await
    }
} // end of impl ProductApi
