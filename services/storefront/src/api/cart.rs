use hyper::Method;
use serde::Serialize;
use serde_json::Value as JsnVal;

use super::endpoint::ApiDomain;
use super::{ApiRequest, AppApiClient};
use crate::error::AppError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserIdQuery {
    user_id: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddProductQuery {
    user_id: u64,
    product_id: u64,
    quantity: u32,
}

// the backend reads the item id in snake case, unlike the other parameters
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartItemQuery {
    user_id: u64,
    #[serde(rename = "cart_item_id")]
    cart_item_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartIdQuery {
    cart_id: u64,
}

/// Cart operations, each returns the decoded response body
pub struct CartApi<'a> {
    client: &'a AppApiClient,
}

impl<'a> CartApi<'a> {
    pub(super) fn new(client: &'a AppApiClient) -> Self {
        Self { client }
    }

    fn request(method: Method, resource: &str) -> ApiRequest {
        ApiRequest::new(method, ApiDomain::Cart, resource)
    }

    pub async fn get_cart(&self, user_id: u64) -> Result<JsnVal, AppError> {
        let req = Self::request(Method::GET, "").query(&UserIdQuery { user_id });
        self.client.send_value(req).await
    }

    pub async fn add_product_to_cart(
        &self,
        user_id: u64,
        product_id: u64,
        quantity: u32,
    ) -> Result<JsnVal, AppError> {
        let q = AddProductQuery {
            user_id,
            product_id,
            quantity,
        };
        let req = Self::request(Method::POST, "").query(&q);
        self.client.send_value(req).await
    }

    pub async fn delete_cart_item(
        &self,
        user_id: u64,
        cart_item_id: u64,
    ) -> Result<JsnVal, AppError> {
        let q = CartItemQuery {
            user_id,
            cart_item_id,
            quantity: None,
        };
        let req = Self::request(Method::DELETE, "").query(&q);
        self.client.send_value(req).await
    }

    pub async fn change_cart_item_quantity(
        &self,
        user_id: u64,
        cart_item_id: u64,
        quantity: u32,
    ) -> Result<JsnVal, AppError> {
        let q = CartItemQuery {
            user_id,
            cart_item_id,
            quantity: Some(quantity),
        };
        let req = Self::request(Method::PATCH, "/quantity").query(&q);
        self.client.send_value(req).await
    }

    pub async fn get_all_cart_items(&self, cart_id: u64) -> Result<JsnVal, AppError> {
        let req = Self::request(Method::GET, "/getAll").query(&CartIdQuery { cart_id });
        self.client.send_value(req).await
    }
} // end of impl CartApi
