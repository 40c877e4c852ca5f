use hyper::Method;
use serde::Serialize;

use super::dto::{AccountUpdateDto, LoginInfoDto, RegisterInfoDto};
use super::endpoint::ApiDomain;
use super::{ApiRequest, ApiResponse, AppApiClient};
use crate::error::AppError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TicketGetQuery {
    user_id: u64,
    num: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TicketUseQuery {
    user_id: u64,
    product_id: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentMakeQuery<'a> {
    user_id: u64,
    product_id: u64,
    content: &'a str,
    rate: f64,
}

#[derive(Serialize)]
struct CommentUpdateQuery<'a> {
    id: u64,
    content: &'a str,
    rate: f64,
}

#[derive(Serialize)]
struct IdQuery {
    id: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserIdQuery {
    user_id: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VipQuery<'a> {
    amount: &'a str,
    user_id: u64,
}

/// Account operations, each returns the whole response envelope
pub struct AccountApi<'a> {
    client: &'a AppApiClient,
}

impl<'a> AccountApi<'a> {
    pub(super) fn new(client: &'a AppApiClient) -> Self {
        Self { client }
    }

    fn request(method: Method, resource: &str) -> ApiRequest {
        ApiRequest::new(method, ApiDomain::Accounts, resource)
    }

    pub async fn login(&self, info: &LoginInfoDto) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::POST, "/login").json(info);
        self.client.send(req).await
    }

    pub async fn register(&self, info: &RegisterInfoDto) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::POST, "").json(info);
        self.client.send(req).await
    }

    pub async fn user_info(&self, username: &str) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::GET, format!("/{username}").as_str());
        self.client.send(req).await
    }

    pub async fn update_info(&self, info: &AccountUpdateDto) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::PUT, "").json(info);
        self.client.send(req).await
    }

    pub async fn get_recommend_ticket(
        &self,
        user_id: u64,
        num: u32,
    ) -> Result<ApiResponse, AppError> {
        let query = TicketGetQuery { user_id, num };
        let req = Self::request(Method::POST, "/ticket/get").query(&query);
        self.client.send(req).await
    }

    pub async fn use_recommend_ticket(
        &self,
        user_id: u64,
        product_id: u64,
    ) -> Result<ApiResponse, AppError> {
        let q = TicketUseQuery {
            user_id,
            product_id,
        };
        let req = Self::request(Method::POST, "/ticket/use").query(&q);
        self.client.send(req).await
    }

    pub async fn make_comment(
        &self,
        user_id: u64,
        product_id: u64,
        content: &str,
        rate: f64,
    ) -> Result<ApiResponse, AppError> {
        let q = CommentMakeQuery {
            user_id,
            product_id,
            content,
            rate,
        };
        let req = Self::request(Method::POST, "/comment/make").query(&q);
        self.client.send(req).await
    }

    pub async fn delete_comment(&self, id: u64) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::POST, "/comment/delete").query(&IdQuery { id });
        self.client.send(req).await
    }

    pub async fn get_all_comments(&self, user_id: u64) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::GET, "/comment").query(&UserIdQuery { user_id });
        self.client.send(req).await
    }

    // the backend exposes comment update as GET
    pub async fn update_comment(
        &self,
        id: u64,
        content: &str,
        rate: f64,
    ) -> Result<ApiResponse, AppError> {
        let q = CommentUpdateQuery { id, content, rate };
        let req = Self::request(Method::GET, "/comment/update").query(&q);
        self.client.send(req).await
    }

    pub async fn update_vip(&self, amount: &str, user_id: u64) -> Result<ApiResponse, AppError> {
        let req = Self::request(Method::POST, "/vip").query(&VipQuery { amount, user_id });
        self.client.send(req).await
    }
} // end of impl AccountApi
