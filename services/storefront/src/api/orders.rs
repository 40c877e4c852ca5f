use hyper::Method;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsnVal;

use ecommerce_common::error::AppErrorCode;

use super::dto::{OrderBackendDto, OrderCreateReqDto, ResultEnvelope};
use super::endpoint::ApiDomain;
use super::{ApiRequest, AppApiClient};
use crate::adapter::browsing::AbstractBrowsingContext;
use crate::error::AppError;
use crate::model::OrderModel;

pub const MSG_ORDER_DETAIL_NOT_FOUND: &str = "No order details found for the given user ID.";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderIdQuery {
    order_id: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserIdQuery {
    user_id: u64,
}

/// What happened to the payment page returned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayOrderOutcome {
    /// the page was written to a new browsing window and its form submitted
    Submitted,
    ContextOpenFailed,
    /// the page has no form, the window was closed
    FormMissing,
}

pub struct OrderApi<'a> {
    client: &'a AppApiClient,
}

impl<'a> OrderApi<'a> {
    pub(super) fn new(client: &'a AppApiClient) -> Self {
        Self { client }
    }

    fn request(method: Method, resource: &str) -> ApiRequest {
        ApiRequest::new(method, ApiDomain::Orders, resource)
    }

    pub async fn create_order(
        &self,
        user_id: u64,
        cart_item_ids: Vec<u64>,
        payment_method: &str,
        total_price: Decimal,
    ) -> Result<ResultEnvelope<OrderBackendDto>, AppError> {
        let body = OrderCreateReqDto {
            user_id,
            items_id: cart_item_ids,
            payment_method: payment_method.to_string(),
            total_amount: total_price,
        };
        let req = Self::request(Method::POST, "/create").json(&body);
        self.client.send_decoded(req).await
    }

    /// Fetch the payment page of an order and submit it in a new browsing
    /// window. Failures of the browsing environment are returned as
    /// outcome, only transport failures are errors.
    pub async fn pay_order(
        &self,
        order_id: u64,
        browsing: &dyn AbstractBrowsingContext,
    ) -> Result<PayOrderOutcome, AppError> {
        let req = Self::request(Method::POST, "/pay")
            .query(&OrderIdQuery { order_id })
            .accept_text();
        let label = req.label();
        let page = self.client.send(req).await?.text();

        let mut window = match browsing.open_window().await {
            Some(w) => w,
            None => {
                let detail = format!("order:{order_id}, failed to open browsing window");
                self.client.interceptor().on_notice(label.as_str(), detail.as_str());
                return Ok(PayOrderOutcome::ContextOpenFailed);
            }
        };
        window.write_document(page.as_str());
        let submitted = window
            .submit_first_form()
            .await
            .map_err(|e| self.client.report_failure(label.as_str(), e))?;
        if submitted {
            Ok(PayOrderOutcome::Submitted)
        } else {
            let detail = format!("order:{order_id}, form not found in payment page");
            self.client.interceptor().on_notice(label.as_str(), detail.as_str());
            window.close();
            Ok(PayOrderOutcome::FormMissing)
        }
    } // end of fn pay_order

    pub async fn handle_alipay_notify(&self, params: &JsnVal) -> Result<JsnVal, AppError> {
        let req = Self::request(Method::POST, "/notify").json(params);
        self.client.send_value(req).await
    }

    /// Order of the given user with payment method and status mapped to
    /// display labels
    pub async fn get_order_details(&self, user_id: u64) -> Result<OrderModel, AppError> {
        let req = Self::request(Method::GET, "/showOrder").query(&UserIdQuery { user_id });
        let label = req.label();
        let envelope = self
            .client
            .send_decoded::<ResultEnvelope<OrderBackendDto>>(req)
            .await?;
        match envelope.data {
            Some(d) => Ok(OrderModel::from(d)),
            None => {
                let e = AppError {
                    code: AppErrorCode::MissingPayload,
                    detail: Some(MSG_ORDER_DETAIL_NOT_FOUND.to_string()),
                };
                Err(self.client.report_failure(label.as_str(), e))
            }
        }
    }
} // end of impl OrderApi
