use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value as JsnVal;

use crate::api::dto::OrderBackendDto;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethodModel {
    WechatPay,
    CreditCard,
    Alipay,
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayStatusModel {
    WaitBuyerPay,
    TradeSuccess,
    TradeClosed,
    Unknown(String),
}

impl From<&str> for PaymentMethodModel {
    fn from(value: &str) -> Self {
        match value {
            "WECHATPAY" => Self::WechatPay,
            "CREDITCARD" => Self::CreditCard,
            "ALIPAY" => Self::Alipay,
            _others => Self::Unknown(value.to_string()),
        }
    }
}

impl From<&str> for PayStatusModel {
    fn from(value: &str) -> Self {
        match value {
            "WAIT_BUYER_PAY" => Self::WaitBuyerPay,
            "TRADE_SUCCESS" => Self::TradeSuccess,
            "TRADE_CLOSED" => Self::TradeClosed,
            _others => Self::Unknown(value.to_string()),
        }
    }
}

impl PaymentMethodModel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::WechatPay => "微信支付",
            Self::CreditCard => "信用卡支付",
            Self::Alipay => "支付宝支付",
            Self::Unknown(_) => "未知支付方式",
        }
    }
}

impl PayStatusModel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::WaitBuyerPay => "等待买家付款",
            Self::TradeSuccess => "交易成功",
            Self::TradeClosed => "交易关闭",
            Self::Unknown(_) => "未知状态",
        }
    }
}

/// Display label of a backend payment-method code, codes added to the
/// backend later fall back to the unknown label.
pub fn map_payment_method(code: &str) -> &'static str {
    PaymentMethodModel::from(code).label()
}

pub fn map_pay_status(code: &str) -> &'static str {
    PayStatusModel::from(code).label()
}

/// Order as presented to views, labels already mapped from backend codes
#[derive(Debug, Clone, PartialEq)]
pub struct OrderModel {
    pub id: u64,
    pub user_id: u64,
    pub payment_method: String,
    pub status: String,
    pub total_price: Decimal,
    // absent when the backend sends a timestamp this client cannot read
    pub created_at: Option<DateTime<FixedOffset>>,
    pub cart_item_ids: Vec<u64>,
}

impl From<OrderBackendDto> for OrderModel {
    fn from(value: OrderBackendDto) -> Self {
        let OrderBackendDto {
            id,
            user_id,
            payment_method,
            status,
            total_amount,
            create_time,
            items_id,
        } = value;
        Self {
            id,
            user_id,
            payment_method: map_payment_method(payment_method.as_str()).to_string(),
            status: map_pay_status(status.as_str()).to_string(),
            total_price: total_amount,
            created_at: create_time.as_ref().and_then(parse_create_time),
            cart_item_ids: items_id,
        }
    }
}

/// The backend sends either epoch milliseconds or a date-time string,
/// strings without offset are taken as UTC.
pub fn parse_create_time(raw: &JsnVal) -> Option<DateTime<FixedOffset>> {
    match raw {
        JsnVal::Number(n) => {
            let millis = n.as_i64()?;
            Utc.timestamp_millis_opt(millis)
                .single()
                .map(|t| t.fixed_offset())
        }
        JsnVal::String(s) => DateTime::parse_from_rfc3339(s.as_str())
            .ok()
            .or_else(|| {
                ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                    .into_iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s.as_str(), fmt).ok())
                    .map(|naive| naive.and_utc().fixed_offset())
            }),
        _others => None,
    }
}
