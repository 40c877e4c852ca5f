use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsnVal;

/// Common envelope of backend replies, the actual payload sits in `data`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ResultEnvelope<T> {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

// ---- account ----

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct LoginInfoDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInfoDto {
    pub role: String,
    pub username: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub vip: u32,
    pub recommend_ticket: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct AccountUpdateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ---- product ----

#[rustfmt::skip]
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductTagDto {
    #[serde(rename = "小说")] Novel,
    #[serde(rename = "文学")] Literature,
    #[serde(rename = "艺术")] Art,
    #[serde(rename = "历史")] History,
    #[serde(rename = "哲学")] Philosophy,
    #[serde(rename = "心理")] Psychology,
    #[serde(rename = "文化")] Culture,
    #[serde(rename = "教辅")] Textbook,
    #[serde(rename = "其他")] Other,
}

/// specification entry given by the seller when creating a product
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SpecItemDto {
    pub item: String,
    pub value: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationDto {
    pub id: u64,
    pub item: String,
    pub value: String,
    pub product_id: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockpileDto {
    pub id: u64,
    pub amount: u32,
    pub frozen: u32,
    pub product_id: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: u64,
    pub content: String,
    pub rate: f64,
    pub product_id: u64,
    pub user_id: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: u64,
    pub title: String,
    pub price: Decimal,
    pub rate: f64,
    #[serde(default)]
    pub comment_num: u32,
    pub description: Option<String>,
    pub cover: Option<String>,
    pub detail: Option<String>,
    pub specifications: Option<Vec<SpecificationDto>>,
    pub stockpile: Option<StockpileDto>,
    pub recommend_ticket: Option<u32>,
    pub tag: Option<ProductTagDto>,
    pub comments: Option<Vec<CommentDto>>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProductUpdateDto {
    pub id: u64,
    pub title: String,
    pub price: Decimal,
    pub rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Vec<SpecificationDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stockpile: Option<StockpileDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<ProductTagDto>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ProductCreateDto {
    pub title: String,
    pub price: Decimal,
    pub rate: f64,
    pub description: String,
    pub cover: String,
    pub detail: String,
    pub specifications: Vec<SpecItemDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<ProductTagDto>,
}

// ---- cart ----

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    pub cart_id: u64,
    pub user_id: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub item_id: u64,
    pub product_id: u64,
    pub quantity: u32,
    pub cart_id: u64,
}

// ---- coupon ----

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponAccountDto {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub address: Option<String>,
    pub vip: u32,
    pub expe: u32,
    pub recommend_ticket: u32,
    pub money_progress: f64,
} // the backend also echoes `password` here, it is dropped on purpose

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponDto {
    pub id: u64,
    pub user_id: u64,
    pub discount: Decimal,
    pub top: Decimal,
    pub get_time: i64,
    pub account: Option<CouponAccountDto>,
}

// ---- advertisement ----

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisementDto {
    pub adv_id: u64,
    pub title: String,
    pub content: String,
    pub adv_url: String,
    pub product_id: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisementCreateDto {
    pub title: String,
    pub content: String,
    pub adv_url: String,
    pub product_id: u64,
}

// ---- orders ----

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OrderCreateReqDto {
    #[serde(rename = "userId")]
    pub user_id: u64,
    #[serde(rename = "itemsId")]
    pub items_id: Vec<u64>,
    pub payment_method: String,
    pub total_amount: Decimal,
}

/// Order record as sent by the backend, field names follow the backend
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OrderBackendDto {
    pub id: u64,
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub payment_method: String,
    pub status: String,
    pub total_amount: Decimal,
    #[serde(default)]
    pub create_time: Option<JsnVal>,
    #[serde(rename = "itemsId", default)]
    pub items_id: Vec<u64>,
}
