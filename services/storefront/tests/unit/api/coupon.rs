use hyper::Method;
use rust_decimal::Decimal;
use serde_json::json;

use ecommerce_common::error::AppErrorCode;

use crate::{ut_reply_json, ut_setup_api};

#[tokio::test]
async fn get_all_coupons_inner_data() {
    let body = json!({"code":"000", "data":[
        {"id":1, "userId":3, "discount":0.9, "top":50, "getTime":1718000000000i64, "account":null},
        {"id":2, "userId":3, "discount":0.8, "top":20, "getTime":1718000500000i64, "account":null}
    ]});
    let ut = ut_setup_api(vec![ut_reply_json(200, body)]);
    let coupons = ut.client.coupon().get_all_coupons(3).await.unwrap();
    assert_eq!(coupons.len(), 2);
    assert_eq!(coupons[0].discount, Decimal::new(9, 1));
    assert_eq!(coupons[1].top, Decimal::new(20, 0));
    let sent = ut.sent();
    assert_eq!(sent[0].method, Method::GET);
    assert_eq!(sent[0].path.as_str(), "/api/coupons/all/3");
}

#[tokio::test]
async fn get_free_coupon_without_password() {
    let body = json!({"code":"000", "data": {
        "id":7, "userId":3, "discount":0.95, "top":10, "getTime":1718000000000i64,
        "account": {
            "id":3, "username":"amy", "name":"Amy", "phone":null, "role":"USER",
            "password":"should-not-be-kept", "email":null, "avatar":null, "address":null,
            "vip":1, "expe":20, "recommendTicket":2, "moneyProgress":0.5
        }
    }});
    let ut = ut_setup_api(vec![ut_reply_json(200, body)]);
    let coupon = ut.client.coupon().get_free_coupon(3).await.unwrap();
    assert_eq!(coupon.id, 7);
    let account = coupon.account.unwrap();
    assert_eq!(account.username.as_str(), "amy");
    let reencoded = serde_json::to_value(&account).unwrap();
    assert!(reencoded.get("password").is_none());
    assert_eq!(ut.sent()[0].method, Method::POST);
    assert_eq!(ut.sent()[0].path.as_str(), "/api/coupons/3");
}

#[tokio::test]
async fn use_coupon_query_and_body() {
    let ut = ut_setup_api(vec![ut_reply_json(200, json!({"code":"000","data":true}))]);
    let used = ut.client.coupon().use_coupon(7).await.unwrap();
    assert!(used);
    assert_eq!(ut.sent()[0].path.as_str(), "/api/coupons/use?id=7");
    assert_eq!(ut.sent_body_json(0), json!({"id":7}));
}

#[tokio::test]
async fn missing_inner_data() {
    let ut = ut_setup_api(vec![ut_reply_json(200, json!({"code":"400","msg":"none left"}))]);
    let error = ut.client.coupon().get_free_coupon(3).await.unwrap_err();
    assert_eq!(error.code, AppErrorCode::MissingPayload);
    assert_eq!(ut.num_failures(), 1);
}
