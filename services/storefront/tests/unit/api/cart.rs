use hyper::Method;
use serde_json::json;

use ecommerce_common::error::AppErrorCode;
use storefront::api::dto::CartItemDto;

use crate::{ut_reply_json, ut_setup_api, ut_transport_error};

#[tokio::test]
async fn cart_item_ops_query() {
    let replies = (0..3)
        .map(|_| ut_reply_json(200, json!({"code":"000"})))
        .collect::<Vec<_>>();
    let ut = ut_setup_api(replies);
    let api = ut.client.cart();
    let _ = api.add_product_to_cart(3, 17, 2).await.unwrap();
    let _ = api.delete_cart_item(3, 55).await.unwrap();
    let _ = api.change_cart_item_quantity(3, 55, 4).await.unwrap();
    let sent = ut.sent();
    assert_eq!(sent[0].method, Method::POST);
    assert_eq!(sent[0].path.as_str(), "/api/cart?userId=3&productId=17&quantity=2");
    assert_eq!(sent[1].method, Method::DELETE);
    assert_eq!(sent[1].path.as_str(), "/api/cart?userId=3&cart_item_id=55");
    assert_eq!(sent[2].method, Method::PATCH);
    assert_eq!(
        sent[2].path.as_str(),
        "/api/cart/quantity?userId=3&cart_item_id=55&quantity=4"
    );
}

#[tokio::test]
async fn get_all_items_ok() {
    let body = json!({"code":"000", "data":[
        {"itemId":55, "productId":17, "quantity":2, "cartId":8}
    ]});
    let ut = ut_setup_api(vec![ut_reply_json(200, body)]);
    let value = ut.client.cart().get_all_cart_items(8).await.unwrap();
    let items = serde_json::from_value::<Vec<CartItemDto>>(value["data"].clone()).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_id, 55);
    assert_eq!(ut.sent()[0].path.as_str(), "/api/cart/getAll?cartId=8");
}

#[tokio::test]
async fn get_cart_rejected() {
    let ut = ut_setup_api(vec![ut_transport_error()]);
    let error = ut.client.cart().get_cart(3).await.unwrap_err();
    assert_eq!(error.code, AppErrorCode::HttpTransportFailure);
    assert_eq!(ut.num_failures(), 1);
    assert_eq!(ut.sent()[0].path.as_str(), "/api/cart?userId=3");
}
