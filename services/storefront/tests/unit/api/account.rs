use hyper::Method;
use serde_json::json;

use ecommerce_common::error::AppErrorCode;
use storefront::api::dto::{AccountUpdateDto, LoginInfoDto, RegisterInfoDto};

use crate::{ut_reply, ut_reply_json, ut_setup_api, ut_transport_error};

#[tokio::test]
async fn login_ok() {
    let body = json!({"code":"000", "data":"jwt-token"});
    let ut = ut_setup_api(vec![ut_reply_json(200, body)]);
    let info = LoginInfoDto {
        username: "amy".to_string(),
        password: "s3cret".to_string(),
        ..Default::default()
    };
    let resp = ut.client.account().login(&info).await.unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.value().unwrap()["data"], json!("jwt-token"));
    let sent = ut.sent();
    assert_eq!(sent[0].method, Method::POST);
    assert_eq!(sent[0].path.as_str(), "/api/accounts/login");
    // absent optional fields are not sent at all
    assert_eq!(
        ut.sent_body_json(0),
        json!({"username":"amy", "password":"s3cret"})
    );
}

#[tokio::test]
async fn register_camelcase_body() {
    let ut = ut_setup_api(vec![ut_reply_json(200, json!({"code":"000"}))]);
    let info = RegisterInfoDto {
        role: "USER".to_string(),
        username: "bob".to_string(),
        name: "Bob".to_string(),
        phone: None,
        password: "pw".to_string(),
        address: None,
        avatar: None,
        email: Some("bob@example.org".to_string()),
        vip: 0,
        recommend_ticket: 3,
    };
    let _resp = ut.client.account().register(&info).await.unwrap();
    let sent = ut.sent();
    assert_eq!(sent[0].path.as_str(), "/api/accounts");
    let body = ut.sent_body_json(0);
    assert_eq!(body["recommendTicket"], json!(3));
    assert_eq!(body["email"], json!("bob@example.org"));
    assert!(body.get("phone").is_none());
}

#[tokio::test]
async fn query_params_ok() {
    let replies = (0..4)
        .map(|_| ut_reply_json(200, json!({"code":"000"})))
        .collect::<Vec<_>>();
    let ut = ut_setup_api(replies);
    let api = ut.client.account();
    let _ = api.get_recommend_ticket(12, 2).await.unwrap();
    let _ = api.make_comment(12, 7, "nice", 4.5).await.unwrap();
    let _ = api.update_comment(88, "ok", 3.5).await.unwrap();
    let _ = api.update_vip("100", 12).await.unwrap();
    let sent = ut.sent();
    assert_eq!(sent[0].method, Method::POST);
    assert_eq!(sent[0].path.as_str(), "/api/accounts/ticket/get?userId=12&num=2");
    assert_eq!(
        sent[1].path.as_str(),
        "/api/accounts/comment/make?userId=12&productId=7&content=nice&rate=4.5"
    );
    assert_eq!(sent[2].method, Method::GET);
    assert_eq!(sent[2].path.as_str(), "/api/accounts/comment/update?id=88&content=ok&rate=3.5");
    assert_eq!(sent[3].path.as_str(), "/api/accounts/vip?amount=100&userId=12");
    assert!(sent.iter().all(|r| r.body.is_none()));
}

#[tokio::test]
async fn user_info_transport_failure() {
    let ut = ut_setup_api(vec![ut_transport_error()]);
    let error = ut.client.account().user_info("amy").await.unwrap_err();
    assert_eq!(error.code, AppErrorCode::HttpTransportFailure);
    assert_eq!(ut.sent()[0].path.as_str(), "/api/accounts/amy");
    assert_eq!(ut.num_failures(), 1);
}

#[tokio::test]
async fn update_info_partial_body() {
    let body = json!({"code":"000", "data":{"username":"amy","phone":"0912"}});
    let ut = ut_setup_api(vec![ut_reply_json(200, body.clone()), ut_reply(401, "")]);
    let api = ut.client.account();
    let info = AccountUpdateDto {
        phone: Some("0912".to_string()),
        ..Default::default()
    };
    let resp = api.update_info(&info).await.unwrap();
    assert_eq!(resp.value().unwrap(), body);
    let error = api.update_info(&info).await.unwrap_err();
    assert_eq!(error.code, AppErrorCode::HttpNonSuccessStatus(401));
    let sent = ut.sent();
    assert_eq!(sent[0].method, Method::PUT);
    assert_eq!(sent[0].path.as_str(), "/api/accounts");
    assert_eq!(ut.sent_body_json(0), json!({"phone":"0912"}));
    assert_eq!(ut.num_failures(), 1);
}

#[tokio::test]
async fn ticket_use_and_comment_ops() {
    let replies = vec![
        ut_reply_json(200, json!({"code":"000","data":true})),
        ut_reply_json(200, json!({"code":"000"})),
        ut_reply_json(200, json!({"code":"000","data":[{"id":4,"content":"ok"}]})),
    ];
    let ut = ut_setup_api(replies);
    let api = ut.client.account();
    let resp = api.use_recommend_ticket(12, 7).await.unwrap();
    assert_eq!(resp.value().unwrap()["data"], json!(true));
    let resp = api.delete_comment(4).await.unwrap();
    assert_eq!(resp.value().unwrap(), json!({"code":"000"}));
    let resp = api.get_all_comments(12).await.unwrap();
    assert_eq!(resp.value().unwrap()["data"][0]["id"], json!(4));
    let sent = ut.sent();
    assert_eq!(sent[0].method, Method::POST);
    assert_eq!(sent[0].path.as_str(), "/api/accounts/ticket/use?userId=12&productId=7");
    assert_eq!(sent[1].method, Method::POST);
    assert_eq!(sent[1].path.as_str(), "/api/accounts/comment/delete?id=4");
    assert_eq!(sent[2].method, Method::GET);
    assert_eq!(sent[2].path.as_str(), "/api/accounts/comment?userId=12");
    assert!(sent.iter().all(|r| r.body.is_none()));
    assert_eq!(ut.num_failures(), 0);
}

#[tokio::test]
async fn ticket_use_and_comment_ops_rejected() {
    let replies = vec![
        ut_reply(400, "no ticket left"),
        ut_transport_error(),
        ut_reply(500, ""),
    ];
    let ut = ut_setup_api(replies);
    let api = ut.client.account();
    let error = api.use_recommend_ticket(12, 7).await.unwrap_err();
    assert_eq!(error.code, AppErrorCode::HttpNonSuccessStatus(400));
    assert_eq!(ut.num_failures(), 1);
    let error = api.delete_comment(4).await.unwrap_err();
    assert_eq!(error.code, AppErrorCode::HttpTransportFailure);
    assert_eq!(ut.num_failures(), 2);
    let error = api.get_all_comments(12).await.unwrap_err();
    assert_eq!(error.code, AppErrorCode::HttpNonSuccessStatus(500));
    assert_eq!(ut.num_failures(), 3);
}
