use std::sync::Arc;

use hyper::{Method, StatusCode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use ecommerce_common::config::AppBackendCfg;
use ecommerce_common::error::AppErrorCode;

use storefront::adapter::browsing::{AbstractBrowsingContext, FormRelayContext};
use storefront::adapter::transport::{AbstractHttpTransport, AppHttpTransport, HttpRequestSpec};

use super::ut_setup_logctx;

fn ut_backend_cfg(port: u16, timeout_secs: u16) -> Arc<AppBackendCfg> {
    Arc::new(AppBackendCfg {
        host: "127.0.0.1".to_string(),
        port,
        secure: false,
        api_root: "/api".to_string(),
        timeout_secs,
    })
}

// read one request with optional body, content length is the only framing
// the clients in this crate use
async fn ut_read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = stream.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&raw).into_owned();
        if let Some(hdr_end) = text.find("\r\n\r\n") {
            let body_len = text[..hdr_end]
                .lines()
                .find_map(|l| {
                    let (k, v) = l.split_once(':')?;
                    if k.eq_ignore_ascii_case("content-length") {
                        v.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if raw.len() >= hdr_end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&raw).into_owned()
}

async fn ut_spawn_server(reply: &'static str) -> (u16, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = oneshot::channel();
    let _handle = tokio::spawn(async move {
        let (mut stream, _addr) = listener.accept().await.unwrap();
        let req = ut_read_request(&mut stream).await;
        stream.write_all(reply.as_bytes()).await.unwrap();
        stream.flush().await.unwrap();
        let _ = tx.send(req);
    });
    (port, rx)
}

#[tokio::test]
async fn transport_roundtrip_ok() {
    let reply = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 14\r\n\r\n{\"code\":\"000\"}";
    let (port, rx) = ut_spawn_server(reply).await;
    let transport = AppHttpTransport::new(ut_backend_cfg(port, 5), ut_setup_logctx());
    let req = HttpRequestSpec {
        method: Method::GET,
        path: "/api/recommend".to_string(),
        headers: Vec::new(),
        body: None,
    };
    let resp = transport.execute(req).await.unwrap();
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body.as_slice(), b"{\"code\":\"000\"}");
    let received = rx.await.unwrap();
    assert!(received.starts_with("GET /api/recommend HTTP/1.1\r\n"));
    let expect_host = format!("host: 127.0.0.1:{port}");
    assert!(received.to_lowercase().contains(expect_host.as_str()));
}

#[tokio::test]
async fn transport_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let _handle = tokio::spawn(async move {
        let (stream, _addr) = listener.accept().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(4)).await;
        drop(stream);
    });
    let transport = AppHttpTransport::new(ut_backend_cfg(port, 1), ut_setup_logctx());
    let req = HttpRequestSpec {
        method: Method::GET,
        path: "/api/recommend".to_string(),
        headers: Vec::new(),
        body: None,
    };
    let error = transport.execute(req).await.unwrap_err();
    assert_eq!(error.code, AppErrorCode::HttpTimeout);
}

#[tokio::test]
async fn transport_connect_refused() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }; // listener closed, nothing accepts on the port afterwards
    let transport = AppHttpTransport::new(ut_backend_cfg(port, 5), ut_setup_logctx());
    let req = HttpRequestSpec {
        method: Method::GET,
        path: "/api".to_string(),
        headers: Vec::new(),
        body: None,
    };
    let error = transport.execute(req).await.unwrap_err();
    assert!(matches!(error.code, AppErrorCode::IOerror(_)));
}

#[tokio::test]
async fn form_relay_post_ok() {
    let reply = "HTTP/1.1 302 Found\r\nLocation: /done\r\nContent-Length: 0\r\n\r\n";
    let (port, rx) = ut_spawn_server(reply).await;
    let relay = FormRelayContext::new(ut_backend_cfg(port, 5), ut_setup_logctx());
    let html = r#"<form method="post" action="/gateway.do?charset=utf-8">
        <input type="hidden" name="sign" value="a b">
        <input type="hidden" name="app_id" value="2021">
        <input type="submit" value="pay">
    </form>"#;
    let mut window = relay.open_window().await.unwrap();
    window.write_document(html);
    let submitted = window.submit_first_form().await.unwrap();
    assert!(submitted);
    let received = rx.await.unwrap();
    assert!(received.starts_with("POST /gateway.do?charset=utf-8 HTTP/1.1\r\n"));
    assert!(received
        .to_lowercase()
        .contains("content-type: application/x-www-form-urlencoded"));
    let body = received.split("\r\n\r\n").nth(1).unwrap();
    assert_eq!(body, "sign=a+b&app_id=2021");
}

#[tokio::test]
async fn form_relay_keeps_repeated_names_in_order() {
    let reply = "HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n";
    let (port, rx) = ut_spawn_server(reply).await;
    let relay = FormRelayContext::new(ut_backend_cfg(port, 5), ut_setup_logctx());
    let html = r#"<form method="post" action="pay.do">
        <input name="k" value="1"><input name="k" value="2">
        <input name="z" value="a b&amp;c">
    </form>"#;
    let mut window = relay.open_window().await.unwrap();
    window.write_document(html);
    assert!(window.submit_first_form().await.unwrap());
    let received = rx.await.unwrap();
    assert!(received.starts_with("POST /pay.do HTTP/1.1\r\n"));
    let body = received.split("\r\n\r\n").nth(1).unwrap();
    assert_eq!(body, "k=1&k=2&z=a+b%26c");
}

#[tokio::test]
async fn form_relay_without_form() {
    let relay = FormRelayContext::new(ut_backend_cfg(9, 5), ut_setup_logctx());
    let mut window = relay.open_window().await.unwrap();
    window.write_document("<html><body>order expired</body></html>");
    let submitted = window.submit_first_form().await.unwrap();
    assert!(!submitted);
    window.close();
}

#[tokio::test]
async fn form_relay_rejected_by_gateway() {
    let reply = "HTTP/1.1 400 Bad Request\r\nContent-Length: 11\r\n\r\ninvalid-sig";
    let (port, _rx) = ut_spawn_server(reply).await;
    let relay = FormRelayContext::new(ut_backend_cfg(port, 5), ut_setup_logctx());
    let mut window = relay.open_window().await.unwrap();
    window.write_document("<form method='get' action='/gw'><input name='k' value='v'></form>");
    let error = window.submit_first_form().await.unwrap_err();
    assert_eq!(error.code, AppErrorCode::HttpNonSuccessStatus(400));
    assert_eq!(error.detail.as_deref(), Some("invalid-sig"));
}
