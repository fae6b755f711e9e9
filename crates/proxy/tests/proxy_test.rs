//! Integration tests for the chat proxy
//!
//! Each test spins up the proxy router on an ephemeral port with a stub
//! upstream and drives it over real HTTP.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use workbench_proxy::{router, AppState};

/// Start the proxy against the given backend, returning its base URL
async fn spawn_proxy(backend_base_url: String) -> String {
    let app = router(AppState::new(backend_base_url));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind proxy listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Proxy server failed");
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_pass_through_identity() {
    let mut upstream = mockito::Server::new_async().await;
    let body = r#"{"message":"What relationships exist between Kubernetes and OpenShift?","history":[]}"#;
    let reply = r#"{"reply":"They compete.","context":[{"source":"Kubernetes","target":"OpenShift","relationship":"COMPETES_WITH"}]}"#;

    let mock = upstream
        .mock("POST", "/api/chat")
        .match_body(body)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply)
        .create_async()
        .await;

    let proxy_url = spawn_proxy(upstream.url()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", proxy_url))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(response.text().await.unwrap(), reply);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_error_passes_through() {
    let mut upstream = mockito::Server::new_async().await;
    upstream
        .mock("POST", "/api/chat")
        .with_status(422)
        .with_header("content-type", "text/plain")
        .with_body("no entities resolved")
        .create_async()
        .await;

    let proxy_url = spawn_proxy(upstream.url()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", proxy_url))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 422);
    assert_eq!(response.headers().get("content-type").unwrap(), "text/plain");
    assert_eq!(response.text().await.unwrap(), "no entities resolved");
}

#[tokio::test]
async fn test_unreachable_backend_returns_502() {
    // Nothing listens on this address.
    let proxy_url = spawn_proxy("http://127.0.0.1:1".to_string()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", proxy_url))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    let body: serde_json::Value = response.json().await.unwrap();
    let message = body["message"].as_str().unwrap();
    assert!(!message.is_empty());
}

#[tokio::test]
async fn test_missing_content_type_defaults_to_json() {
    let upstream_url = spawn_headerless_upstream(r#"{"reply":"ok","context":[]}"#).await;
    let proxy_url = spawn_proxy(upstream_url).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/chat", proxy_url))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let proxy_url = spawn_proxy("http://127.0.0.1:1".to_string()).await;

    let response = reqwest::get(format!("{}/health", proxy_url)).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

/// Raw upstream that answers 200 without a content-type header, which
/// mock servers won't produce.
async fn spawn_headerless_upstream(body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };

            tokio::spawn(async move {
                // Drain the request: headers, then content-length bytes.
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let n = match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => n,
                    };
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(header_end) = find_header_end(&buf) {
                        let content_length = parse_content_length(&buf[..header_end]);
                        if buf.len() >= header_end + content_length {
                            break;
                        }
                    }
                }

                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

fn parse_content_length(headers: &[u8]) -> usize {
    let text = String::from_utf8_lossy(headers);
    text.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}
