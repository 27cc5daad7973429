//! HttpFetcher tests against a local one-shot HTTP server

use ipa_lookup::error::FetchError;
use ipa_lookup::fetcher::{FetchRequest, Fetcher, HttpFetcher};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one canned response; the handle yields the raw request text
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let mut request = Vec::new();
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            request.extend_from_slice(&buf[..n]);
            if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let response = format!(
            "{}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).to_string()
    });

    (format!("http://{}", addr), handle)
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(Duration::from_secs(5), "ipa-lookup-test/1.0").unwrap()
}

#[tokio::test]
async fn test_success_returns_body() {
    let (base, server) = serve_once("HTTP/1.1 200 OK", "{{IPA|en|/kæt/}}").await;

    let response = fetcher()
        .get(&FetchRequest::new(format!("{}/w/api.php", base)).query("page", "cat"))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.text(), "{{IPA|en|/kæt/}}");

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /w/api.php?page=cat HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("user-agent: ipa-lookup-test/1.0"));
}

#[tokio::test]
async fn test_request_header_overrides_default_user_agent() {
    let (base, server) = serve_once("HTTP/1.1 200 OK", "ok").await;

    fetcher()
        .get(&FetchRequest::new(format!("{}/word/cat", base)).header("User-Agent", "Mozilla/5.0"))
        .await
        .unwrap();

    let request = server.await.unwrap().to_ascii_lowercase();
    assert!(request.contains("user-agent: mozilla/5.0"));
    assert!(!request.contains("ipa-lookup-test"));
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let (base, server) = serve_once("HTTP/1.1 404 Not Found", "missing").await;

    let result = fetcher().get(&FetchRequest::new(format!("{}/wiki/x", base))).await;
    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));

    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = fetcher()
        .get(&FetchRequest::new(format!("http://{}/", addr)))
        .await;
    assert!(matches!(result, Err(FetchError::Network(_))));
}
