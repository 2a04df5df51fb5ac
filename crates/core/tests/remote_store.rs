//! Remote-store behavior against canned HTTP endpoints.
//!
//! A tiny single-use responder stands in for the real service: each test
//! spawns a listener that answers its next connections with fixed
//! responses. That is enough to pin down the wire shapes, the degrade
//! behavior and the session handling without real infrastructure.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use reelrack_core::{testing::fixtures, RemoteStoreConfig, RemoteVideoStore, VideoStore};

fn remote_config(data_url: &str, auth_url: &str) -> RemoteStoreConfig {
    RemoteStoreConfig {
        data_url: data_url.to_string(),
        auth_url: auth_url.to_string(),
        timeout_secs: 5,
    }
}

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

/// Read one full HTTP request (head plus any advertised body) and return
/// the raw bytes.
async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return buf,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos;
                }
            }
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let mut remaining = content_length.saturating_sub(buf.len() - head_end - 4);
    while remaining > 0 {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                remaining = remaining.saturating_sub(n);
            }
        }
    }
    buf
}

/// Serve the given responses, one per connection, in order. Returns the
/// base URL and a channel yielding each raw request as it arrives.
async fn canned_sequence(
    responses: Vec<(&'static str, String)>,
) -> (String, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind responder");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for (status_line, body) in responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let request = read_request(&mut socket).await;
            let _ = tx.send(String::from_utf8_lossy(&request).to_string());
            let _ = socket
                .write_all(http_response(status_line, &body).as_bytes())
                .await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}", addr), rx)
}

/// Serve one connection with a fixed response.
async fn canned_endpoint(status_line: &'static str, body: &str) -> String {
    let (url, _rx) = canned_sequence(vec![(status_line, body.to_string())]).await;
    url
}

/// A base URL nothing listens on.
async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");
    drop(listener);
    format!("http://{}", addr)
}

// =============================================================================
// Listing Tests
// =============================================================================

#[tokio::test]
async fn test_listing_parses_array_payload() {
    let body = serde_json::to_string(&vec![
        fixtures::video("One", &[]),
        fixtures::video("Two", &["music"]),
    ])
    .unwrap();
    let data_url = canned_endpoint("200 OK", &body).await;
    let auth_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    let videos = store.list_videos().await;

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].title, "One");
    assert_eq!(videos[1].title, "Two");
    assert!(videos[1].tags.contains("music"));
}

#[tokio::test]
async fn test_listing_parses_keyed_payload_in_key_order() {
    // Keys out of order in the text; ascending key order must win.
    let body = format!(
        r#"{{"k2": {}, "k1": {}}}"#,
        serde_json::to_string(&fixtures::video("Second", &[])).unwrap(),
        serde_json::to_string(&fixtures::video("First", &[])).unwrap(),
    );
    let data_url = canned_endpoint("200 OK", &body).await;
    let auth_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    let videos = store.list_videos().await;

    let titles: Vec<_> = videos.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[tokio::test]
async fn test_listing_null_reads_as_empty_catalog() {
    let data_url = canned_endpoint("200 OK", "null").await;
    let auth_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(store.list_videos().await.is_empty());
}

#[tokio::test]
async fn test_listing_degrades_on_server_error() {
    let data_url = canned_endpoint("500 Internal Server Error", "{}").await;
    let auth_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(store.list_videos().await.is_empty());
}

#[tokio::test]
async fn test_listing_degrades_on_malformed_body() {
    let data_url = canned_endpoint("200 OK", "this is not json").await;
    let auth_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(store.list_videos().await.is_empty());
}

#[tokio::test]
async fn test_listing_degrades_when_unreachable() {
    let data_url = unreachable_endpoint().await;
    let auth_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(store.list_videos().await.is_empty());
}

#[tokio::test]
async fn test_listing_requests_videos_path() {
    let (data_url, mut requests) = canned_sequence(vec![("200 OK", "[]".to_string())]).await;
    let auth_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    store.list_videos().await;

    let request = requests.recv().await.expect("Responder saw no request");
    assert!(
        request.starts_with("GET /videos "),
        "Expected GET /videos, got: {}",
        request.lines().next().unwrap_or_default()
    );
}

// =============================================================================
// Write Tests
// =============================================================================

#[tokio::test]
async fn test_add_posts_record_and_reports_success() {
    let (data_url, mut requests) = canned_sequence(vec![("200 OK", "{}".to_string())]).await;
    let auth_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(store.add_video(fixtures::video("Uploaded", &["new"])).await);

    let request = requests.recv().await.expect("Responder saw no request");
    assert!(request.starts_with("POST /videos "));
    assert!(
        request.contains(r#""title":"Uploaded""#),
        "Record fields must travel in the body"
    );
    assert!(request.contains(r#""tags":["new"]"#));
}

#[tokio::test]
async fn test_add_degrades_on_rejection() {
    let data_url = canned_endpoint("403 Forbidden", "{}").await;
    let auth_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(!store.add_video(fixtures::video("Rejected", &[])).await);
}

#[tokio::test]
async fn test_add_degrades_when_unreachable() {
    let data_url = unreachable_endpoint().await;
    let auth_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(!store.add_video(fixtures::video("Lost", &[])).await);
}

#[tokio::test]
async fn test_add_does_not_attach_session_token() {
    let token_body = r#"{"idToken": "tok-123", "expiresIn": "3600"}"#;
    let auth_url = canned_endpoint("200 OK", token_body).await;
    let (data_url, mut requests) = canned_sequence(vec![("200 OK", "{}".to_string())]).await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(store.authenticate("user@example.com", "pw").await);
    assert!(store.add_video(fixtures::video("Unsigned", &[])).await);

    // The stored token stays in the session; the write goes out without it.
    let request = requests.recv().await.expect("Responder saw no request");
    assert!(!request.contains("tok-123"), "Token must not be attached");
    assert!(
        !request.to_lowercase().contains("authorization:"),
        "No auth header on writes"
    );
}

// =============================================================================
// Authentication Tests
// =============================================================================

#[tokio::test]
async fn test_authenticate_stores_token() {
    let token_body = r#"{"idToken": "tok-123", "refreshToken": "r", "expiresIn": "3600"}"#;
    let auth_url = canned_endpoint("200 OK", token_body).await;
    let data_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(store.session().await.token.is_none());

    assert!(store.authenticate("user@example.com", "hunter2").await);

    let session = store.session().await;
    assert_eq!(session.token.as_deref(), Some("tok-123"));
    assert!(session.acquired_at.is_some());
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_authenticate_sends_credential_payload() {
    let token_body = r#"{"idToken": "tok-123"}"#;
    let (auth_url, mut requests) =
        canned_sequence(vec![("200 OK", token_body.to_string())]).await;
    let data_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(store.authenticate("user@example.com", "hunter2").await);

    let request = requests.recv().await.expect("Responder saw no request");
    assert!(request.contains(r#""email":"user@example.com""#));
    assert!(request.contains(r#""password":"hunter2""#));
    assert!(request.contains(r#""returnSecureToken":true"#));
}

#[tokio::test]
async fn test_authenticate_rejection_reads_as_false() {
    let auth_url = canned_endpoint("401 Unauthorized", r#"{"error": "INVALID_PASSWORD"}"#).await;
    let data_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(!store.authenticate("user@example.com", "wrong").await);
    assert!(store.session().await.token.is_none());
}

#[tokio::test]
async fn test_authenticate_unreachable_reads_as_false() {
    let auth_url = unreachable_endpoint().await;
    let data_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(!store.authenticate("user@example.com", "pw").await);
}

#[tokio::test]
async fn test_failed_attempt_preserves_previous_token() {
    let responses = vec![
        ("200 OK", r#"{"idToken": "tok-first"}"#.to_string()),
        ("401 Unauthorized", r#"{"error": "INVALID_PASSWORD"}"#.to_string()),
    ];
    let (auth_url, _requests) = canned_sequence(responses).await;
    let data_url = unreachable_endpoint().await;

    let store = RemoteVideoStore::new(remote_config(&data_url, &auth_url)).unwrap();
    assert!(store.authenticate("user@example.com", "right").await);
    assert!(!store.authenticate("user@example.com", "wrong").await);

    assert_eq!(
        store.session().await.token.as_deref(),
        Some("tok-first"),
        "A failed attempt must not clear the stored token"
    );
}

#[tokio::test]
async fn test_slow_endpoint_hits_timeout_and_degrades() {
    // Accepts the connection but never answers inside the timeout.
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind responder");
    let addr = listener.local_addr().expect("Failed to get local addr");
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            read_request(&mut socket).await;
            tokio::time::sleep(Duration::from_secs(10)).await;
            let _ = socket
                .write_all(http_response("200 OK", "[]").as_bytes())
                .await;
        }
    });

    let config = RemoteStoreConfig {
        data_url: format!("http://{}", addr),
        auth_url: unreachable_endpoint().await,
        timeout_secs: 1,
    };
    let store = RemoteVideoStore::new(config).unwrap();

    let started = std::time::Instant::now();
    assert!(store.list_videos().await.is_empty());
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "The timeout must cut the stall short"
    );
}
