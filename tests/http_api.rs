use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use cloudbrain::prelude::*;

struct Captured {
    head: String,
    body: String,
}

/// Serve exactly one request with the given status line and body, returning
/// what the client sent.
async fn one_shot(status: &'static str, body: &'static str) -> (Url, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let (head, body) = loop {
            let n = sock.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending a full request");
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(split) = text.find("\r\n\r\n") {
                let head = text[..split].to_string();
                let len = head
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length").then(|| v.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                let body = &text[split + 4..];
                if body.len() >= len {
                    break (head, body[..len].to_string());
                }
            }
        };
        let resp = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(resp.as_bytes()).await.unwrap();
        sock.shutdown().await.ok();
        Captured { head, body }
    });
    (Url::parse(&format!("http://{addr}/")).unwrap(), handle)
}

fn video() -> ContentItem {
    ContentItem::new("Video", "https://youtube.com/x", ContentType::Youtube)
}

#[tokio::test]
async fn posts_json_with_raw_token() {
    let (base, server) = one_shot("200 OK", "{\"message\":\"Content added\"}").await;
    let api = HttpContentApi::new(&base, None).unwrap();

    api.create_content(&video(), &AuthToken::new("raw-token-value")).await.unwrap();

    let req = server.await.unwrap();
    let request_line = req.head.lines().next().unwrap();
    assert_eq!(request_line, "POST /api/v1/content HTTP/1.1");
    let head = req.head.to_ascii_lowercase();
    assert!(head.contains("\r\nauthorization: raw-token-value"), "{}", req.head);
    assert!(head.contains("\r\ncontent-type: application/json"), "{}", req.head);
    assert!(head.contains("\r\nuser-agent: cloudbrain/"), "{}", req.head);
    let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body, serde_json::json!({"title": "Video", "link": "https://youtube.com/x", "type": "youtube"}));
}

#[tokio::test]
async fn error_status_carries_server_message() {
    let (base, server) = one_shot("403 Forbidden", "{\"message\":\"You are not logged in\"}").await;
    let api = HttpContentApi::new(&base, None).unwrap();

    let err = api.create_content(&video(), &AuthToken::new("t")).await.unwrap_err();

    server.await.unwrap();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message.as_deref(), Some("You are not logged in"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn error_status_without_json_body() {
    let (base, server) = one_shot("500 Internal Server Error", "oops").await;
    let api = HttpContentApi::new(&base, None).unwrap();

    let err = api.create_content(&video(), &AuthToken::new("t")).await.unwrap_err();

    server.await.unwrap();
    assert!(matches!(err, ApiError::Status { status: 500, message: None }));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let base = Url::parse(&format!("http://{addr}/")).unwrap();
    let api = HttpContentApi::new(&base, None).unwrap();

    let err = api.create_content(&video(), &AuthToken::new("t")).await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn client_facade_submits_through_http() {
    let (base, server) = one_shot("201 Created", "{}").await;
    let mut config = Config::default();
    config.set_api_url(base.as_str()).unwrap();
    config.token = Some(AuthToken::new("tok"));
    let brain = CloudBrain::connect(&config).unwrap();
    let mut form = FormState::with_values("Video", "https://youtube.com/x", Some(ContentType::Youtube));

    let outcome = brain.add_content(&mut form).await;

    assert!(outcome.is_created(), "{outcome:?}");
    server.await.unwrap();
    assert_eq!(form.title(), "");
}

#[test]
fn client_facade_requires_token() {
    assert!(CloudBrain::connect(&Config::default()).is_err());
}
