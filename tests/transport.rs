use rvidgen::{
    models::{ConnectionSettings, GenerationParameters, MediaKind, Style},
    GenerationState, HttpTransport, ReqwestTransport, VideoGenerator, VidGenError,
};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Serves exactly one canned HTTP response and hands back what it received.
async fn serve_once(
    status_line: &'static str,
    body: impl Into<String>,
) -> (String, oneshot::Receiver<CapturedRequest>) {
    let body: String = body.into();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default().to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();
        let content_length = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let _ = tx.send(CapturedRequest {
            request_line,
            headers,
            body: buf[header_end..].to_vec(),
        });
    });

    (format!("http://{}/v1/", addr), rx)
}

#[tokio::test]
async fn video_request_is_posted_as_built() {
    let (base_url, captured) = serve_once(
        "200 OK",
        r#"{"created": 1700000000, "data": [{"url": "https://cdn.example/v.mp4", "revised_prompt": "a ginger cat"}]}"#,
    )
    .await;

    let settings = ConnectionSettings::new(&base_url, "sk-live").unwrap();
    let params = GenerationParameters::new("a cat")
        .with_style(Style::Animation)
        .with_seed(0);

    let mut generator = VideoGenerator::new();
    let state = generator.submit(&settings, &params).await.unwrap().clone();

    let media = state.media().unwrap();
    assert_eq!(media.url, "https://cdn.example/v.mp4");
    assert_eq!(media.kind, MediaKind::Video);
    assert_eq!(media.display_revised_prompt("a cat"), Some("a ginger cat"));

    let request = captured.await.unwrap();
    assert_eq!(request.request_line, "POST /v1/videos/generations HTTP/1.1");
    assert_eq!(request.header("authorization"), Some("Bearer sk-live"));
    assert_eq!(request.header("content-type"), Some("application/json"));

    let body = request.json();
    assert_eq!(body["model"], "sora-2");
    assert_eq!(body["style"], "animation");
    assert_eq!(body["duration"], 5);
    assert_eq!(body["seed"], 0);
    assert_eq!(body["n"], 1);
    assert_eq!(body["response_format"], "url");
}

#[tokio::test]
async fn dalle_request_goes_to_image_endpoint() {
    let (base_url, captured) = serve_once(
        "200 OK",
        r#"{"created": 1, "data": [{"url": "https://cdn.example/i.png"}]}"#,
    )
    .await;

    let settings = ConnectionSettings::new(&base_url, "sk-live").unwrap();
    let params = GenerationParameters::new("a cat")
        .with_model("dall-e-3")
        .with_style(Style::Fantasy);

    let mut generator = VideoGenerator::new();
    let state = generator.submit(&settings, &params).await.unwrap().clone();
    assert_eq!(state.media().map(|m| m.kind), Some(MediaKind::Image));

    let request = captured.await.unwrap();
    assert_eq!(request.request_line, "POST /v1/images/generations HTTP/1.1");
    let body = request.json();
    assert!(body.get("style").is_none());
    assert!(body.get("duration").is_none());
}

#[tokio::test]
async fn api_error_message_becomes_error_state() {
    let (base_url, _captured) =
        serve_once("400 Bad Request", r#"{"error": {"message": "bad size"}}"#).await;

    let settings = ConnectionSettings::new(&base_url, "sk-live").unwrap();
    let mut generator = VideoGenerator::new();
    let state = generator
        .submit(&settings, &GenerationParameters::new("a cat"))
        .await
        .unwrap();

    assert_eq!(
        state,
        &GenerationState::Error {
            message: "bad size".into()
        }
    );
}

#[tokio::test]
async fn success_without_url_is_malformed() {
    let (base_url, _captured) = serve_once("200 OK", r#"{"created": 1, "data": [{}]}"#).await;

    let settings = ConnectionSettings::new(&base_url, "sk-live").unwrap();
    let spec = VideoGenerator::<ReqwestTransport>::prepare(
        &settings,
        &GenerationParameters::new("a cat"),
    )
    .unwrap();

    let err = ReqwestTransport::new().execute(&spec).await.unwrap_err();
    assert!(matches!(err, VidGenError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    // Bind then drop to get a port nothing is listening on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let settings = ConnectionSettings::new(format!("http://{}/v1", addr), "sk-live").unwrap();
    let mut generator = VideoGenerator::new();
    let state = generator
        .submit(&settings, &GenerationParameters::new("a cat"))
        .await
        .unwrap()
        .clone();

    assert!(matches!(state, GenerationState::Error { .. }));
    assert!(generator.session().can_submit());
}

#[tokio::test]
async fn download_saves_generated_media() {
    let (media_base, _media_req) = serve_once("200 OK", "fake-mp4-bytes").await;
    let media_url = format!("{}clip", media_base);
    let (api_base, _api_req) = serve_once(
        "200 OK",
        format!(r#"{{"created": 1, "data": [{{"url": "{}"}}]}}"#, media_url),
    )
    .await;

    let settings = ConnectionSettings::new(&api_base, "sk-live").unwrap();
    let mut generator = VideoGenerator::new();
    generator
        .submit(&settings, &GenerationParameters::new("a cat"))
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = generator.download_latest(dir.path()).await.unwrap();

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("sora-gen-"));
    assert!(name.ends_with(".mp4"));
    assert_eq!(std::fs::read(&path).unwrap(), b"fake-mp4-bytes");
}
