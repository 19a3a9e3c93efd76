use crate::{
    error::{Result, VidGenError},
    models::{ApiErrorBody, HttpRequestSpec, RemoteResponse},
};
use async_trait::async_trait;
use reqwest::Client;

/// Sends one built request and normalizes every failure into [`VidGenError`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, spec: &HttpRequestSpec) -> Result<RemoteResponse>;
}

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, spec: &HttpRequestSpec) -> Result<RemoteResponse> {
        let mut builder = self.client.post(&spec.url);
        for (name, value) in &spec.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        log::info!("POST {} (model: {})", spec.url, spec.body.model);

        let response = builder
            .body(spec.body_bytes()?)
            .send()
            .await
            .map_err(|e| {
                log::error!("Generation request failed before a response: {}", e);
                VidGenError::Network(e.to_string())
            })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("");
        let body = response
            .bytes()
            .await
            .map_err(|e| VidGenError::Network(format!("failed to read response body: {}", e)))?;

        log::debug!("Response status {} with {} body bytes", status, body.len());

        interpret_response(status.as_u16(), status_text, &body)
    }
}

/// Turns a raw HTTP outcome into the response contract the state machine
/// relies on: a failed status becomes `Api`, and a successful one must carry a
/// first data entry with a non-empty URL.
pub fn interpret_response(status: u16, status_text: &str, body: &[u8]) -> Result<RemoteResponse> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ApiErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .and_then(|detail| detail.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| {
                format!("API Request Failed: {} {}", status, status_text)
                    .trim_end()
                    .to_string()
            });
        log::warn!("API rejected the request with status {}: {}", status, message);
        return Err(VidGenError::Api(message));
    }

    let response: RemoteResponse = serde_json::from_slice(body).map_err(|e| {
        VidGenError::MalformedResponse(format!("response body is not valid JSON: {}", e))
    })?;

    match response.data.first() {
        Some(entry) if entry.usable_url().is_some() => Ok(response),
        Some(entry) if entry.b64_json.is_some() => Err(VidGenError::MalformedResponse(
            "inline b64_json payloads are not supported".into(),
        )),
        Some(_) => Err(VidGenError::MalformedResponse(String::new())),
        None => Err(VidGenError::MalformedResponse(
            "response contained no data entries".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_is_extracted() {
        let body = br#"{"error": {"message": "bad size", "type": "invalid_request_error"}}"#;
        let err = interpret_response(400, "Bad Request", body).unwrap_err();
        assert!(matches!(err, VidGenError::Api(ref m) if m == "bad size"));
        assert_eq!(err.user_message(), "bad size");
    }

    #[test]
    fn missing_error_message_synthesizes_status() {
        let err = interpret_response(503, "Service Unavailable", br#"{"detail": "down"}"#).unwrap_err();
        assert_eq!(err.user_message(), "API Request Failed: 503 Service Unavailable");
    }

    #[test]
    fn non_json_error_body_synthesizes_status() {
        let err = interpret_response(502, "Bad Gateway", b"<html>nginx</html>").unwrap_err();
        assert_eq!(err.user_message(), "API Request Failed: 502 Bad Gateway");
    }

    #[test]
    fn success_without_url_is_malformed() {
        let err = interpret_response(200, "OK", br#"{"created": 1, "data": [{}]}"#).unwrap_err();
        assert!(err.is_malformed_response());
        assert_eq!(err.user_message(), crate::error::NO_MEDIA_URL_MESSAGE);
    }

    #[test]
    fn non_integer_created_is_tolerated() {
        for created in ["1700000000.5", "\"2024-01-01T00:00:00Z\"", "null"] {
            let body = format!(
                r#"{{"created": {}, "data": [{{"url": "https://cdn/v.mp4"}}]}}"#,
                created
            );
            let response = interpret_response(200, "OK", body.as_bytes()).unwrap();
            assert_eq!(response.first_media().unwrap().url, "https://cdn/v.mp4");
        }
    }

    #[test]
    fn inline_payload_is_unsupported() {
        let body = br#"{"created": 1, "data": [{"b64_json": "AAAA"}]}"#;
        let err = interpret_response(200, "OK", body).unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[test]
    fn empty_data_and_invalid_json_are_malformed() {
        assert!(interpret_response(200, "OK", br#"{"created": 1, "data": []}"#)
            .unwrap_err()
            .is_malformed_response());
        assert!(interpret_response(200, "OK", b"not json")
            .unwrap_err()
            .is_malformed_response());
    }

    #[test]
    fn success_returns_first_entry_verbatim() {
        let body = br#"{"created": 7, "data": [{"url": "https://cdn/v.mp4", "revised_prompt": "a tabby cat"}, {"url": "https://cdn/w.mp4"}]}"#;
        let response = interpret_response(200, "OK", body).unwrap();
        assert_eq!(response.created, Some(serde_json::json!(7)));
        let media = response.first_media().unwrap();
        assert_eq!(media.url, "https://cdn/v.mp4");
        assert_eq!(media.revised_prompt.as_deref(), Some("a tabby cat"));
    }
}
