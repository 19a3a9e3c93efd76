use super::common::ModelFamily;
use super::params::{Quality, Style, VideoSize};
use crate::error::Result;
use serde::Serialize;

pub const RESPONSE_FORMAT_URL: &str = "url";

/// JSON body posted to either generation endpoint. Optional fields are
/// omitted from the payload entirely when `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationPayload {
    pub model: String,
    pub prompt: String,
    pub size: VideoSize,
    pub quality: Quality,
    pub n: u32,
    pub response_format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// A fully described POST, ready for a transport to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequestSpec {
    pub url: String,
    pub family: ModelFamily,
    pub headers: Vec<(String, String)>,
    pub body: GenerationPayload,
}

impl HttpRequestSpec {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.body)?)
    }
}
