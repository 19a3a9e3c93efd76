use serde::{Deserialize, Serialize};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "webp"];

/// Success body of both generation endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteResponse {
    /// Not interpreted; proxies disagree on its type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<serde_json::Value>,
    #[serde(default)]
    pub data: Vec<MediaEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

impl MediaEntry {
    pub fn usable_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

impl RemoteResponse {
    /// Only the first entry is ever consumed.
    pub fn first_media(&self) -> Option<MediaDescriptor> {
        let entry = self.data.first()?;
        let url = entry.usable_url()?;
        Some(MediaDescriptor::new(url, entry.revised_prompt.clone()))
    }
}

/// `{ "error": { "message": ... } }`, the shape of a failed request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    /// Image fallback results are recognised by their file extension.
    pub fn from_url(url: &str) -> Self {
        if image_extension(url).is_some() {
            MediaKind::Image
        } else {
            MediaKind::Video
        }
    }
}

fn image_extension(url: &str) -> Option<&'static str> {
    let lower = url.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .copied()
        .find(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// The payload of a successful attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub url: String,
    pub revised_prompt: Option<String>,
    pub kind: MediaKind,
}

impl MediaDescriptor {
    pub fn new(url: impl Into<String>, revised_prompt: Option<String>) -> Self {
        let url = url.into();
        let kind = MediaKind::from_url(&url);
        Self {
            url,
            revised_prompt,
            kind,
        }
    }

    /// The revised prompt, unless the API echoed the prompt back unchanged.
    pub fn display_revised_prompt(&self, prompt: &str) -> Option<&str> {
        self.revised_prompt
            .as_deref()
            .filter(|revised| !revised.is_empty() && *revised != prompt)
    }

    pub fn file_extension(&self) -> &'static str {
        image_extension(&self.url).unwrap_or("mp4")
    }
}
