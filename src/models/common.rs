use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "sora-2";
pub const CUSTOM_MODEL: &str = "custom";

/// Substring (matched case-insensitively) that routes a model to the image endpoint.
pub const IMAGE_FAMILY_MARKER: &str = "dall-e";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub label: String,
    pub family: ModelFamily,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    Video,
    Image,
}

impl ModelFamily {
    /// The model identifier is the only discriminator: anything that is not
    /// a DALL-E model goes to the video endpoint.
    pub fn classify(model_id: &str) -> Self {
        if model_id.to_lowercase().contains(IMAGE_FAMILY_MARKER) {
            ModelFamily::Image
        } else {
            ModelFamily::Video
        }
    }

    pub fn endpoint_path(&self) -> &'static str {
        match self {
            ModelFamily::Video => "/videos/generations",
            ModelFamily::Image => "/images/generations",
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, ModelFamily::Image)
    }
}

pub fn available_models() -> Vec<ModelInfo> {
    [
        (DEFAULT_MODEL, "Sora 2.0 (Latest)"),
        ("sora-1.0-turbo", "Sora 1.0 Turbo"),
        ("dall-e-3", "DALL-E 3 (Image Fallback)"),
        (CUSTOM_MODEL, "Custom Model..."),
    ]
    .into_iter()
    .map(|(id, label)| ModelInfo {
        id: id.to_string(),
        label: label.to_string(),
        family: ModelFamily::classify(id),
    })
    .collect()
}
