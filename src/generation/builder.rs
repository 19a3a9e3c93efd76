use crate::models::{
    ConnectionSettings, GenerationPayload, HttpRequestSpec, ModelFamily, NormalizedRequest, Style,
    RESPONSE_FORMAT_URL,
};

/// Maps a validated submission onto the payload shape its model family
/// accepts. Pure: no I/O, no failure modes.
pub fn build_request(settings: &ConnectionSettings, request: &NormalizedRequest) -> HttpRequestSpec {
    let family = ModelFamily::classify(&request.model);
    let url = format!("{}{}", settings.normalized_base_url(), family.endpoint_path());

    let headers = vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        (
            "Authorization".to_string(),
            format!("Bearer {}", settings.api_key.trim()),
        ),
    ];

    // The image endpoint rejects unknown fields, so style and duration are
    // video-only. The default style is left implicit.
    let (style, duration) = match family {
        ModelFamily::Image => (None, None),
        ModelFamily::Video => (
            Some(request.style).filter(|style| *style != Style::Realistic),
            Some(request.duration),
        ),
    };

    let body = GenerationPayload {
        model: request.model.clone(),
        prompt: request.prompt.clone(),
        size: request.size,
        quality: request.quality,
        n: 1,
        response_format: RESPONSE_FORMAT_URL,
        style,
        duration,
        seed: request.seed,
    };

    log::debug!(
        "Built {:?} request for model {} -> {}",
        family,
        request.model,
        url
    );

    HttpRequestSpec {
        url,
        family,
        headers,
        body,
    }
}
