use crate::{
    error::ValidationError,
    models::{
        ConnectionSettings, GenerationParameters, ModelChoice, NormalizedRequest, DEFAULT_MODEL,
    },
};

/// Pre-flight checks for one submission.
///
/// A missing credential is reported before an empty prompt so callers can
/// route the user to configuration first. On success the custom model
/// sentinel has been replaced by the effective model identifier.
pub fn validate_for_submission(
    settings: &ConnectionSettings,
    params: &GenerationParameters,
) -> Result<NormalizedRequest, ValidationError> {
    if !settings.is_configured() {
        return Err(ValidationError::MissingCredential);
    }

    let prompt = params.prompt.trim();
    if prompt.is_empty() {
        return Err(ValidationError::EmptyPrompt);
    }

    Ok(NormalizedRequest {
        prompt: prompt.to_string(),
        model: resolve_model(params),
        size: params.size,
        quality: params.quality,
        duration: params.duration,
        style: params.style,
        seed: params.seed,
    })
}

pub fn resolve_model(params: &GenerationParameters) -> String {
    match &params.model {
        ModelChoice::Known(id) => id.clone(),
        ModelChoice::Custom => {
            let custom = params.custom_model.trim();
            if custom.is_empty() {
                DEFAULT_MODEL.to_string()
            } else {
                custom.to_string()
            }
        }
    }
}
