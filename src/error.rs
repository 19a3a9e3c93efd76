use thiserror::Error;

/// Message surfaced when a successful response carries no usable media URL.
pub const NO_MEDIA_URL_MESSAGE: &str = "No media URL received in the response.";

/// Pre-flight failures. These never reach the network and never move the
/// generation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("API key is not configured")]
    MissingCredential,
    #[error("Please enter a prompt describing the video you want to generate.")]
    EmptyPrompt,
}

#[derive(Debug, Error)]
pub enum VidGenError {
    #[error("API key is not configured")]
    MissingCredential,
    #[error("Prompt is empty")]
    EmptyPrompt,
    #[error("Network error: {0}")]
    Network(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl VidGenError {
    /// Text shown to the user when an attempt ends in the `Error` state.
    pub fn user_message(&self) -> String {
        match self {
            VidGenError::MissingCredential => ValidationError::MissingCredential.to_string(),
            VidGenError::EmptyPrompt => ValidationError::EmptyPrompt.to_string(),
            VidGenError::Network(msg)
            | VidGenError::Api(msg)
            | VidGenError::Config(msg)
            | VidGenError::Storage(msg)
            | VidGenError::Serialization(msg) => msg.clone(),
            VidGenError::MalformedResponse(detail) if detail.is_empty() => {
                NO_MEDIA_URL_MESSAGE.to_string()
            }
            VidGenError::MalformedResponse(detail) => {
                format!("{} ({})", NO_MEDIA_URL_MESSAGE, detail)
            }
        }
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self, VidGenError::MalformedResponse(_))
    }
}

impl From<ValidationError> for VidGenError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingCredential => VidGenError::MissingCredential,
            ValidationError::EmptyPrompt => VidGenError::EmptyPrompt,
        }
    }
}

impl From<serde_json::Error> for VidGenError {
    fn from(err: serde_json::Error) -> Self {
        VidGenError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for VidGenError {
    fn from(err: std::io::Error) -> Self {
        VidGenError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VidGenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_is_surfaced_verbatim() {
        let err = VidGenError::Api("bad size".into());
        assert_eq!(err.user_message(), "bad size");
    }

    #[test]
    fn malformed_response_uses_fixed_message() {
        let err = VidGenError::MalformedResponse(String::new());
        assert_eq!(err.user_message(), NO_MEDIA_URL_MESSAGE);
        assert!(err.is_malformed_response());

        let detailed = VidGenError::MalformedResponse("inline b64_json payload".into());
        assert!(detailed.user_message().starts_with(NO_MEDIA_URL_MESSAGE));
    }

    #[test]
    fn validation_errors_convert() {
        let err: VidGenError = ValidationError::EmptyPrompt.into();
        assert!(matches!(err, VidGenError::EmptyPrompt));
    }
}
