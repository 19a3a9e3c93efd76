//! Client for OpenAI-compatible video generation APIs.
//!
//! One set of user-facing parameters is validated, shaped into the payload
//! its model family expects (video endpoint, or the DALL-E image fallback),
//! sent, and resolved into a single generation state the UI can render.

pub mod config;
pub mod error;
pub mod generation;
pub mod logger;
pub mod models;
pub mod storage;

pub use config::AppConfig;
pub use error::{Result, ValidationError, VidGenError};
pub use generation::{
    build_request, interpret_response, validate_for_submission, GenerationSession,
    GenerationState, HttpTransport, ReqwestTransport, SubmitRejection, VideoGenerator,
};
pub use models::*;
pub use storage::{save_settings, FileSettingsStore, MemorySettingsStore, SettingsStore};
