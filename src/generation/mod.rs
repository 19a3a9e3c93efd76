pub mod builder;
pub mod media;
pub mod state;
pub mod transport;
pub mod validate;

use crate::{
    error::{Result, ValidationError, VidGenError},
    logger,
    models::{ConnectionSettings, GenerationParameters, HttpRequestSpec},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use builder::build_request;
pub use media::download_media;
pub use state::{GenerationSession, GenerationState};
pub use transport::{interpret_response, HttpTransport, ReqwestTransport};
pub use validate::validate_for_submission;

/// Why a submission never left the `Idle`/terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("a generation is already in progress")]
    Busy,
}

/// Runs validate -> build -> execute for one attempt at a time and owns the
/// resulting state.
pub struct VideoGenerator<T: HttpTransport = ReqwestTransport> {
    transport: T,
    session: GenerationSession,
}

impl VideoGenerator<ReqwestTransport> {
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }

    /// Downloads the media of the last successful attempt into `dir`.
    pub async fn download_latest(&self, dir: &Path) -> Result<PathBuf> {
        let media = self.session.state().media().ok_or_else(|| {
            VidGenError::Storage("no generated media to download".into())
        })?;
        download_media(self.transport.client(), media, dir).await
    }
}

impl Default for VideoGenerator<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpTransport> VideoGenerator<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            session: GenerationSession::new(),
        }
    }

    pub fn state(&self) -> &GenerationState {
        self.session.state()
    }

    pub fn session(&self) -> &GenerationSession {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validation plus request building, without touching the session.
    pub fn prepare(
        settings: &ConnectionSettings,
        params: &GenerationParameters,
    ) -> std::result::Result<HttpRequestSpec, ValidationError> {
        let normalized = validate_for_submission(settings, params)?;
        Ok(build_request(settings, &normalized))
    }

    /// Submits one attempt and resolves once it reaches a terminal state.
    ///
    /// Rejected submissions leave the current state untouched. A missing
    /// credential means the caller should ask for configuration; an empty
    /// prompt means it should warn the user.
    pub async fn submit(
        &mut self,
        settings: &ConnectionSettings,
        params: &GenerationParameters,
    ) -> std::result::Result<&GenerationState, SubmitRejection> {
        if !self.session.can_submit() {
            return Err(SubmitRejection::Busy);
        }

        let spec = Self::prepare(settings, params).map_err(|err| {
            log::warn!("Submission rejected: {}", err);
            SubmitRejection::Invalid(err)
        })?;

        let attempt_id = self.session.begin().ok_or(SubmitRejection::Busy)?;
        log::info!(
            "Attempt {} -> {} (key {})",
            attempt_id,
            spec.url,
            settings.masked_api_key()
        );

        let outcome = {
            let _timer = logger::timer("generation request");
            self.transport.execute(&spec).await
        }
        .and_then(|response| {
            response
                .first_media()
                .ok_or_else(|| VidGenError::MalformedResponse(String::new()))
        });

        match outcome {
            Ok(media) => self.session.succeed(media),
            Err(err) => self.session.fail(err.user_message()),
        };

        Ok(self.session.state())
    }
}
