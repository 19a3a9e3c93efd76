use crate::models::MediaDescriptor;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Loading,
    Success(MediaDescriptor),
    Error {
        message: String,
    },
}

impl GenerationState {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationState::Idle => "idle",
            GenerationState::Loading => "loading",
            GenerationState::Success(_) => "success",
            GenerationState::Error { .. } => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, GenerationState::Loading)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GenerationState::Success(_) | GenerationState::Error { .. }
        )
    }

    pub fn media(&self) -> Option<&MediaDescriptor> {
        match self {
            GenerationState::Success(media) => Some(media),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            GenerationState::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Owner of the single live attempt.
///
/// `Idle -> Loading -> Success | Error`, and any terminal state may start a
/// new attempt. Nothing leaves `Loading` except a terminal transition.
#[derive(Debug, Default)]
pub struct GenerationSession {
    state: GenerationState,
    attempt_id: Option<Uuid>,
    started_at: Option<DateTime<Utc>>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn attempt_id(&self) -> Option<Uuid> {
        self.attempt_id
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Re-submission is disabled while an attempt is in flight.
    pub fn can_submit(&self) -> bool {
        !self.state.is_loading()
    }

    /// Enters `Loading`, dropping the previous media, revised prompt and
    /// error. Returns `None` when an attempt is already in flight.
    pub fn begin(&mut self) -> Option<Uuid> {
        if !self.can_submit() {
            log::warn!(
                "Ignoring submission: attempt {:?} is still loading",
                self.attempt_id
            );
            return None;
        }

        let attempt_id = Uuid::new_v4();
        self.state = GenerationState::Loading;
        self.attempt_id = Some(attempt_id);
        self.started_at = Some(Utc::now());
        log::debug!("Attempt {} started", attempt_id);
        Some(attempt_id)
    }

    pub fn succeed(&mut self, media: MediaDescriptor) -> bool {
        if !self.state.is_loading() {
            log::warn!("Dropping success result outside of a loading attempt");
            return false;
        }
        log::info!("Attempt {:?} succeeded: {}", self.attempt_id, media.url);
        self.state = GenerationState::Success(media);
        true
    }

    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if !self.state.is_loading() {
            log::warn!("Dropping failure result outside of a loading attempt");
            return false;
        }
        let message = message.into();
        log::error!("Attempt {:?} failed: {}", self.attempt_id, message);
        self.state = GenerationState::Error { message };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_submittable() {
        let session = GenerationSession::new();
        assert_eq!(session.state(), &GenerationState::Idle);
        assert!(session.can_submit());
        assert!(session.attempt_id().is_none());
    }

    #[test]
    fn begin_rejects_while_loading() {
        let mut session = GenerationSession::new();
        let first = session.begin().unwrap();
        assert!(session.state().is_loading());
        assert!(!session.can_submit());
        assert!(session.begin().is_none());
        assert_eq!(session.attempt_id(), Some(first));
    }

    #[test]
    fn new_attempt_discards_previous_result() {
        let mut session = GenerationSession::new();
        session.begin();
        assert!(session.succeed(MediaDescriptor::new("https://cdn/a.mp4", Some("x".into()))));
        assert!(session.state().media().is_some());

        let second = session.begin().unwrap();
        assert_eq!(session.state(), &GenerationState::Loading);
        assert_eq!(session.attempt_id(), Some(second));

        assert!(session.fail("bad size"));
        assert_eq!(session.state().error_message(), Some("bad size"));

        session.begin();
        assert!(session.state().error_message().is_none());
    }

    #[test]
    fn terminal_transitions_require_loading() {
        let mut session = GenerationSession::new();
        assert!(!session.fail("nope"));
        assert!(!session.succeed(MediaDescriptor::new("https://cdn/a.mp4", None)));
        assert_eq!(session.state(), &GenerationState::Idle);

        session.begin();
        session.fail("first");
        assert!(!session.fail("second"));
        assert_eq!(session.state().error_message(), Some("first"));
    }
}
