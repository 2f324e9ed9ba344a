use std::error::Error;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::{
    models::{
        language_models::SubmissionLanguage,
        session_models::{PracticeSession, SessionError, SessionStatus},
        submission_models::{SubmissionKind, SubmissionRequest},
        websocket_message_model::Patch,
    },
    services::session_services::code_editor_service::CodeEditor,
};

/// Buffer a fresh session starts with, until the first edit arrives.
pub const INITIAL_BUFFER: &str = "// Write your code here";

impl PracticeSession {
    pub fn new(
        session_id: String,
        user_id: String,
        problem_id: String,
        language: SubmissionLanguage,
        time_budget_ms: u64,
    ) -> Self {
        Self {
            session_id,
            user_id,
            problem_id,
            language,
            editor: CodeEditor::new(INITIAL_BUFFER),
            status: SessionStatus::Running,
            remaining_ms: time_budget_ms,
            expired_at: None,
        }
    }

    /// Consumes `elapsed_ms` of the remaining budget. The caller measures the
    /// elapsed time from the wall clock, so a delayed tick consumes what
    /// actually passed instead of a fixed period.
    pub fn tick(&mut self, elapsed_ms: u64) -> SessionStatus {
        if self.status == SessionStatus::Expired {
            return self.status;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.status = SessionStatus::Expired;
            self.expired_at = Some(Instant::now());
        }
        self.status
    }

    /// Switches the language selector. An unknown value is rejected before
    /// anything is touched.
    pub fn set_language(&mut self, lang: &str) -> Result<(), SessionError> {
        self.reject_if_expired()?;
        match SubmissionLanguage::from_str(lang) {
            Ok(language) => {
                self.language = language;
                Ok(())
            }
            Err(_) => Err(SessionError::InvalidLanguage(lang.to_string())),
        }
    }

    /// Replaces the buffer verbatim. No validation of the content.
    pub fn edit_code(&mut self, content: &str) -> Result<(), SessionError> {
        self.reject_if_expired()?;
        self.editor.update_from_string(content);
        Ok(())
    }

    /// Incremental form of `edit_code` for editor widgets that send patches.
    pub fn apply_patch(&mut self, patch: &Patch) -> Result<(), SessionError> {
        self.reject_if_expired()?;
        self.editor.apply_patch(patch);
        Ok(())
    }

    pub fn code(&self) -> String {
        self.editor.to_string()
    }

    /// Backs Run and Submit: while the session is Running this snapshots the
    /// buffer/language pair into an immutable request; after expiry no request
    /// ever comes into existence.
    pub fn prepare_submission(
        &self,
        kind: SubmissionKind,
    ) -> Result<SubmissionRequest, SessionError> {
        self.reject_if_expired()?;
        Ok(SubmissionRequest::new(
            self.session_id.clone(),
            self.problem_id.clone(),
            self.language,
            self.code(),
            kind,
        ))
    }

    fn reject_if_expired(&self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Running => Ok(()),
            SessionStatus::Expired => Err(SessionError::Expired(self.session_id.clone())),
        }
    }
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Running => "running",
            SessionStatus::Expired => "expired",
        }
    }
}

impl SubmissionRequest {
    pub fn new(
        session_id: String,
        problem_id: String,
        language: SubmissionLanguage,
        code: String,
        kind: SubmissionKind,
    ) -> Self {
        SubmissionRequest {
            session_id,
            problem_id,
            language,
            code,
            kind,
        }
    }

    pub fn get_session_id(&self) -> &str {
        &self.session_id
    }

    pub fn get_problem_id(&self) -> &str {
        &self.problem_id
    }

    pub fn get_language(&self) -> SubmissionLanguage {
        self.language
    }

    pub fn get_code(&self) -> &str {
        &self.code
    }

    pub fn get_kind(&self) -> SubmissionKind {
        self.kind
    }
}

impl SubmissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Run => "run",
            SubmissionKind::Submit => "submit",
        }
    }
}

impl SessionError {
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session with ID '{}' not found.", id),
            SessionError::Expired(id) => {
                format!("Session '{}' has expired; the attempt is closed.", id)
            }
            SessionError::InvalidLanguage(lang) => {
                format!("Invalid language specified: '{}'.", lang)
            }
            SessionError::SubmissionInFlight(id) => {
                format!("A submission for session '{}' is already in flight.", id)
            }
            SessionError::Unauthenticated(msg) => format!("Unauthenticated: {}", msg),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::websocket_message_model::Position;

    fn session() -> PracticeSession {
        PracticeSession::new(
            "sess1".to_string(),
            "user1".to_string(),
            "problem-86".to_string(),
            SubmissionLanguage::Cpp,
            20_000,
        )
    }

    #[test]
    fn remaining_time_never_increases_or_goes_negative() {
        let mut s = session();
        let mut previous = s.remaining_ms;
        for elapsed in [0, 250, 1_000, 3_000, 999, 40_000, 1_000] {
            s.tick(elapsed);
            assert!(s.remaining_ms <= previous);
            previous = s.remaining_ms;
        }
        assert_eq!(s.remaining_ms, 0);
    }

    #[test]
    fn twenty_one_second_ticks_exhaust_the_default_budget() {
        let mut s = session();
        for _ in 0..19 {
            assert_eq!(s.tick(1_000), SessionStatus::Running);
        }
        assert_eq!(s.tick(1_000), SessionStatus::Expired);
        assert_eq!(s.remaining_ms, 0);
    }

    #[test]
    fn a_delayed_tick_consumes_the_measured_elapsed_time() {
        let mut s = session();
        s.tick(2_500);
        assert_eq!(s.remaining_ms, 17_500);
        assert_eq!(s.status, SessionStatus::Running);
    }

    #[test]
    fn expiry_is_terminal() {
        let mut s = session();
        s.tick(20_000);
        assert_eq!(s.status, SessionStatus::Expired);
        assert_eq!(s.tick(1_000), SessionStatus::Expired);
        assert_eq!(s.remaining_ms, 0);
        assert!(s.edit_code("late edit").is_err());
        assert!(s.set_language("python").is_err());
        assert_eq!(s.language, SubmissionLanguage::Cpp);
        assert_eq!(s.code(), INITIAL_BUFFER);
    }

    #[test]
    fn run_carries_the_current_buffer_and_language() {
        let mut s = session();
        s.edit_code("x=1").unwrap();
        s.set_language("python").unwrap();
        let request = s.prepare_submission(SubmissionKind::Run).unwrap();
        assert_eq!(request.get_code(), "x=1");
        assert_eq!(request.get_language(), SubmissionLanguage::Python);
        assert_eq!(request.get_kind(), SubmissionKind::Run);
        assert_eq!(request.get_problem_id(), "problem-86");
    }

    #[test]
    fn no_submission_request_exists_after_expiry() {
        let mut s = session();
        s.edit_code("x=1").unwrap();
        s.tick(20_000);
        assert!(s.prepare_submission(SubmissionKind::Submit).is_err());
        assert!(s.prepare_submission(SubmissionKind::Run).is_err());
    }

    #[test]
    fn unknown_language_is_rejected_without_mutation() {
        let mut s = session();
        s.edit_code("x=1").unwrap();
        let err = s.set_language("rust").unwrap_err();
        assert!(matches!(err, SessionError::InvalidLanguage(_)));
        assert_eq!(s.language, SubmissionLanguage::Cpp);
        assert_eq!(s.code(), "x=1");
    }

    #[test]
    fn patches_splice_into_the_buffer() {
        let mut s = session();
        s.edit_code("abc\ndef").unwrap();
        s.apply_patch(&Patch {
            start: Position { line: 0, ch: 1 },
            end: Position { line: 1, ch: 2 },
            text: "XY".to_string(),
        })
        .unwrap();
        assert_eq!(s.code(), "aXYf");
    }
}
