use dashmap::DashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::models::{code_editor_models::CodeEditorModel, language_models::SubmissionLanguage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Expired,
}

/// One timed exercise attempt. The clock only moves while the attempt is
/// Running; once `remaining_ms` hits 0 the attempt is Expired for good.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    pub session_id: String,
    pub user_id: String,
    pub problem_id: String,
    pub language: SubmissionLanguage,
    pub editor: CodeEditorModel,
    pub status: SessionStatus,
    pub remaining_ms: u64,
    pub expired_at: Option<Instant>,
}

#[derive(Debug, Clone)]
pub enum SessionError {
    NotFound(String),
    Expired(String),
    InvalidLanguage(String),
    SubmissionInFlight(String),
    Unauthenticated(String),
}

pub struct SessionCache {
    pub sessions: Arc<DashMap<String, PracticeSession>>,
}
