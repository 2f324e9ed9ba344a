use crate::models::language_models::SubmissionLanguage;

/// Whether the user hit Run (sample tests) or Submit (full judging). The engine
/// treats both the same way; the judge does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Run,
    Submit,
}

/// Payload sent to the judge collaborator. Built from the session buffer by a
/// user action and immutable once built.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub(crate) session_id: String,
    pub(crate) problem_id: String,
    pub(crate) language: SubmissionLanguage,
    pub(crate) code: String,
    pub(crate) kind: SubmissionKind,
}

#[derive(Debug, Clone)]
pub struct JudgeVerdict {
    pub passed: bool,
    pub output: String,
}

#[derive(Debug)]
pub enum JudgeError {
    /// Connect/transport/5xx failure; safe to retry.
    TransientNetwork(String),
    /// Deadline exceeded; retry with backoff.
    Timeout,
    /// The judge rejected the submission; carries the diagnostic. Not retryable.
    Rejected(String),
}
