pub use crate::models::validation_models::{ValidationError, ValidationService};
use crate::models::language_models::SubmissionLanguage;

use std::error::Error;
use std::fmt;
use std::str::FromStr;

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation Error : {}", self.to_message())
    }
}

impl Error for ValidationError {}

impl ValidationError {
    pub fn to_message(&self) -> String {
        match self {
            ValidationError::InvalidLanguage(lang) => {
                format!("Invalid language specified: '{}'.", lang)
            }
            ValidationError::EmptyCode() => format!("Code must be provided"),
            ValidationError::EmptyLanguage() => format!("Language must be specified"),
            ValidationError::EmptyProblemId() => format!("Problem ID must be specified"),
            ValidationError::MissingSessionId() => format!("Session ID is required"),
        }
    }
}

impl ValidationService {
    pub fn validate_language(language: &str) -> Result<SubmissionLanguage, ValidationError> {
        if language.is_empty() {
            return Err(ValidationError::EmptyLanguage());
        }
        SubmissionLanguage::from_str(language)
            .map_err(|_| ValidationError::InvalidLanguage(language.to_string()))
    }

    pub fn validate_start_request(
        problem_id: &str,
        language: &str,
    ) -> Result<SubmissionLanguage, ValidationError> {
        if problem_id.trim().is_empty() {
            return Err(ValidationError::EmptyProblemId());
        }
        Self::validate_language(language)
    }

    pub fn validate_submission_code(code: &str) -> Result<(), ValidationError> {
        if code.trim().is_empty() {
            return Err(ValidationError::EmptyCode());
        }
        Ok(())
    }

    pub fn validate_session_id(session_id: &str) -> Result<(), ValidationError> {
        if session_id.is_empty() {
            return Err(ValidationError::MissingSessionId());
        }
        Ok(())
    }
}
