pub use crate::models::websocket_message_model::{Code, EditorAck, EditorMessage, Patch, Position};
use crate::models::session_models::{PracticeSession, SessionError};
use crate::utils::helper_utils::format_remaining;

impl EditorMessage {
    /// Applies this message to the session: the language switch first (when
    /// present), then the buffer edit. The first failure wins and state is left
    /// as it was at that point.
    pub fn apply_to(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        if let Some(language) = &self.language {
            session.set_language(language)?;
        }
        match &self.code {
            Code::Full { content } => session.edit_code(content)?,
            Code::Patch { patches } => {
                for patch in patches {
                    session.apply_patch(patch)?;
                }
            }
        }
        Ok(())
    }
}

impl EditorAck {
    pub fn for_session(session: &PracticeSession) -> Self {
        EditorAck {
            session_id: session.session_id.clone(),
            status: session.status.as_str().to_string(),
            remaining_ms: session.remaining_ms,
            clock: format_remaining(session.remaining_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::language_models::SubmissionLanguage;

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
    fn full_messages_parse_and_replace_the_buffer() {
        let message: EditorMessage = serde_json::from_str(
            r#"{"session_id": "sess1", "code_type": "full", "content": "x = 1"}"#,
        )
        .unwrap();
        let mut s = session();
        message.apply_to(&mut s).unwrap();
        assert_eq!(s.code(), "x = 1");
        assert_eq!(s.language, SubmissionLanguage::Cpp);
    }

    #[test]
    fn patch_messages_parse_and_splice() {
        let message: EditorMessage = serde_json::from_str(
            r#"{
                "session_id": "sess1",
                "language": "python",
                "code_type": "patch",
                "patches": [
                    {"start": {"line": 0, "ch": 0}, "end": {"line": 0, "ch": 23}, "text": "x = 42"}
                ]
            }"#,
        )
        .unwrap();
        let mut s = session();
        message.apply_to(&mut s).unwrap();
        assert_eq!(s.code(), "x = 42");
        assert_eq!(s.language, SubmissionLanguage::Python);
    }

    #[test]
    fn an_invalid_language_switch_leaves_the_session_untouched() {
        let message: EditorMessage = serde_json::from_str(
            r#"{"session_id": "sess1", "language": "cobol", "code_type": "full", "content": "y"}"#,
        )
        .unwrap();
        let mut s = session();
        assert!(message.apply_to(&mut s).is_err());
        assert_eq!(s.language, SubmissionLanguage::Cpp);
        assert_ne!(s.code(), "y");
    }

    #[test]
    fn edits_after_expiry_are_refused() {
        let message: EditorMessage = serde_json::from_str(
            r#"{"session_id": "sess1", "code_type": "full", "content": "late"}"#,
        )
        .unwrap();
        let mut s = session();
        s.tick(20_000);
        assert!(matches!(
            message.apply_to(&mut s),
            Err(SessionError::Expired(_))
        ));
    }

    #[test]
    fn the_ack_renders_the_countdown() {
        let s = session();
        let ack = EditorAck::for_session(&s);
        assert_eq!(ack.remaining_ms, 20_000);
        assert_eq!(ack.clock, "0:20");
        assert_eq!(ack.status, "running");
    }
}
