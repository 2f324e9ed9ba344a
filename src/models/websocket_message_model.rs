use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patch {
    pub start: Position,
    pub end: Position,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "code_type", rename_all = "lowercase")]
pub enum Code {
    Full { content: String },
    Patch { patches: Vec<Patch> },
}

// PRIMARY STRUCTURE FOR EDITOR CHANNEL MESSAGES
#[derive(Debug, Serialize, Deserialize)]
pub struct EditorMessage {
    pub session_id: String,
    /// Present when the client switched the language selector.
    pub language: Option<String>,
    #[serde(flatten)]
    pub code: Code,
}

/// Reply sent after a message was applied: the countdown as the workspace
/// header shows it, plus the raw state for clients that render their own.
#[derive(Debug, Serialize)]
pub struct EditorAck {
    pub session_id: String,
    pub status: String,
    pub remaining_ms: u64,
    pub clock: String,
}

/***
 * Example message (as JSON):
 * {
 *   "session_id": "4c2d0f66-…",
 *   "code_type": "full",
 *   "content": "int main() { return 0; }"
 * }
//
 * Or for a patch alongside a language switch:
 * {
 *   "session_id": "4c2d0f66-…",
 *   "language": "python",
 *   "code_type": "patch",
 *   "patches": [
 *     {
 *       "start": { "line": 1, "ch": 0 },
 *       "end": { "line": 1, "ch": 5 },
 *       "text": "x = 42"
 *     }
 *   ]
 * }
*/
