/// Line-oriented buffer backing one session's code. The content is whatever the
/// client sent, verbatim; nothing here inspects or validates it.
#[derive(Debug, Clone)]
pub struct CodeEditorModel {
    pub lines: Vec<String>,
}
