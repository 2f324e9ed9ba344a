pub struct ValidationService;


#[derive(Debug)]
pub enum ValidationError {
    InvalidLanguage(String),
    EmptyCode(),
    EmptyLanguage(),
    EmptyProblemId(),
    MissingSessionId(),
}
