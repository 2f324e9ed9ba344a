use std::fmt;
use std::str::FromStr;

/// Languages offered by the workspace's selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionLanguage {
    Cpp,
    Java,
    Python,
    JavaScript,
}

impl FromStr for SubmissionLanguage {
    type Err = ();

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "cpp" => Ok(SubmissionLanguage::Cpp),
            "java" => Ok(SubmissionLanguage::Java),
            "python" => Ok(SubmissionLanguage::Python),
            "javascript" => Ok(SubmissionLanguage::JavaScript),
            _ => Err(()),
        }
    }
}

impl SubmissionLanguage {
    pub fn is_supported(lang: &str) -> bool {
        SubmissionLanguage::from_str(lang).is_ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionLanguage::Cpp => "cpp",
            SubmissionLanguage::Java => "java",
            SubmissionLanguage::Python => "python",
            SubmissionLanguage::JavaScript => "javascript",
        }
    }
}

impl fmt::Display for SubmissionLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_four_selector_values_parse() {
        assert_eq!(
            SubmissionLanguage::from_str("cpp"),
            Ok(SubmissionLanguage::Cpp)
        );
        assert_eq!(
            SubmissionLanguage::from_str("Java"),
            Ok(SubmissionLanguage::Java)
        );
        assert_eq!(
            SubmissionLanguage::from_str("PYTHON"),
            Ok(SubmissionLanguage::Python)
        );
        assert_eq!(
            SubmissionLanguage::from_str("javascript"),
            Ok(SubmissionLanguage::JavaScript)
        );
    }

    #[test]
    fn anything_else_is_unsupported() {
        assert!(!SubmissionLanguage::is_supported("rust"));
        assert!(!SubmissionLanguage::is_supported("c++"));
        assert!(!SubmissionLanguage::is_supported(""));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for lang in [
            SubmissionLanguage::Cpp,
            SubmissionLanguage::Java,
            SubmissionLanguage::Python,
            SubmissionLanguage::JavaScript,
        ] {
            assert_eq!(SubmissionLanguage::from_str(lang.as_str()), Ok(lang));
        }
    }
}
