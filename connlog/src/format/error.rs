/// Format compilation errors
use thiserror::Error;

/// A format string that cannot be compiled. Always fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown keyword '{name}'")]
    UnknownKeyword { name: String },

    #[error("'%' at offset {offset} is not followed by a keyword name")]
    EmptyKeyword { offset: usize },

    #[error("keyword '{keyword}' requires a parameter starting with '{open}'")]
    MissingParameter { keyword: String, open: char },

    #[error("parameter of keyword '{keyword}' is not terminated by '{close}'")]
    UnterminatedParameter { keyword: String, close: char },

    #[error("invalid time format '{format}' for keyword '{keyword}'")]
    InvalidTimeFormat { keyword: String, format: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keyword_names_offender() {
        let err = FormatError::UnknownKeyword {
            name: "bogus".to_string(),
        };
        assert_eq!(err.to_string(), "unknown keyword 'bogus'");
    }

    #[test]
    fn test_parameter_messages() {
        let missing = FormatError::MissingParameter {
            keyword: "const".to_string(),
            open: '(',
        };
        assert_eq!(
            missing.to_string(),
            "keyword 'const' requires a parameter starting with '('"
        );

        let unterminated = FormatError::UnterminatedParameter {
            keyword: "reqtime".to_string(),
            close: ']',
        };
        assert_eq!(
            unterminated.to_string(),
            "parameter of keyword 'reqtime' is not terminated by ']'"
        );
    }
}
