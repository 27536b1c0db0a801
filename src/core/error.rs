use std::fmt;

use crate::core::constants::error_messages;

/// Run-level error types for uacheck operations.
///
/// Per-candidate failures never surface here; they are captured as
/// [`FailureReason`](crate::core::types::FailureReason) values instead.
#[derive(Debug)]
pub enum UaCheckError {
    /// IO error (file operations, stdin, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// Regex compilation error
    Regex(regex::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// File not found error
    FileNotFound(String),

    /// A candidate string was empty or blank
    InvalidCandidate(String),

    /// The input source supplied zero candidates
    NoCandidates,

    /// Fewer outcomes were collected than candidates dispatched
    Incomplete { expected: usize, received: usize },

    /// Interactive prompt error
    Prompt(dialoguer::Error),

    /// Engine invariant broken (closed gate, lost consumer)
    Internal(String),
}

impl fmt::Display for UaCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UaCheckError::Io(err) => write!(f, "IO error: {err}"),
            UaCheckError::Config(msg) => write!(f, "Configuration error: {msg}"),
            UaCheckError::Http(err) => write!(f, "HTTP error: {err}"),
            UaCheckError::Regex(err) => write!(f, "Regex error: {err}"),
            UaCheckError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            UaCheckError::FileNotFound(path) => write!(f, "File not found: {path}"),
            UaCheckError::InvalidCandidate(msg) => write!(f, "Invalid candidate: {msg}"),
            UaCheckError::NoCandidates => {
                write!(f, "Input error: {}", error_messages::NO_CANDIDATES)
            }
            UaCheckError::Incomplete { expected, received } => write!(
                f,
                "Run incomplete: expected {expected} outcomes, received {received}"
            ),
            UaCheckError::Prompt(err) => write!(f, "Prompt error: {err}"),
            UaCheckError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for UaCheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UaCheckError::Io(err) => Some(err),
            UaCheckError::Http(err) => Some(err),
            UaCheckError::Regex(err) => Some(err),
            UaCheckError::TomlParsing(err) => Some(err),
            UaCheckError::Prompt(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for UaCheckError {
    fn from(err: std::io::Error) -> Self {
        UaCheckError::Io(err)
    }
}

impl From<reqwest::Error> for UaCheckError {
    fn from(err: reqwest::Error) -> Self {
        UaCheckError::Http(err)
    }
}

impl From<regex::Error> for UaCheckError {
    fn from(err: regex::Error) -> Self {
        UaCheckError::Regex(err)
    }
}

impl From<toml::de::Error> for UaCheckError {
    fn from(err: toml::de::Error) -> Self {
        UaCheckError::TomlParsing(err)
    }
}

impl From<dialoguer::Error> for UaCheckError {
    fn from(err: dialoguer::Error) -> Self {
        UaCheckError::Prompt(err)
    }
}

/// Type alias for Results using UaCheckError
pub type Result<T> = std::result::Result<T, UaCheckError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = UaCheckError::Config("Invalid timeout".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: Invalid timeout"
        );

        let file_error = UaCheckError::FileNotFound("/path/to/agents.txt".to_string());
        assert_eq!(format!("{file_error}"), "File not found: /path/to/agents.txt");
    }

    #[test]
    fn test_no_candidates_message() {
        let err = UaCheckError::NoCandidates;
        assert!(err.to_string().contains("no candidates to evaluate"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_incomplete_message() {
        let err = UaCheckError::Incomplete {
            expected: 5,
            received: 4,
        };
        assert_eq!(
            err.to_string(),
            "Run incomplete: expected 5 outcomes, received 4"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err = UaCheckError::from(io_error);

        assert!(matches!(err, UaCheckError::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    #[allow(clippy::invalid_regex)]
    fn test_error_from_regex() {
        let regex_error = regex::Regex::new("[invalid").unwrap_err();
        let err = UaCheckError::from(regex_error);

        assert!(matches!(err, UaCheckError::Regex(_)));
        assert!(format!("{err}").starts_with("Regex error:"));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let err = UaCheckError::from(toml_error);

        assert!(matches!(err, UaCheckError::TomlParsing(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_no_source_variants() {
        let errors_without_source = vec![
            UaCheckError::Config("test".to_string()),
            UaCheckError::FileNotFound("test".to_string()),
            UaCheckError::InvalidCandidate("test".to_string()),
            UaCheckError::NoCandidates,
            UaCheckError::Internal("test".to_string()),
            UaCheckError::Incomplete {
                expected: 1,
                received: 0,
            },
        ];

        for error in errors_without_source {
            assert!(error.source().is_none());
            assert!(format!("{error}").contains(':'));
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UaCheckError>();
    }
}
