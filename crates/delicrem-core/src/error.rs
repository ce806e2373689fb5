//! Error types for the Delicrem dashboard

use std::{error::Error as StdError, fmt};

/// Main error type for the dashboard
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Client-side validation error
    Validation {
        /// Wire name of the field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// The request never produced a response
    Request {
        /// Transport error message
        message: String,
    },

    /// The API answered with a non-success status
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Not found error
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// Serialization error
    Serialization(serde_json::Error),

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a validation error for a wire field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this error was raised locally before any request was sent
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::Request { message } => write!(f, "Request failed: {message}"),
            Self::Api { status, message } => write!(f, "API returned {status}: {message}"),
            Self::NotFound { resource } => write!(f, "Resource not found: {resource}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let app_error = Error::from(io_error);

        assert!(matches!(app_error, Error::Io(_)));
        assert!(format!("{}", app_error).contains("I/O error"));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_validation_error() {
        let error = Error::validation("id_cliente", "Campo requerido");

        assert!(error.is_validation());
        assert_eq!(
            format!("{}", error),
            "Validation error: id_cliente - Campo requerido"
        );
    }

    #[test]
    fn test_api_error() {
        let error = Error::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        };

        assert!(!error.is_validation());
        assert_eq!(format!("{}", error), "API returned 500: Internal Server Error");
    }

    #[test]
    fn test_request_error() {
        let error = Error::Request {
            message: "connection refused".to_string(),
        };
        assert_eq!(format!("{}", error), "Request failed: connection refused");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let app_error = Error::from(json_error);

        assert!(matches!(app_error, Error::Serialization(_)));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_all_error_display_variants() {
        let test_cases = vec![
            (Error::Io(io::Error::other("test")), "I/O error:"),
            (
                Error::Configuration {
                    message: "bad page size".to_string(),
                },
                "Configuration error: bad page size",
            ),
            (
                Error::NotFound {
                    resource: "pedido 7".to_string(),
                },
                "Resource not found: pedido 7",
            ),
            (Error::Other("other error".to_string()), "other error"),
        ];

        for (error, expected) in test_cases {
            let display = format!("{}", error);
            assert!(
                display.contains(expected),
                "Error display '{}' should contain '{}'",
                display,
                expected
            );
        }
    }
}
