//! Error types for predicates and shrink configuration.

use std::any::Any;
use std::fmt;

/// Error reported by a predicate under shrinking
///
/// Only [`PredicateError::Regression`] means "this candidate reproduces the
/// failure". Every other variant aborts the search and is handed back to the
/// caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateError {
    /// The assertion under test failed for this input
    Regression { message: String },

    /// The predicate itself broke (a bug in the test, not in the code under test)
    Internal {
        message: String,
        source_message: Option<String>,
    },

    /// The surrounding test run was cancelled
    Cancelled { reason: String },
}

impl fmt::Display for PredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateError::Regression { message } => {
                write!(f, "Assertion failed: {}", message)
            }
            PredicateError::Internal {
                message,
                source_message,
            } => {
                write!(f, "Predicate error: {}", message)?;
                if let Some(src) = source_message {
                    write!(f, " (source: {})", src)?;
                }
                Ok(())
            }
            PredicateError::Cancelled { reason } => {
                write!(f, "Shrinking cancelled: {}", reason)
            }
        }
    }
}

impl std::error::Error for PredicateError {}

impl PredicateError {
    /// Create the designated "still failing" signal
    pub fn regression(message: impl Into<String>) -> Self {
        Self::Regression {
            message: message.into(),
        }
    }

    /// Create an internal predicate error
    pub fn internal(message: impl Into<String>, source_message: Option<impl Into<String>>) -> Self {
        Self::Internal {
            message: message.into(),
            source_message: source_message.map(|s| s.into()),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(reason: impl Into<String>) -> Self {
        Self::Cancelled {
            reason: reason.into(),
        }
    }

    /// Build a regression from a caught panic payload
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "predicate panicked".to_string()
        };
        Self::regression(message)
    }

    /// Whether this is the designated regression signal
    pub fn is_regression(&self) -> bool {
        matches!(self, PredicateError::Regression { .. })
    }

    /// Whether this error came from cooperative cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PredicateError::Cancelled { .. })
    }
}

/// Configuration parsing and validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Unknown shrinking mode name
    InvalidMode(String),
    /// Bound of a bounded mode is not a non-negative integer
    InvalidBound(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMode(mode) => write!(
                f,
                "Invalid shrinking mode: {} (expected off, unbounded or bounded:<n>)",
                mode
            ),
            ConfigError::InvalidBound(bound) => {
                write!(f, "Invalid shrink bound: {} (must be >= 0)", bound)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_predicate_error_display() {
        let error = PredicateError::regression("length 5 >= 4");
        assert_eq!(format!("{}", error), "Assertion failed: length 5 >= 4");

        let error = PredicateError::internal("index out of bounds", Some("fixture"));
        assert_eq!(
            format!("{}", error),
            "Predicate error: index out of bounds (source: fixture)"
        );

        let error = PredicateError::internal("no source", None::<String>);
        assert_eq!(format!("{}", error), "Predicate error: no source");

        let error = PredicateError::cancelled("test run aborted");
        assert_eq!(format!("{}", error), "Shrinking cancelled: test run aborted");
    }

    #[test]
    fn test_predicate_error_classification() {
        assert!(PredicateError::regression("x").is_regression());
        assert!(!PredicateError::regression("x").is_cancelled());
        assert!(PredicateError::cancelled("x").is_cancelled());
        assert!(!PredicateError::cancelled("x").is_regression());
        assert!(!PredicateError::internal("x", None::<String>).is_regression());
    }

    #[test]
    fn test_from_panic_payloads() {
        let error = PredicateError::from_panic(Box::new("static message"));
        assert_eq!(error, PredicateError::regression("static message"));

        let error = PredicateError::from_panic(Box::new(String::from("owned message")));
        assert_eq!(error, PredicateError::regression("owned message"));

        let error = PredicateError::from_panic(Box::new(42u8));
        assert_eq!(error, PredicateError::regression("predicate panicked"));
    }

    #[test]
    fn test_error_trait_objects() {
        let error: Box<dyn Error> = Box::new(PredicateError::regression("x"));
        assert!(error.source().is_none());

        let error: Box<dyn Error> = Box::new(ConfigError::InvalidMode("sometimes".into()));
        assert!(error.to_string().contains("sometimes"));
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            format!("{}", ConfigError::InvalidBound("-3".into())),
            "Invalid shrink bound: -3 (must be >= 0)"
        );
    }
}
