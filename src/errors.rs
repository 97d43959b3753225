//! Error types for the analysis engine.
//!
//! The engine has exactly two failure modes:
//!
//! - **Parse errors**: the input is not valid Python. The caller can fix the
//!   input and try again; no partial metrics or suggestions are produced.
//! - **Internal errors**: anything else that goes wrong while parsing,
//!   traversing, scoring or synthesizing code. These are defects and are
//!   surfaced as a generic structured error.
//!
//! Both convert into an [`ErrorReport`], the serializable shape handed back
//! to callers in place of an analysis result.
//!
//! # Example
//!
//! ```rust
//! use debtlens::errors::{EngineError, ErrorReport};
//!
//! let err = EngineError::parse("invalid syntax (demo.py, line 3)", "demo.py", 3, 5);
//! assert!(err.is_parse_error());
//!
//! match err.to_report() {
//!     ErrorReport::ParseError { line, .. } => assert_eq!(line, 3),
//!     ErrorReport::EngineError { .. } => unreachable!(),
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Remediation hint attached to every parse error report.
pub const PARSE_ERROR_SUGGESTION: &str = "Check for syntax errors in your Python code";

/// Main error type for engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// The source text is not valid Python
    #[error("{message}")]
    Parse {
        message: String,
        label: String,
        line: usize,
        column: usize,
    },

    /// Unexpected failure inside the engine
    #[error("Engine error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Create a parse error with location
    pub fn parse(
        message: impl Into<String>,
        label: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            label: label.into(),
            line,
            column,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Convert into the structured shape returned to callers.
    pub fn to_report(&self) -> ErrorReport {
        match self {
            Self::Parse {
                message,
                line,
                column,
                ..
            } => ErrorReport::ParseError {
                message: message.clone(),
                suggestion: PARSE_ERROR_SUGGESTION.to_string(),
                line: *line,
                column: *column,
            },
            Self::Internal(message) => ErrorReport::EngineError {
                message: message.clone(),
            },
        }
    }
}

impl From<tree_sitter::LanguageError> for EngineError {
    fn from(err: tree_sitter::LanguageError) -> Self {
        Self::Internal(format!("failed to load Python grammar: {err}"))
    }
}

/// Result type alias using the engine error
pub type Result<T> = std::result::Result<T, EngineError>;

/// Serializable error shape, distinguished by its `kind` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorReport {
    ParseError {
        message: String,
        suggestion: String,
        line: usize,
        column: usize,
    },
    EngineError {
        message: String,
    },
}

impl ErrorReport {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_report_shape() {
        let err = EngineError::parse("invalid syntax (a.py, line 2)", "a.py", 2, 7);
        let json = serde_json::to_value(err.to_report()).unwrap();

        assert_eq!(json["kind"], "parse_error");
        assert_eq!(json["message"], "invalid syntax (a.py, line 2)");
        assert_eq!(json["suggestion"], PARSE_ERROR_SUGGESTION);
        assert_eq!(json["line"], 2);
        assert_eq!(json["column"], 7);
        assert!(json.get("functions").is_none());
    }

    #[test]
    fn test_internal_error_report_shape() {
        let err = EngineError::internal("parser returned no tree");
        let json = serde_json::to_value(err.to_report()).unwrap();

        assert_eq!(json["kind"], "engine_error");
        assert_eq!(json["message"], "parser returned no tree");
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_display_messages() {
        let parse = EngineError::parse("invalid syntax (x.py, line 1)", "x.py", 1, 1);
        assert_eq!(parse.to_string(), "invalid syntax (x.py, line 1)");

        let internal = EngineError::internal("boom");
        assert_eq!(internal.to_string(), "Engine error: boom");
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let report = EngineError::internal("boom").to_report();
        let text = serde_json::to_string(&report).unwrap();
        let back: ErrorReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back, report);
        assert!(!back.is_parse_error());
    }
}
