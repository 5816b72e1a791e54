//! Error types shared across ShakeCursor crates.
//!
//! Gesture detection and magnification never fail; errors only come from
//! the configuration and trace I/O boundary.

use std::path::PathBuf;

/// Top-level error type for ShakeCursor operations.
#[derive(Debug, thiserror::Error)]
pub enum ShakeCursorError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Trace error: {message}")]
    Trace { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using ShakeCursorError.
pub type ShakeCursorResult<T> = Result<T, ShakeCursorError>;

impl ShakeCursorError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn trace(msg: impl Into<String>) -> Self {
        Self::Trace {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ShakeCursorError::config("bad sensitivity").to_string(),
            "Configuration error: bad sensitivity"
        );
        assert_eq!(
            ShakeCursorError::trace("line 3").to_string(),
            "Trace error: line 3"
        );
        let missing = ShakeCursorError::FileNotFound {
            path: PathBuf::from("/nope/config.json"),
        };
        assert_eq!(missing.to_string(), "File not found: /nope/config.json");
    }

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let wrapped: ShakeCursorError = err.into();
        assert!(matches!(wrapped, ShakeCursorError::Json(_)));
    }
}
