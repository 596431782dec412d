use std::path::PathBuf;

use shelf_layout::{ConfigError, PlanError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Exit code for input the planner refuses.
pub const EXIT_INVALID_INPUT: i32 = 2;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid theme list: {0}")]
    Plan(#[from] PlanError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("required path does not exist: {path}")]
    MissingPath { path: PathBuf },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Plan(_) | Self::InvalidArgument { .. } => EXIT_INVALID_INPUT,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_errors_exit_with_invalid_input_code() {
        let error = CliError::from(PlanError::NonPositiveThreshold { threshold: 0 });
        assert_eq!(error.exit_code(), EXIT_INVALID_INPUT);
        assert!(error.to_string().starts_with("invalid theme list:"));
    }

    #[test]
    fn invalid_constructor_sets_message() {
        let error = CliError::invalid("width must be > 0");
        assert_eq!(error.exit_code(), EXIT_INVALID_INPUT);
        assert_eq!(error.to_string(), "invalid argument: width must be > 0");
    }

    #[test]
    fn other_errors_exit_with_one() {
        let error = CliError::MissingPath {
            path: PathBuf::from("/tmp/nowhere.json"),
        };
        assert_eq!(error.exit_code(), 1);
    }
}
