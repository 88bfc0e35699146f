//! Translation errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslateError {
    /// The problem uses something the target cannot express; the problem is
    /// skipped rather than the run aborted
    #[error("Unsupported in target {target}: {construct}")]
    Unsupported { target: String, construct: String },

    /// The generator was handed an impossible signature
    #[error("Internal translation error: {message}")]
    Internal { message: String },
}

impl TranslateError {
    pub fn unsupported(target: &str, construct: impl Into<String>) -> Self {
        TranslateError::Unsupported {
            target: target.to_string(),
            construct: construct.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        TranslateError::Internal {
            message: message.into(),
        }
    }
}
