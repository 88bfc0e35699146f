use thiserror::Error;

/// Fatal evaluation errors callers may want to tell apart
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("No evaluator registered for language '{language}'")]
    UnknownLanguage { language: String },

    #[error("Sample index {index} out of range ({count} completions)")]
    SampleOutOfRange { index: usize, count: usize },

    #[error("Invalid evaluator '{language}': {reason}")]
    InvalidEvaluator { language: String, reason: String },
}
