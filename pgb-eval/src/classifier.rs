//! Outcome classification
//!
//! The status of a run depends on the timeout flag and the captured text
//! only. Exit codes are ignored: toolchains use them inconsistently.

use pgb_common::Status;

/// Per-evaluator marker strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    /// Appears on stdout when every test passed
    pub success: String,
    /// Any of these on stderr means the program did not parse
    pub syntax_errors: Vec<String>,
}

impl Markers {
    pub fn new(success: &str, syntax_errors: &[&str]) -> Self {
        Self {
            success: success.to_string(),
            syntax_errors: syntax_errors.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Decide the status of one run, first match wins:
/// timeout, success marker on stdout, syntax marker on stderr, otherwise
/// an exception
pub fn classify(timed_out: bool, stdout: &str, stderr: &str, markers: &Markers) -> Status {
    if timed_out {
        Status::Timeout
    } else if !markers.success.is_empty() && stdout.contains(&markers.success) {
        Status::Ok
    } else if markers
        .syntax_errors
        .iter()
        .any(|m| !m.is_empty() && stderr.contains(m.as_str()))
    {
        Status::SyntaxError
    } else {
        Status::Exception
    }
}
