//! Evaluation dispatcher
//!
//! Assembles a candidate program, runs it through the evaluator registered
//! for the problem's language and turns the raw output into an
//! `EvaluationOutcome`.

use crate::classifier::{classify, Markers};
use crate::command::CommandOutput;
use crate::config::RunConfig;
use crate::error::EvalError;
use crate::evaluator::{Evaluator, Registry};
use anyhow::{Context, Result};
use log::{debug, warn};
use pgb_common::{EvaluationOutcome, Problem};
use std::io::Write;
use std::time::Duration;

/// Number-formatting artifact some toolchains print on stdout
pub const STDOUT_SENTINEL: &str = "!!int";

pub struct Dispatcher {
    registry: Registry,
    config: RunConfig,
}

impl Dispatcher {
    pub fn new(registry: Registry, config: RunConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run completion `index` of `problem`, then shut the toolchain down
    pub fn execute_candidate(&self, problem: &Problem, index: usize) -> Result<EvaluationOutcome> {
        let program = candidate_program(problem, index)?;
        self.execute(&problem.language, program, true)
    }

    /// Run completion `index` of `problem` and leave the toolchain running.
    /// Other runs may share the toolchain; the caller stops it with
    /// [`Dispatcher::finish_shared`] once all of them are done.
    pub fn execute_candidate_shared(&self, problem: &Problem, index: usize) -> Result<EvaluationOutcome> {
        let program = candidate_program(problem, index)?;
        self.execute(&problem.language, program, false)
    }

    /// Run a complete program written in `language`, then shut the toolchain down
    pub fn execute_program(&self, language: &str, program: String) -> Result<EvaluationOutcome> {
        self.execute(language, program, true)
    }

    /// Shut the toolchain for `language` down once the shared runs that
    /// produced `result` are all done
    pub fn finish_shared<T>(&self, language: &str, result: Result<T>) -> Result<T> {
        let evaluator = self.registry.resolve(language)?;
        finish_run(evaluator.as_ref(), result)
    }

    fn execute(&self, language: &str, program: String, shutdown: bool) -> Result<EvaluationOutcome> {
        let evaluator = self.registry.resolve(language)?;
        let raw = self.run_in_temp_file(evaluator.as_ref(), &program);
        let raw = if shutdown {
            finish_run(evaluator.as_ref(), raw)?
        } else {
            raw?
        };

        let outcome = finish_outcome(program, raw, evaluator.markers(), self.config.output_limit);
        debug!(
            "[{}] {} (exit code {})",
            evaluator.language(),
            outcome.status,
            outcome.exit_code
        );
        Ok(outcome)
    }

    /// Write `program` to a temp file and run it.
    /// The file is removed when this returns, on every path.
    fn run_in_temp_file(&self, evaluator: &dyn Evaluator, program: &str) -> Result<CommandOutput> {
        let mut file = tempfile::Builder::new()
            .prefix("pgb-")
            .suffix(&format!(".{}", evaluator.extension()))
            .tempfile()
            .context("Failed to create temp file for program")?;
        file.write_all(program.as_bytes())
            .and_then(|_| file.flush())
            .with_context(|| format!("Failed to write program to {}", file.path().display()))?;

        let limit = Duration::from_secs(self.config.timeout_secs);
        evaluator.evaluate(file.path(), limit)
    }
}

fn candidate_program(problem: &Problem, index: usize) -> Result<String> {
    problem.program(index).ok_or_else(|| {
        EvalError::SampleOutOfRange {
            index,
            count: problem.completions.len(),
        }
        .into()
    })
}

/// Shut `evaluator` down after a run that produced `result`
///
/// A shutdown failure is an error only when the run itself succeeded;
/// otherwise the run's own error is kept and the failure logged.
fn finish_run<T>(evaluator: &dyn Evaluator, result: Result<T>) -> Result<T> {
    let shutdown = evaluator.shutdown();
    match (&result, shutdown) {
        (Ok(_), Err(e)) => {
            return Err(e).with_context(|| format!("Failed to shut down {}", evaluator.language()));
        }
        (Err(_), Err(e)) => warn!("[{}] shutdown failed: {:#}", evaluator.language(), e),
        _ => {}
    }
    result
}

/// Normalize raw output into an outcome
///
/// Output is decoded lossily and the sentinel removed from stdout before
/// either stream is cut to `limit` characters. The status is decided on the
/// full streams so a marker past the limit still counts.
pub fn finish_outcome(
    program: String,
    raw: CommandOutput,
    markers: &Markers,
    limit: usize,
) -> EvaluationOutcome {
    let stdout = String::from_utf8_lossy(&raw.stdout).replace(STDOUT_SENTINEL, "");
    let stderr = String::from_utf8_lossy(&raw.stderr);
    let status = classify(raw.timed_out, &stdout, &stderr, markers);

    EvaluationOutcome {
        program,
        stdout: truncate_chars(&stdout, limit),
        stderr: truncate_chars(&stderr, limit),
        exit_code: raw.exit_code,
        timed_out: raw.timed_out,
        status,
    }
}

/// The first `limit` characters of `text`
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgb_common::Status;

    fn raw(stdout: &[u8], stderr: &[u8]) -> CommandOutput {
        CommandOutput {
            exit_code: 0,
            stdout: stdout.to_vec(),
            stderr: stderr.to_vec(),
            timed_out: false,
        }
    }

    fn markers() -> Markers {
        Markers::new("shipshape", &["Pyret didn't understand"])
    }

    #[test]
    fn test_sentinel_removed_before_truncation() {
        let limit = 2048;
        let mut stdout = "!!int".repeat(10);
        stdout.push_str(&"x".repeat(limit));
        stdout.push_str("!!int");

        let outcome = finish_outcome(String::new(), raw(stdout.as_bytes(), b""), &markers(), limit);
        assert_eq!(outcome.stdout.chars().count(), limit);
        assert!(outcome.stdout.chars().all(|c| c == 'x'));
    }

    #[test]
    fn test_no_partial_sentinel_at_boundary() {
        let limit = 2048;
        let stdout = format!("{}!!int{}", "a".repeat(limit - 2), "b".repeat(10));
        let outcome = finish_outcome(String::new(), raw(stdout.as_bytes(), b""), &markers(), limit);
        assert_eq!(outcome.stdout, format!("{}bb", "a".repeat(limit - 2)));
        assert!(!outcome.stdout.contains('!'));
    }

    #[test]
    fn test_lossy_decoding() {
        let outcome = finish_outcome(String::new(), raw(b"ok \xff\xfe", b"\xc3"), &markers(), 2048);
        assert_eq!(outcome.stdout, "ok \u{fffd}\u{fffd}");
        assert_eq!(outcome.stderr, "\u{fffd}");
        assert_eq!(outcome.status, Status::Exception);
    }

    #[test]
    fn test_marker_beyond_limit_still_counts() {
        let stdout = format!("{}Looks shipshape", "x".repeat(100));
        let outcome = finish_outcome(String::new(), raw(stdout.as_bytes(), b""), &markers(), 10);
        assert_eq!(outcome.status, Status::Ok);
        assert_eq!(outcome.stdout, "x".repeat(10));
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 5), "hi");
    }

    #[test]
    fn test_sample_out_of_range() {
        let dispatcher = Dispatcher::new(Registry::with_builtins(), RunConfig::default());
        let problem = Problem {
            name: "p".to_string(),
            language: "pyret".to_string(),
            prompt: String::new(),
            tests: String::new(),
            completions: vec![],
            entry_point: String::new(),
            stop_tokens: vec![],
        };
        let err = dispatcher.execute_candidate(&problem, 0).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EvalError>(),
            Some(&EvalError::SampleOutOfRange { index: 0, count: 0 })
        );
    }

    #[test]
    fn test_unknown_language_runs_nothing() {
        let dispatcher = Dispatcher::new(Registry::new(), RunConfig::default());
        let err = dispatcher.execute_program("cobol", "DISPLAY 'HI'.".to_string()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EvalError>(),
            Some(EvalError::UnknownLanguage { .. })
        ));
    }
}
