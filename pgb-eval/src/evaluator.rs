//! Evaluators and their registry
//!
//! An evaluator runs one source file through a language toolchain and
//! hands back the raw output. The registry maps language tags to
//! evaluators; every entry is added by an explicit `register` call.

use crate::classifier::Markers;
use crate::command::{run_command_sync, CommandOutput};
use crate::config::{expand_command, EvaluatorSpec};
use crate::error::EvalError;
use anyhow::Result;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Grace period for a toolchain's shutdown command
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

pub trait Evaluator: Send + Sync {
    /// Canonical language tag
    fn language(&self) -> &str;

    /// Extension, without the dot, for the program's temp file
    fn extension(&self) -> &str;

    fn markers(&self) -> &Markers;

    /// Run the program at `path`
    fn evaluate(&self, path: &Path, limit: Duration) -> Result<CommandOutput>;

    /// Stop anything the toolchain left running. Called after every run;
    /// evaluators without a resident server return `Ok(())`.
    fn shutdown(&self) -> Result<()>;
}

/// Evaluator that shells out to a command line toolchain
#[derive(Debug, Clone)]
pub struct ToolchainEvaluator {
    spec: EvaluatorSpec,
    markers: Markers,
}

impl ToolchainEvaluator {
    pub fn new(spec: EvaluatorSpec) -> Result<Self, EvalError> {
        let invalid = |reason: &str| EvalError::InvalidEvaluator {
            language: spec.language.clone(),
            reason: reason.to_string(),
        };

        if spec.language.is_empty() {
            return Err(invalid("empty language tag"));
        }
        if spec.command.is_empty() {
            return Err(invalid("empty command"));
        }
        if spec.success_marker.is_empty() {
            return Err(invalid("empty success marker"));
        }
        if spec.shutdown.as_ref().is_some_and(|argv| argv.is_empty()) {
            return Err(invalid("empty shutdown command"));
        }

        let markers = Markers {
            success: spec.success_marker.clone(),
            syntax_errors: spec.syntax_error_markers.clone(),
        };
        Ok(Self { spec, markers })
    }

    pub fn spec(&self) -> &EvaluatorSpec {
        &self.spec
    }
}

impl Evaluator for ToolchainEvaluator {
    fn language(&self) -> &str {
        &self.spec.language
    }

    fn extension(&self) -> &str {
        &self.spec.extension
    }

    fn markers(&self) -> &Markers {
        &self.markers
    }

    fn evaluate(&self, path: &Path, limit: Duration) -> Result<CommandOutput> {
        let argv = expand_command(&self.spec.command, path);
        debug!("[{}] {}", self.spec.language, argv.join(" "));
        run_command_sync(&argv, limit)
    }

    fn shutdown(&self) -> Result<()> {
        let Some(argv) = &self.spec.shutdown else {
            return Ok(());
        };
        let output = run_command_sync(argv, SHUTDOWN_TIMEOUT)?;
        if output.timed_out || output.exit_code != 0 {
            warn!(
                "[{}] shutdown '{}' did not finish cleanly (exit code {})",
                self.spec.language,
                argv.join(" "),
                output.exit_code
            );
        }
        Ok(())
    }
}

/// Language tag to evaluator mapping
#[derive(Default, Clone)]
pub struct Registry {
    evaluators: Vec<Arc<dyn Evaluator>>,
    tags: HashMap<String, usize>,
}

impl Registry {
    /// Registry with no evaluators
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in evaluators
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_spec(EvaluatorSpec::pyret()).unwrap_or_else(|e| {
            warn!("Built-in evaluator rejected: {}", e);
        });
        registry
    }

    /// Register `evaluator` under its own tag and `aliases`
    ///
    /// A later registration of the same tag replaces the earlier one.
    pub fn register(&mut self, evaluator: Arc<dyn Evaluator>, aliases: &[String]) {
        let index = self.evaluators.len();
        let language = evaluator.language().to_string();
        debug!("Registering evaluator '{}' (.{})", language, evaluator.extension());

        self.evaluators.push(evaluator);
        for tag in std::iter::once(&language).chain(aliases) {
            self.tags.insert(tag.clone(), index);
        }
    }

    /// Register a command line toolchain
    pub fn register_spec(&mut self, spec: EvaluatorSpec) -> Result<(), EvalError> {
        let aliases = spec.aliases.clone();
        let evaluator = ToolchainEvaluator::new(spec)?;
        self.register(Arc::new(evaluator), &aliases);
        Ok(())
    }

    /// Evaluator for `language`
    ///
    /// Tags are looked up first; an unregistered tag then matches the most
    /// recently registered evaluator with that file extension.
    pub fn resolve(&self, language: &str) -> Result<Arc<dyn Evaluator>, EvalError> {
        if let Some(&index) = self.tags.get(language) {
            return Ok(Arc::clone(&self.evaluators[index]));
        }

        let wanted = language.trim_start_matches('.');
        self.evaluators
            .iter()
            .rev()
            .find(|evaluator| evaluator.extension() == wanted)
            .cloned()
            .ok_or_else(|| EvalError::UnknownLanguage {
                language: language.to_string(),
            })
    }

    /// Every registered tag with the evaluator it resolves to, sorted by tag
    pub fn languages(&self) -> Vec<(String, Arc<dyn Evaluator>)> {
        let mut entries: Vec<_> = self
            .tags
            .iter()
            .map(|(tag, &index)| (tag.clone(), Arc::clone(&self.evaluators[index])))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
