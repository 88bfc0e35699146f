use anyhow::{Context, Result};
use pgb_common::OUTPUT_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder in evaluator commands replaced by the program's temp file
pub const FILE_PLACEHOLDER: &str = "{file}";

/// Configuration for running evaluations
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub timeout_secs: u64,
    /// Characters kept from each captured output stream
    pub output_limit: usize,
    pub parallel: bool,
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            output_limit: OUTPUT_LIMIT,
            parallel: true,
            verbose: false,
        }
    }
}

/// One evaluator registration, as written in an evaluators file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorSpec {
    pub language: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// File extension without the leading dot
    pub extension: String,
    /// Program and arguments; `{file}` is replaced by the source path
    pub command: Vec<String>,
    pub success_marker: String,
    #[serde(default)]
    pub syntax_error_markers: Vec<String>,
    /// Run after every evaluation to stop a resident toolchain server
    #[serde(default)]
    pub shutdown: Option<Vec<String>>,
}

impl EvaluatorSpec {
    /// The built-in Pyret evaluator
    pub fn pyret() -> Self {
        Self {
            language: "pyret".to_string(),
            aliases: vec!["arr".to_string()],
            extension: "arr".to_string(),
            command: vec!["pyret".to_string(), FILE_PLACEHOLDER.to_string()],
            success_marker: "shipshape".to_string(),
            syntax_error_markers: vec!["Pyret didn't understand".to_string()],
            shutdown: Some(vec!["pyret".to_string(), "--shutdown".to_string()]),
        }
    }
}

/// Load evaluator registrations from a JSON file
pub fn load_evaluator_specs(path: &Path) -> Result<Vec<EvaluatorSpec>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read evaluators file: {}", path.display()))?;
    let specs: Vec<EvaluatorSpec> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid evaluators file: {}", path.display()))?;
    Ok(specs)
}

/// Substitute `{file}` into an argv vector
pub fn expand_command(argv: &[String], file: &Path) -> Vec<String> {
    let file = file.display().to_string();
    argv.iter()
        .map(|arg| arg.replace(FILE_PLACEHOLDER, &file))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.output_limit, 2048);
        assert!(config.parallel);
    }

    #[test]
    fn test_spec_defaults_from_json() {
        let json = r#"[{"language": "sh", "extension": "sh",
                        "command": ["sh", "{file}"], "success_marker": "OK"}]"#;
        let specs: Vec<EvaluatorSpec> = serde_json::from_str(json).unwrap();
        assert_eq!(specs[0].aliases, Vec::<String>::new());
        assert!(specs[0].syntax_error_markers.is_empty());
        assert_eq!(specs[0].shutdown, None);
    }

    #[test]
    fn test_expand_command() {
        let argv = vec!["run".to_string(), "--src={file}".to_string()];
        assert_eq!(
            expand_command(&argv, &PathBuf::from("/tmp/a.arr")),
            vec!["run".to_string(), "--src=/tmp/a.arr".to_string()]
        );
    }

    #[test]
    fn test_load_specs_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evaluators.json");
        std::fs::write(&path, serde_json::to_string(&vec![EvaluatorSpec::pyret()]).unwrap()).unwrap();
        assert_eq!(load_evaluator_specs(&path).unwrap(), vec![EvaluatorSpec::pyret()]);
        assert!(load_evaluator_specs(&dir.path().join("missing.json")).is_err());
    }
}
