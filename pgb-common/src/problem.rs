//! Problem records and evaluation results
//!
//! A `Problem` is the unit handed from prompt generation to evaluation:
//! target-language prompt, candidate completions and the translated test
//! suite. Each executed completion yields one `EvaluationOutcome`.

use crate::error::ProblemError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Maximum number of characters kept from each captured output stream
pub const OUTPUT_LIMIT: usize = 2048;

/// A translated benchmark problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default)]
    pub name: String,
    /// Evaluator tag, e.g. `pyret`
    pub language: String,
    pub prompt: String,
    pub tests: String,
    #[serde(default)]
    pub completions: Vec<String>,
    /// Name of the function under test
    #[serde(default)]
    pub entry_point: String,
    #[serde(default)]
    pub stop_tokens: Vec<String>,
}

impl Problem {
    pub fn load(path: &Path) -> Result<Self, ProblemError> {
        read_json(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), ProblemError> {
        write_json(self, path)
    }

    /// Full program text for one sample: prompt, completion, then the tests
    pub fn program(&self, index: usize) -> Option<String> {
        self.completions
            .get(index)
            .map(|completion| format!("{}{}\n{}", self.prompt, completion, self.tests))
    }
}

/// Terminal status of one executed sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    SyntaxError,
    Exception,
    Timeout,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Ok, Status::SyntaxError, Status::Exception, Status::Timeout];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::SyntaxError => "SyntaxError",
            Status::Exception => "Exception",
            Status::Timeout => "Timeout",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result record for one (problem, sample) execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub program: String,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    /// Not stored; rebuilt from `status` when a result list is loaded
    #[serde(skip)]
    pub timed_out: bool,
    pub status: Status,
}

/// All outcomes of one problem, written next to the problem record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultList {
    pub name: String,
    pub language: String,
    pub results: Vec<EvaluationOutcome>,
}

impl ResultList {
    pub fn new(problem: &Problem) -> Self {
        Self {
            name: problem.name.clone(),
            language: problem.language.clone(),
            results: Vec::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ProblemError> {
        let mut list: Self = read_json(path)?;
        for outcome in &mut list.results {
            outcome.timed_out = outcome.status == Status::Timeout;
        }
        Ok(list)
    }

    pub fn save(&self, path: &Path) -> Result<(), ProblemError> {
        write_json(self, path)
    }

    /// Number of outcomes with the given status
    pub fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ProblemError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProblemError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ProblemError::Format {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), ProblemError> {
    let content = serde_json::to_string_pretty(value).map_err(|source| ProblemError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, content).map_err(|source| ProblemError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_problem() -> Problem {
        Problem {
            name: "HumanEval_53_add".to_string(),
            language: "pyret".to_string(),
            prompt: "fun add(x :: Number, y :: Number) -> Number:\n".to_string(),
            tests: "end\n\n\ncheck:\n    candidate = add\nend\n".to_string(),
            completions: vec!["    x + y".to_string()],
            entry_point: "add".to_string(),
            stop_tokens: vec!["\nend".to_string()],
        }
    }

    #[test]
    fn test_program_assembly() {
        let problem = sample_problem();
        let program = problem.program(0).unwrap();
        assert!(program.starts_with("fun add(x :: Number, y :: Number) -> Number:\n    x + y\nend\n"));
        assert!(problem.program(1).is_none());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&Status::Ok).unwrap(), "\"OK\"");
        assert_eq!(serde_json::to_string(&Status::SyntaxError).unwrap(), "\"SyntaxError\"");
        let status: Status = serde_json::from_str("\"Timeout\"").unwrap();
        assert_eq!(status, Status::Timeout);
    }

    #[test]
    fn test_outcome_record_fields() {
        let outcome = EvaluationOutcome {
            program: "p".to_string(),
            stdout: "out".to_string(),
            stderr: String::new(),
            exit_code: 0,
            timed_out: false,
            status: Status::Ok,
        };
        let json: serde_json::Value = serde_json::to_value(&outcome).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(keys, vec!["exit_code", "program", "status", "stderr", "stdout"]);
    }

    #[test]
    fn test_problem_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("add.json");
        sample_problem().save(&path).unwrap();
        assert_eq!(Problem::load(&path).unwrap(), sample_problem());
    }

    #[test]
    fn test_loaded_results_keep_timeouts() {
        let timeout = EvaluationOutcome {
            program: "p".to_string(),
            stdout: String::new(),
            stderr: String::new(),
            exit_code: -1,
            timed_out: true,
            status: Status::Timeout,
        };
        let ok = EvaluationOutcome {
            exit_code: 0,
            timed_out: false,
            status: Status::Ok,
            ..timeout.clone()
        };
        let mut list = ResultList::new(&sample_problem());
        list.results = vec![timeout, ok];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("add.results.json");
        list.save(&path).unwrap();

        let loaded = ResultList::load(&path).unwrap();
        assert_eq!(loaded, list);
        assert_eq!(loaded.count(Status::Timeout), 1);
    }

    #[test]
    fn test_minimal_record_defaults() {
        let json = r#"{"language": "pyret", "prompt": "p", "tests": "t"}"#;
        let problem: Problem = serde_json::from_str(json).unwrap();
        assert!(problem.completions.is_empty());
        assert!(problem.stop_tokens.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Problem::load(Path::new("/nonexistent/problem.json")).unwrap_err();
        assert!(matches!(err, ProblemError::Read { .. }));
    }
}
