use crate::dispatcher::Dispatcher;
use crate::reporter::{print_outcome, ProgressReporter, StatusSummary};
use anyhow::{Context, Result};
use log::info;
use pgb_common::{EvaluationOutcome, Problem, ResultList};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

const RESULTS_SUFFIX: &str = ".results.json";

/// Evaluates every completion of one or more problems
pub struct EvalRunner {
    dispatcher: Dispatcher,
}

impl EvalRunner {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Run all completions of `problem`, in completion order
    ///
    /// The samples share one toolchain, which is shut down once after the
    /// last of them finishes.
    pub fn run_problem(&self, problem: &Problem) -> Result<ResultList> {
        let mut results = ResultList::new(problem);
        if problem.completions.is_empty() {
            return Ok(results);
        }

        let indices: Vec<usize> = (0..problem.completions.len()).collect();
        let config = self.dispatcher.config();

        let outcomes = if config.parallel && indices.len() > 1 {
            let progress = ProgressReporter::new(indices.len());
            let outcomes = indices
                .par_iter()
                .map(|&index| {
                    let outcome = self.dispatcher.execute_candidate_shared(problem, index);
                    progress.update(&format!("{} #{}", problem.name, index));
                    outcome
                })
                .collect::<Result<Vec<EvaluationOutcome>>>();
            progress.finish();
            outcomes
        } else {
            indices
                .iter()
                .map(|&index| self.dispatcher.execute_candidate_shared(problem, index))
                .collect::<Result<Vec<EvaluationOutcome>>>()
        };

        results.results = self.dispatcher.finish_shared(&problem.language, outcomes)?;
        Ok(results)
    }

    /// Evaluate the problem stored at `path` and write its results next to it
    pub fn run_file(&self, path: &Path) -> Result<StatusSummary> {
        let start = Instant::now();
        let problem = Problem::load(path)?;
        info!(
            "Evaluating {} ({} completions, {})",
            path.display(),
            problem.completions.len(),
            problem.language
        );

        let results = self.run_problem(&problem)?;

        let verbose = self.dispatcher.config().verbose;
        let mut summary = StatusSummary::default();
        println!("\n{}:", display_name(&problem, path));
        for (index, outcome) in results.results.iter().enumerate() {
            print_outcome(index, outcome, verbose);
            summary.add(outcome);
        }

        let output = results_path(path);
        results
            .save(&output)
            .with_context(|| format!("Failed to save results for {}", path.display()))?;
        info!("Wrote {}", output.display());

        summary.total_duration_ms = start.elapsed().as_millis() as u64;
        Ok(summary)
    }
}

fn display_name(problem: &Problem, path: &Path) -> String {
    if problem.name.is_empty() {
        path.display().to_string()
    } else {
        problem.name.clone()
    }
}

/// `<dir>/<stem>.results.json` for a problem at `<dir>/<stem>.json`
pub fn results_path(problem_path: &Path) -> PathBuf {
    let stem = problem_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    problem_path.with_file_name(format!("{stem}{RESULTS_SUFFIX}"))
}

/// Problem files named by `input`: the file itself, or every problem
/// record in a directory (result files excluded), sorted
pub fn find_problem_files(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let pattern = input.join("*.json");
    let pattern = pattern.to_string_lossy();
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid search pattern: {pattern}"))?
        .filter_map(|entry| entry.ok())
        .filter(|path| !path.to_string_lossy().ends_with(RESULTS_SUFFIX))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_path() {
        assert_eq!(
            results_path(Path::new("out/HumanEval_0.json")),
            PathBuf::from("out/HumanEval_0.results.json")
        );
    }

    #[test]
    fn test_find_problem_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.json", "a.results.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        let files = find_problem_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);

        let single = dir.path().join("a.json");
        assert_eq!(find_problem_files(&single).unwrap(), vec![single]);
    }
}
