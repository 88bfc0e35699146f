//! Polyglot Bench - Evaluation
//!
//! Runs candidate completions through language toolchains and classifies
//! the outcome of each run.

pub mod classifier;
pub mod cli;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod evaluator;
pub mod reporter;
pub mod runner;

// Re-export commonly used types
pub use classifier::{classify, Markers};
pub use config::{EvaluatorSpec, RunConfig};
pub use dispatcher::Dispatcher;
pub use error::EvalError;
pub use evaluator::{Evaluator, Registry, ToolchainEvaluator};
pub use reporter::StatusSummary;
pub use runner::EvalRunner;
