use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pgb-eval",
    about = "Evaluate completions of translated benchmark problems",
    long_about = "pgb-eval - Polyglot Bench evaluator\n\nRuns candidate completions through per-language toolchains and classifies each run as OK, SyntaxError, Exception or Timeout.",
    version
)]
pub struct Cli {
    /// Timeout in seconds for each program
    #[arg(short, long, default_value = "15", global = true)]
    pub timeout: u64,

    /// JSON file with additional evaluator registrations
    #[arg(long, value_name = "FILE", global = true)]
    pub evaluators: Option<PathBuf>,

    /// Disable parallel evaluation
    #[arg(long, global = true)]
    pub no_parallel: bool,

    /// Show program output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate one completion and print its result record as JSON
    Run {
        /// Problem record
        #[arg(long)]
        problem: PathBuf,

        /// Completion index
        #[arg(long)]
        index: usize,
    },

    /// Evaluate every completion and write <name>.results.json
    Batch {
        /// Problem records, or directories of them
        #[arg(value_name = "PROBLEM", required = true)]
        inputs: Vec<PathBuf>,
    },

    /// List registered languages
    Languages,
}
