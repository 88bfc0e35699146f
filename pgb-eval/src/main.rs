use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use log::LevelFilter;
use pgb_eval::cli::{Cli, Command};
use pgb_eval::command::command_exists;
use pgb_eval::config::{load_evaluator_specs, RunConfig};
use pgb_eval::runner::find_problem_files;
use pgb_eval::{Dispatcher, EvalRunner, Registry, StatusSummary};
use pgb_common::Problem;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}

/// Logs go to stderr; stdout carries only results
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn run(cli: Cli) -> Result<()> {
    let registry = build_registry(cli.evaluators.as_deref())?;
    let config = RunConfig {
        timeout_secs: cli.timeout,
        parallel: !cli.no_parallel,
        verbose: cli.verbose,
        ..RunConfig::default()
    };
    let dispatcher = Dispatcher::new(registry, config);

    match cli.command {
        Command::Run { problem, index } => run_single(&dispatcher, &problem, index),
        Command::Batch { inputs } => run_batch(dispatcher, &inputs),
        Command::Languages => {
            list_languages(dispatcher.registry());
            Ok(())
        }
    }
}

fn build_registry(evaluators: Option<&Path>) -> Result<Registry> {
    let mut registry = Registry::with_builtins();
    if let Some(path) = evaluators {
        for spec in load_evaluator_specs(path)? {
            registry.register_spec(spec)?;
        }
    }
    Ok(registry)
}

/// Print exactly one JSON line describing the result record
fn run_single(dispatcher: &Dispatcher, path: &Path, index: usize) -> Result<()> {
    let problem = Problem::load(path)?;
    let outcome = dispatcher.execute_candidate(&problem, index)?;
    let line = serde_json::to_string(&outcome).context("Failed to serialize result")?;
    println!("{line}");
    Ok(())
}

fn run_batch(dispatcher: Dispatcher, inputs: &[PathBuf]) -> Result<()> {
    let mut files = Vec::new();
    for input in inputs {
        files.extend(find_problem_files(input)?);
    }
    if files.is_empty() {
        println!("{}", "No problem files found".yellow());
        return Ok(());
    }

    let runner = EvalRunner::new(dispatcher);
    let mut summary = StatusSummary::default();
    for file in &files {
        summary.merge(&runner.run_file(file)?);
    }
    summary.print();
    Ok(())
}

fn list_languages(registry: &Registry) {
    println!("{:<12} {:<10} {:<12} {}", "TAG", "EXT", "LANGUAGE", "SUCCESS MARKER");
    for (tag, evaluator) in registry.languages() {
        let marker = format!("{:?}", evaluator.markers().success);
        println!(
            "{:<12} {:<10} {:<12} {}",
            tag,
            format!(".{}", evaluator.extension()),
            evaluator.language(),
            marker
        );
    }

    if !command_exists("pyret") {
        println!("\n{}", "note: 'pyret' is not on PATH".dimmed());
    }
}
