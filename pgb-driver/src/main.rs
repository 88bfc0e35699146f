//! Polyglot Bench Driver
//!
//! Reads Python benchmark problems and writes translated problem records
//! for a target language, ready for `pgb-eval`.

use clap::{Parser, Subcommand};
use log::{info, warn};
use pgb_codegen::{build_problem, synthesize_prompt, translator_for, Translator, TARGETS};
use pgb_frontend::Frontend;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pgb")]
#[command(about = "Polyglot Bench problem translator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate Python problems into problem records for a target language
    Translate {
        /// Python source file, or a directory of them
        input: PathBuf,

        /// Target language
        #[arg(short, long, default_value = "pyret")]
        target: String,

        /// Directory for the generated records (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fill completions with a stub that closes the prompt
        #[arg(long)]
        stub: bool,
    },

    /// Print the prompt generated for a single Python problem
    Prompt {
        /// Python source file
        input: PathBuf,

        /// Target language
        #[arg(short, long, default_value = "pyret")]
        target: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Translate { input, target, output, stub } => {
            if let Err(e) = translate_command(&input, &target, output.as_deref(), stub) {
                eprintln!("Error translating problems: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Prompt { input, target } => {
            if let Err(e) = prompt_command(&input, &target) {
                eprintln!("Error generating prompt: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn lookup_target(target: &str) -> Result<&'static dyn Translator, Box<dyn std::error::Error>> {
    translator_for(target).ok_or_else(|| {
        format!("Unknown target '{}' (available: {})", target, TARGETS.join(", ")).into()
    })
}

fn translate_command(
    input: &Path,
    target: &str,
    output_dir: Option<&Path>,
    stub: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let translator = lookup_target(target)?;
    let files = find_sources(input)?;
    if files.is_empty() {
        println!("No Python sources found in {}", input.display());
        return Ok(());
    }

    let output_dir = output_dir.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(output_dir)?;

    // A single named file must translate; directory members are skipped on error
    let strict = !input.is_dir();
    let mut written = 0;
    for file in &files {
        let name = problem_name(file);
        let source = fs::read_to_string(file)?;
        let parsed = match Frontend::parse_problem(&source, &file.to_string_lossy()) {
            Ok(parsed) => parsed,
            Err(e) if !strict => {
                warn!("Skipping {}: {}", file.display(), e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let Some(mut problem) = build_problem(translator, &name, &parsed)? else {
            warn!("Skipping {}: not expressible in {}", file.display(), translator.name());
            continue;
        };
        if stub {
            problem.completions = vec![translator.no_completion_stub()];
        }

        let path = record_path(output_dir, &name);
        problem.save(&path)?;
        info!("Wrote {}", path.display());
        written += 1;
    }

    println!(
        "Translated {} of {} problems to {}",
        written,
        files.len(),
        translator.name()
    );
    Ok(())
}

fn prompt_command(input: &Path, target: &str) -> Result<(), Box<dyn std::error::Error>> {
    let translator = lookup_target(target)?;
    let source = fs::read_to_string(input)?;
    let parsed = Frontend::parse_problem(&source, &input.to_string_lossy())?;

    match synthesize_prompt(translator, &parsed.signature)? {
        Some(prompt) => {
            print!("{}", prompt);
            Ok(())
        }
        None => Err(format!(
            "{} cannot express the signature of {}",
            translator.name(),
            parsed.signature.name
        )
        .into()),
    }
}

/// The file itself, or every `*.py` in a directory, sorted
fn find_sources(input: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let pattern = input.join("*.py");
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .collect();
    files.sort();
    Ok(files)
}

fn problem_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "problem".to_string())
}

fn record_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_path() {
        assert_eq!(
            record_path(Path::new("out"), "HumanEval_0_has_close_elements"),
            PathBuf::from("out/HumanEval_0_has_close_elements.json")
        );
        assert_eq!(problem_name(Path::new("dir/HumanEval_53_add.py")), "HumanEval_53_add");
    }

    #[test]
    fn test_find_sources() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.py", "a.py", "notes.txt", "a.json"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let files = find_sources(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.py", "b.py"]);
    }

    #[test]
    fn test_unknown_target() {
        assert!(lookup_target("cobol").is_err());
        assert_eq!(lookup_target("Pyret").unwrap().name(), "pyret");
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["pgb", "translate", "problems"]).unwrap();
        match cli.command {
            Commands::Translate { target, output, stub, .. } => {
                assert_eq!(target, "pyret");
                assert!(output.is_none());
                assert!(!stub);
            }
            Commands::Prompt { .. } => panic!("expected translate"),
        }
    }
}
