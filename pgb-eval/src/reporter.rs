use colored::*;
use pgb_common::{EvaluationOutcome, Status};

pub fn status_symbol(status: Status) -> ColoredString {
    match status {
        Status::Ok => "✓".green(),
        Status::SyntaxError => "✗".yellow(),
        Status::Exception => "✗".red(),
        Status::Timeout => "⏱".red(),
    }
}

pub fn status_description(status: Status) -> ColoredString {
    match status {
        Status::Ok => "OK".green(),
        Status::SyntaxError => "SYNTAX ERROR".yellow(),
        Status::Exception => "EXCEPTION".red(),
        Status::Timeout => "TIMEOUT".red(),
    }
}

/// Print one sample's outcome
pub fn print_outcome(index: usize, outcome: &EvaluationOutcome, verbose: bool) {
    println!(
        "{} sample {}: {}",
        status_symbol(outcome.status),
        index,
        status_description(outcome.status)
    );

    if verbose || outcome.status != Status::Ok {
        if !outcome.stdout.trim().is_empty() {
            println!("  stdout:\n{}", indent_lines(&outcome.stdout, 4).dimmed());
        }
        if !outcome.stderr.trim().is_empty() {
            println!("  stderr:\n{}", indent_lines(&outcome.stderr, 4).dimmed());
        }
    }
}

/// Status counts for one or more problems
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: usize,
    pub ok: usize,
    pub syntax_errors: usize,
    pub exceptions: usize,
    pub timeouts: usize,
    pub total_duration_ms: u64,
}

impl StatusSummary {
    pub fn add(&mut self, outcome: &EvaluationOutcome) {
        self.total += 1;
        match outcome.status {
            Status::Ok => self.ok += 1,
            Status::SyntaxError => self.syntax_errors += 1,
            Status::Exception => self.exceptions += 1,
            Status::Timeout => self.timeouts += 1,
        }
    }

    pub fn merge(&mut self, other: &StatusSummary) {
        self.total += other.total;
        self.ok += other.ok;
        self.syntax_errors += other.syntax_errors;
        self.exceptions += other.exceptions;
        self.timeouts += other.timeouts;
        self.total_duration_ms += other.total_duration_ms;
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Ok => self.ok,
            Status::SyntaxError => self.syntax_errors,
            Status::Exception => self.exceptions,
            Status::Timeout => self.timeouts,
        }
    }

    /// Fraction of samples that passed
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.ok as f64 / self.total as f64
        }
    }

    /// Print the summary
    pub fn print(&self) {
        println!("\n{}", "=".repeat(60));
        println!("{:^60}", "Evaluation Results");
        println!("{}", "=".repeat(60));

        println!("Samples:        {}", self.total);
        println!("OK:             {}", self.ok.to_string().green());
        if self.syntax_errors > 0 {
            println!("Syntax errors:  {}", self.syntax_errors.to_string().yellow());
        }
        if self.exceptions > 0 {
            println!("Exceptions:     {}", self.exceptions.to_string().red());
        }
        if self.timeouts > 0 {
            println!("Timeouts:       {}", self.timeouts.to_string().red());
        }

        let duration_secs = self.total_duration_ms as f64 / 1000.0;
        println!("Duration:       {:.2}s", duration_secs);
        println!("{}", "=".repeat(60));

        if self.total == 0 {
            println!("\n{}", "No samples were run!".yellow().bold());
        } else {
            let rate = format!("Pass rate: {:.1}%", self.pass_rate() * 100.0);
            if self.ok == self.total {
                println!("\n{}", rate.green().bold());
            } else {
                println!("\n{}", rate.bold());
            }
        }
    }
}

/// Progress reporter for parallel execution
pub struct ProgressReporter {
    progress_bar: indicatif::ProgressBar,
}

impl ProgressReporter {
    pub fn new(total: usize) -> Self {
        let progress_bar = indicatif::ProgressBar::new(total as u64);
        let style = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
            .progress_chars("#>-");
        progress_bar.set_style(style);

        Self { progress_bar }
    }

    pub fn update(&self, message: &str) {
        self.progress_bar.set_message(message.to_string());
        self.progress_bar.inc(1);
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

/// Helper to indent lines
fn indent_lines(text: &str, spaces: usize) -> String {
    let indent = " ".repeat(spaces);
    text.lines()
        .map(|line| format!("{}{}", indent, line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: Status) -> EvaluationOutcome {
        EvaluationOutcome {
            program: String::new(),
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 0,
            timed_out: status == Status::Timeout,
            status,
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = StatusSummary::default();
        for status in [Status::Ok, Status::Ok, Status::Timeout, Status::SyntaxError] {
            summary.add(&outcome(status));
        }
        assert_eq!(summary.total, 4);
        assert_eq!(summary.count(Status::Ok), 2);
        assert_eq!(summary.count(Status::Exception), 0);
        assert!((summary.pass_rate() - 0.5).abs() < 1e-9);

        let mut total = StatusSummary::default();
        total.merge(&summary);
        total.merge(&summary);
        assert_eq!(total.timeouts, 2);
    }

    #[test]
    fn test_indent_lines() {
        assert_eq!(indent_lines("a\nb", 2), "  a\n  b");
    }

    #[test]
    fn test_empty_pass_rate() {
        assert_eq!(StatusSummary::default().pass_rate(), 0.0);
    }
}
