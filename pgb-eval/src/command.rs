use anyhow::{bail, Context, Result};
use log::debug;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Exit code recorded when the process was killed or ended by a signal
pub const NO_EXIT_CODE: i32 = -1;

/// Raw result of running a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub timed_out: bool,
}

/// Run `argv` with a wall-clock timeout
///
/// The child is killed if the timeout fires; nothing it printed is kept in
/// that case.
pub async fn run_command(argv: &[String], limit: Duration) -> Result<CommandOutput> {
    let Some((program, args)) = argv.split_first() else {
        bail!("Empty command line");
    };

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to spawn command: {}", argv.join(" ")))?;

    match timeout(limit, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(NO_EXIT_CODE),
            stdout: output.stdout,
            stderr: output.stderr,
            timed_out: false,
        }),
        Ok(Err(e)) => Err(e).with_context(|| format!("Failed waiting for: {}", argv.join(" "))),
        Err(_) => {
            debug!("Timeout after {:?}: {}", limit, argv.join(" "));
            Ok(CommandOutput {
                exit_code: NO_EXIT_CODE,
                stdout: Vec::new(),
                stderr: Vec::new(),
                timed_out: true,
            })
        }
    }
}

/// Run a command synchronously (wrapper for async version)
pub fn run_command_sync(argv: &[String], limit: Duration) -> Result<CommandOutput> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(run_command(argv, limit))
}

/// Check if a command/binary exists
pub fn command_exists(cmd: &str) -> bool {
    std::process::Command::new("which")
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_captures_streams_and_exit_code() {
        let output = run_command_sync(
            &argv(&["sh", "-c", "printf out; printf err >&2; exit 3"]),
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(output.stdout, b"out");
        assert_eq!(output.stderr, b"err");
        assert_eq!(output.exit_code, 3);
        assert!(!output.timed_out);
    }

    #[test]
    fn test_timeout_kills() {
        let output = run_command_sync(&argv(&["sleep", "5"]), Duration::from_millis(200)).unwrap();
        assert!(output.timed_out);
        assert_eq!(output.exit_code, NO_EXIT_CODE);
    }

    #[test]
    fn test_spawn_failure_is_an_error() {
        assert!(run_command_sync(&argv(&["pgb-no-such-binary"]), Duration::from_secs(1)).is_err());
        assert!(run_command_sync(&[], Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("pgb-no-such-binary"));
    }
}
