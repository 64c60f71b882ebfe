//! External command invocation with a typed result.
//!
//! Wrapping the runner behind a trait keeps the exit-code policy (non-success
//! is fatal where success is required) testable without invoking real host
//! tools.

use async_trait::async_trait;
use tracing::debug;

use axup_core::error::{Error, Result};

/// Outcome of one external tool invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<String>,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Maps a non-success exit to [`Error::UnexpectedExitCode`].
    pub fn expect_success(self, program: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(Error::UnexpectedExitCode {
                program: program.to_string(),
                code: self.code.unwrap_or(-1),
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` to completion and captures its output.
    /// Failure to spawn at all surfaces as `Error::Io`.
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Runner backed by real host processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!(%program, ?args, "spawning external command");
        let out = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await?;
        let stdout = String::from_utf8_lossy(&out.stdout)
            .lines()
            .map(str::to_string)
            .collect();
        Ok(CommandOutput {
            code: out.status.code(),
            stdout,
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(code: i32) -> CommandOutput {
        CommandOutput { code: Some(code), stdout: vec![], stderr: "boom".into() }
    }

    #[test]
    fn zero_exit_is_success() {
        assert!(output(0).success());
        assert!(output(0).expect_success("tool").is_ok());
    }

    #[test]
    fn nonzero_exit_maps_to_unexpected_exit_code() {
        let err = output(2).expect_success("iisreset").unwrap_err();
        match err {
            Error::UnexpectedExitCode { program, code, stderr } => {
                assert_eq!(program, "iisreset");
                assert_eq!(code, 2);
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn signal_death_reports_code_minus_one() {
        let out = CommandOutput { code: None, stdout: vec![], stderr: String::new() };
        let err = out.expect_success("tool").unwrap_err();
        assert!(matches!(err, Error::UnexpectedExitCode { code: -1, .. }));
    }
}
