//! OS service control.
//!
//! The system adapter drives `sc.exe` through the [`CommandRunner`] and
//! parses its line-oriented output; the parsing lives in free functions so it
//! is testable against captured output.

use async_trait::async_trait;
use tracing::debug;

use axup_core::error::{Error, Result};
use axup_core::types::ServiceStatus;

use crate::command::CommandRunner;

/// Win32 error returned by the service manager for an unknown service name.
const ERROR_SERVICE_DOES_NOT_EXIST: i32 = 1060;

#[async_trait]
pub trait ServiceControl: Send + Sync {
    /// Current status, or `None` when no service of that name exists.
    async fn query(&self, name: &str) -> Result<Option<ServiceStatus>>;
    /// Signals start. Fire-and-forget: no wait beyond the platform call.
    async fn start(&self, name: &str) -> Result<()>;
    /// Signals stop. Callers wait for the status transition themselves.
    async fn stop(&self, name: &str) -> Result<()>;
    /// Process id backing the service, best-effort. `None` when the manager
    /// reports no pid (service stopped, or pid unavailable).
    async fn process_id(&self, name: &str) -> Result<Option<u32>>;
}

/// Adapter over the service control manager CLI.
pub struct ScmServiceControl<R> {
    runner: R,
}

impl<R: CommandRunner> ScmServiceControl<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl<R: CommandRunner> ServiceControl for ScmServiceControl<R> {
    async fn query(&self, name: &str) -> Result<Option<ServiceStatus>> {
        let out = self.runner.run("sc.exe", &["query", name]).await?;
        if out.code == Some(ERROR_SERVICE_DOES_NOT_EXIST) {
            debug!(service = name, "service does not exist");
            return Ok(None);
        }
        let out = out.expect_success("sc.exe query")?;
        parse_state(&out.stdout).map(Some)
    }

    async fn start(&self, name: &str) -> Result<()> {
        self.runner
            .run("sc.exe", &["start", name])
            .await?
            .expect_success("sc.exe start")?;
        Ok(())
    }

    async fn stop(&self, name: &str) -> Result<()> {
        self.runner
            .run("sc.exe", &["stop", name])
            .await?
            .expect_success("sc.exe stop")?;
        Ok(())
    }

    async fn process_id(&self, name: &str) -> Result<Option<u32>> {
        let out = self.runner.run("sc.exe", &["queryex", name]).await?;
        if out.code == Some(ERROR_SERVICE_DOES_NOT_EXIST) {
            return Ok(None);
        }
        let out = out.expect_success("sc.exe queryex")?;
        Ok(parse_pid(&out.stdout))
    }
}

/// Extracts the service state from `sc query` output
/// (`STATE : 4  RUNNING` style lines).
pub fn parse_state(lines: &[String]) -> Result<ServiceStatus> {
    let code = lines
        .iter()
        .filter_map(|l| field_value(l, "STATE"))
        .filter_map(|v| v.split_whitespace().next())
        .find_map(|n| n.parse::<u32>().ok())
        .ok_or_else(|| Error::parse("sc query: no STATE line"))?;
    ServiceStatus::from_scm_code(code)
        .ok_or_else(|| Error::parse(format!("sc query: unknown state code {code}")))
}

/// Extracts the backing pid from `sc queryex` output; pid 0 means none.
pub fn parse_pid(lines: &[String]) -> Option<u32> {
    lines
        .iter()
        .filter_map(|l| field_value(l, "PID"))
        .find_map(|v| v.trim().parse::<u32>().ok())
        .filter(|&pid| pid != 0)
}

fn field_value<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    let (name, value) = line.split_once(':')?;
    (name.trim() == field).then(|| value.trim())
}
