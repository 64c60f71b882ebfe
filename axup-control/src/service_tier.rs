//! Service-tier transitions over a fixed ordered list.
//!
//! Missing services and services already in the target status are logged
//! skips. Stops are verified with two bounded waits (status, then backing
//! process exit) because the surrounding sequence assumes fully quiesced
//! services; starts are fire-and-forget because nothing downstream depends
//! on service readiness.

use tracing::{info, warn};

use axup_core::error::Result;
use axup_core::types::ServiceStatus;
use axup_host::{ProcessControl, ServiceControl};

use crate::wait::{wait_for_process_exit, wait_for_service_status, WaitPolicy};

/// Stops every existing service in `names`, in order. The first timeout is
/// fatal and halts the remaining list.
pub async fn stop_services(
    services: &dyn ServiceControl,
    processes: &dyn ProcessControl,
    names: &[&str],
    policy: &WaitPolicy,
) -> Result<()> {
    for &name in names {
        match services.query(name).await? {
            None => {
                info!(service = name, "not installed, skipping");
                continue;
            }
            Some(ServiceStatus::Stopped) => {
                info!(service = name, "already stopped, skipping");
                continue;
            }
            Some(status) => {
                info!(service = name, status = status.as_str(), "stopping");
            }
        }

        // Best-effort pid capture before the stop signal; without it only
        // the status wait applies.
        let pid = match services.process_id(name).await {
            Ok(Some(pid)) => Some(pid),
            Ok(None) => {
                warn!(service = name, "no backing pid reported");
                None
            }
            Err(e) => {
                warn!(service = name, error = %e, "pid lookup failed");
                None
            }
        };

        services.stop(name).await?;
        wait_for_service_status(
            services,
            name,
            ServiceStatus::Stopped,
            policy.status_timeout,
            policy.poll_interval,
        )
        .await?;

        if let Some(pid) = pid {
            wait_for_process_exit(processes, pid, policy.exit_timeout, policy.poll_interval)
                .await?;
            info!(service = name, pid, "stopped and process exited");
        } else {
            info!(service = name, "stopped");
        }
    }
    Ok(())
}

/// Starts every existing service in `names`, in order. No post-start wait.
pub async fn start_services(services: &dyn ServiceControl, names: &[&str]) -> Result<()> {
    for &name in names {
        match services.query(name).await? {
            None => info!(service = name, "not installed, skipping"),
            Some(ServiceStatus::Running) => info!(service = name, "already running, skipping"),
            Some(status) => {
                info!(service = name, status = status.as_str(), "starting");
                services.start(name).await?;
            }
        }
    }
    Ok(())
}
