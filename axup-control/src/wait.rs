//! Bounded waits. Every wait either observes the target condition or fails
//! with [`Error::Timeout`]; callers treat that as fatal and abort the rest of
//! the sequence.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use axup_core::error::{Error, Result};
use axup_core::types::ServiceStatus;
use axup_host::{ProcessControl, ServiceControl};

/// Timeouts for the service-tier stop sequence. Both waits are independent:
/// the first covers the service manager's status transition, the second the
/// backing process actually exiting.
#[derive(Debug, Clone, Copy)]
pub struct WaitPolicy {
    pub status_timeout: Duration,
    pub exit_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            status_timeout: Duration::from_secs(120),
            exit_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Polls the service manager until `name` reports `target`. A service that
/// disappears while waiting for `Stopped` counts as stopped.
pub async fn wait_for_service_status(
    services: &dyn ServiceControl,
    name: &str,
    target: ServiceStatus,
    timeout: Duration,
    poll: Duration,
) -> Result<()> {
    let start = Instant::now();
    loop {
        match services.query(name).await? {
            Some(status) if status == target => return Ok(()),
            None if target == ServiceStatus::Stopped => return Ok(()),
            status => {
                debug!(service = name, ?status, target = target.as_str(), "still waiting");
            }
        }
        if start.elapsed() >= timeout {
            return Err(Error::timeout(
                format!("service {name} to reach {}", target.as_str()),
                start.elapsed(),
            ));
        }
        tokio::time::sleep(poll.min(timeout.saturating_sub(start.elapsed()))).await;
    }
}

/// Polls until the process with `pid` has exited.
pub async fn wait_for_process_exit(
    processes: &dyn ProcessControl,
    pid: u32,
    timeout: Duration,
    poll: Duration,
) -> Result<()> {
    let start = Instant::now();
    loop {
        if !processes.is_alive(pid) {
            return Ok(());
        }
        if start.elapsed() >= timeout {
            return Err(Error::timeout(format!("process {pid} to exit"), start.elapsed()));
        }
        tokio::time::sleep(poll.min(timeout.saturating_sub(start.elapsed()))).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct NeverStops;

    #[async_trait::async_trait]
    impl ServiceControl for NeverStops {
        async fn query(&self, _name: &str) -> Result<Option<ServiceStatus>> {
            Ok(Some(ServiceStatus::StopPending))
        }
        async fn start(&self, _name: &str) -> Result<()> {
            Ok(())
        }
        async fn stop(&self, _name: &str) -> Result<()> {
            Ok(())
        }
        async fn process_id(&self, _name: &str) -> Result<Option<u32>> {
            Ok(None)
        }
    }

    struct StopsAfter(Mutex<u32>);

    #[async_trait::async_trait]
    impl ServiceControl for StopsAfter {
        async fn query(&self, _name: &str) -> Result<Option<ServiceStatus>> {
            let mut left = self.0.lock().unwrap();
            if *left == 0 {
                Ok(Some(ServiceStatus::Stopped))
            } else {
                *left -= 1;
                Ok(Some(ServiceStatus::StopPending))
            }
        }
        async fn start(&self, _name: &str) -> Result<()> {
            Ok(())
        }
        async fn stop(&self, _name: &str) -> Result<()> {
            Ok(())
        }
        async fn process_id(&self, _name: &str) -> Result<Option<u32>> {
            Ok(None)
        }
    }

    struct Gone;

    #[async_trait::async_trait]
    impl ServiceControl for Gone {
        async fn query(&self, _name: &str) -> Result<Option<ServiceStatus>> {
            Ok(None)
        }
        async fn start(&self, _name: &str) -> Result<()> {
            Ok(())
        }
        async fn stop(&self, _name: &str) -> Result<()> {
            Ok(())
        }
        async fn process_id(&self, _name: &str) -> Result<Option<u32>> {
            Ok(None)
        }
    }

    const FAST: Duration = Duration::from_millis(5);

    #[tokio::test]
    async fn exceeded_status_wait_is_a_timeout() {
        let err = wait_for_service_status(
            &NeverStops,
            "DynamicsAxBatch",
            ServiceStatus::Stopped,
            Duration::from_millis(30),
            FAST,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
    }

    #[tokio::test]
    async fn status_reached_within_budget_succeeds() {
        let svc = StopsAfter(Mutex::new(3));
        wait_for_service_status(&svc, "s", ServiceStatus::Stopped, Duration::from_secs(1), FAST)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn vanished_service_counts_as_stopped() {
        wait_for_service_status(&Gone, "s", ServiceStatus::Stopped, Duration::from_secs(1), FAST)
            .await
            .unwrap();
    }

    struct NoProcesses;
    impl ProcessControl for NoProcesses {
        fn pids_by_name(&self, _image: &str) -> Vec<u32> {
            Vec::new()
        }
        fn kill(&self, _pid: u32) -> bool {
            false
        }
        fn is_alive(&self, _pid: u32) -> bool {
            false
        }
    }

    struct Immortal;
    impl ProcessControl for Immortal {
        fn pids_by_name(&self, _image: &str) -> Vec<u32> {
            Vec::new()
        }
        fn kill(&self, _pid: u32) -> bool {
            false
        }
        fn is_alive(&self, _pid: u32) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn already_exited_process_returns_immediately() {
        wait_for_process_exit(&NoProcesses, 42, Duration::from_secs(1), FAST)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn stuck_process_times_out() {
        let err = wait_for_process_exit(&Immortal, 42, Duration::from_millis(30), FAST)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
    }
}
