//! Raw process inspection and termination.
//!
//! Used for two things only: force-terminating stray instances of the
//! alternate lightweight web host, and watching a stopping service's backing
//! process until it exits.

use std::sync::Mutex;

use sysinfo::{Pid, ProcessRefreshKind, RefreshKind, System};
use tracing::warn;

pub trait ProcessControl: Send + Sync {
    /// Pids of all processes whose image name matches `image`
    /// (case-insensitive, `.exe` suffix optional).
    fn pids_by_name(&self, image: &str) -> Vec<u32>;
    /// Forceful kill, no graceful shutdown. Returns false when the signal
    /// could not be delivered.
    fn kill(&self, pid: u32) -> bool;
    fn is_alive(&self, pid: u32) -> bool;
}

/// sysinfo-backed implementation.
pub struct SysinfoProcesses {
    system: Mutex<System>,
}

impl SysinfoProcesses {
    pub fn new() -> Self {
        let refresh = RefreshKind::new().with_processes(ProcessRefreshKind::new());
        Self { system: Mutex::new(System::new_with_specifics(refresh)) }
    }
}

impl Default for SysinfoProcesses {
    fn default() -> Self {
        Self::new()
    }
}

fn image_matches(process_name: &str, image: &str) -> bool {
    let norm = |s: &str| s.to_ascii_lowercase().trim_end_matches(".exe").to_string();
    norm(process_name) == norm(image)
}

impl ProcessControl for SysinfoProcesses {
    fn pids_by_name(&self, image: &str) -> Vec<u32> {
        let Ok(mut sys) = self.system.lock() else {
            warn!("process table lock poisoned");
            return Vec::new();
        };
        sys.refresh_processes();
        sys.processes()
            .iter()
            .filter(|(_, p)| image_matches(p.name(), image))
            .map(|(pid, _)| pid.as_u32())
            .collect()
    }

    fn kill(&self, pid: u32) -> bool {
        let Ok(mut sys) = self.system.lock() else { return false };
        sys.refresh_processes();
        sys.process(Pid::from_u32(pid)).map(|p| p.kill()).unwrap_or(false)
    }

    fn is_alive(&self, pid: u32) -> bool {
        let Ok(mut sys) = self.system.lock() else { return false };
        sys.refresh_processes();
        sys.process(Pid::from_u32(pid)).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_matching_ignores_case_and_exe_suffix() {
        assert!(image_matches("iisexpress.exe", "iisexpress"));
        assert!(image_matches("IISExpress.exe", "iisexpress.exe"));
        assert!(image_matches("iisexpress", "IISEXPRESS"));
        assert!(!image_matches("w3wp.exe", "iisexpress"));
    }

    #[test]
    fn current_process_is_alive() {
        let procs = SysinfoProcesses::new();
        assert!(procs.is_alive(std::process::id()));
    }

    #[test]
    fn nonexistent_pid_is_not_alive() {
        let procs = SysinfoProcesses::new();
        // Pid namespace is 32-bit but this one is as good as free.
        assert!(!procs.is_alive(u32::MAX - 1));
    }
}
