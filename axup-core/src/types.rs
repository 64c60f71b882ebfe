use serde::{Deserialize, Serialize};

/// Site names tried, in order, when no explicit name is given.
pub const DEFAULT_SITE_NAMES: [&str; 2] = ["AosService", "AosWebApplication"];

/// Background services managed by the lifecycle controller, in stop order.
pub const DEPLOYMENT_SERVICES: [&str; 3] = [
    "DynamicsAxBatch",
    "Microsoft.Dynamics.AX.Framework.Tools.DMF.SSISHelperService.exe",
    "MR2012ProcessService",
];

/// Image name of the alternate lightweight web host. Instances of it are
/// force-terminated when the web tier is stopped.
pub const ALTERNATE_WEB_HOST: &str = "iisexpress";

/// Status reported by the OS service control manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceStatus {
    Stopped,
    StartPending,
    StopPending,
    Running,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Stopped => "stopped",
            ServiceStatus::StartPending => "start pending",
            ServiceStatus::StopPending => "stop pending",
            ServiceStatus::Running => "running",
        }
    }

    /// Maps the numeric state from `sc query` output (1 = STOPPED .. 4 = RUNNING).
    pub fn from_scm_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(ServiceStatus::Stopped),
            2 => Some(ServiceStatus::StartPending),
            3 => Some(ServiceStatus::StopPending),
            4 => Some(ServiceStatus::Running),
            _ => None,
        }
    }
}

/// State of a site within the shared web server. A site with no state at all
/// (server fully down, or site unknown) is represented as `Option::None` at
/// the querying seam, not as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteState {
    Stopped,
    Started,
}

impl SiteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteState::Stopped => "stopped",
            SiteState::Started => "started",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scm_codes_map_to_known_states() {
        assert_eq!(ServiceStatus::from_scm_code(1), Some(ServiceStatus::Stopped));
        assert_eq!(ServiceStatus::from_scm_code(4), Some(ServiceStatus::Running));
        assert_eq!(ServiceStatus::from_scm_code(7), None);
    }

    #[test]
    fn default_site_order_prefers_aos_service() {
        assert_eq!(DEFAULT_SITE_NAMES[0], "AosService");
        assert_eq!(DEFAULT_SITE_NAMES[1], "AosWebApplication");
    }
}
