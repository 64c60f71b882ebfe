//! The two top-level sequences. Web tier fully stopped before services on
//! the way down; services first, web tier last on the way up. A fatal error
//! anywhere aborts the sequence and leaves prior steps in place.

use tracing::info;

use axup_core::error::Result;
use axup_core::types::DEPLOYMENT_SERVICES;
use axup_host::{ProcessControl, ServiceControl, WebControl};

use crate::resolver::resolve_site;
use crate::service_tier::{start_services, stop_services};
use crate::wait::WaitPolicy;
use crate::web_tier::{start_web_tier, stop_web_tier};

/// Stops the whole deployment: site first, then the background services.
pub async fn stop_environment(
    web: &dyn WebControl,
    services: &dyn ServiceControl,
    processes: &dyn ProcessControl,
    explicit_site: Option<&str>,
    policy: &WaitPolicy,
) -> Result<()> {
    let site = resolve_site(web, explicit_site).await?;
    info!(%site, "stopping environment");
    stop_web_tier(web, processes, &site, policy).await?;
    stop_services(services, processes, &DEPLOYMENT_SERVICES, policy).await?;
    info!(%site, "environment stopped");
    Ok(())
}

/// Starts the whole deployment: background services first, site last.
pub async fn start_environment(
    web: &dyn WebControl,
    services: &dyn ServiceControl,
    explicit_site: Option<&str>,
) -> Result<()> {
    let site = resolve_site(web, explicit_site).await?;
    info!(%site, "starting environment");
    start_services(services, &DEPLOYMENT_SERVICES).await?;
    start_web_tier(web, &site).await?;
    info!(%site, "environment started");
    Ok(())
}
