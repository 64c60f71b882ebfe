//! Web-tier transitions. Idempotent in both directions: stop on a stopped
//! site and start on a started site are no-ops.

use tracing::{info, warn};

use axup_core::error::{Error, ResourceKind, Result};
use axup_core::types::{SiteState, ALTERNATE_WEB_HOST};
use axup_host::{ProcessControl, WebControl};

use crate::wait::WaitPolicy;

/// Stops the site if it is not already stopped, then force-terminates any
/// stray instances of the alternate lightweight web host.
pub async fn stop_web_tier(
    web: &dyn WebControl,
    processes: &dyn ProcessControl,
    site: &str,
    policy: &WaitPolicy,
) -> Result<()> {
    match web.site_state(site).await? {
        Some(SiteState::Stopped) => info!(site, "site already stopped"),
        None => info!(site, "site reports no state, nothing to stop"),
        Some(SiteState::Started) => {
            info!(site, "stopping site");
            web.site_stop(site).await?;
            wait_for_site_stopped(web, site, policy).await?;
        }
    }

    for pid in processes.pids_by_name(ALTERNATE_WEB_HOST) {
        if processes.kill(pid) {
            info!(pid, host = ALTERNATE_WEB_HOST, "terminated alternate web host");
        } else {
            warn!(pid, host = ALTERNATE_WEB_HOST, "failed to terminate alternate web host");
        }
    }
    Ok(())
}

/// Starts the site, bringing the shared web server up first when the site
/// reports no state at all. The state is re-queried after the server start
/// before deciding whether the site itself needs starting.
pub async fn start_web_tier(web: &dyn WebControl, site: &str) -> Result<()> {
    let mut state = web.site_state(site).await?;
    if state.is_none() {
        info!(site, "no site state reported, starting shared web server");
        web.server_start().await?;
        state = web.site_state(site).await?;
        if state.is_none() {
            return Err(Error::not_found(ResourceKind::Site, site));
        }
    }
    match state {
        Some(SiteState::Started) => info!(site, "site already started"),
        _ => {
            info!(site, "starting site");
            web.site_start(site).await?;
        }
    }
    Ok(())
}

async fn wait_for_site_stopped(
    web: &dyn WebControl,
    site: &str,
    policy: &WaitPolicy,
) -> Result<()> {
    let start = tokio::time::Instant::now();
    loop {
        if web.site_state(site).await? != Some(SiteState::Started) {
            return Ok(());
        }
        if start.elapsed() >= policy.status_timeout {
            return Err(Error::timeout(format!("site {site} to stop"), start.elapsed()));
        }
        tokio::time::sleep(policy.poll_interval).await;
    }
}
