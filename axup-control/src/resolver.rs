//! Site resolution.
//!
//! An explicit name wins outright; otherwise the well-known default names are
//! tried in order and the first configured site is used. Only when no
//! explicit name was given and no default exists does resolution fail.

use tracing::{debug, info};

use axup_core::error::{Error, ResourceKind, Result};
use axup_core::types::DEFAULT_SITE_NAMES;
use axup_host::WebControl;

/// Resolves the deployment's site name.
pub async fn resolve_site(web: &dyn WebControl, explicit: Option<&str>) -> Result<String> {
    if let Some(name) = explicit {
        // Defaults are bypassed entirely; a wrong explicit name fails here
        // instead of producing a site that resolves to nothing downstream.
        return if web.site_exists(name).await? {
            Ok(name.to_string())
        } else {
            Err(Error::not_found(ResourceKind::Site, name))
        };
    }
    for candidate in DEFAULT_SITE_NAMES {
        if web.site_exists(candidate).await? {
            info!(site = candidate, "resolved site from defaults");
            return Ok(candidate.to_string());
        }
        debug!(site = candidate, "default site not configured");
    }
    Err(Error::not_found(ResourceKind::Site, DEFAULT_SITE_NAMES.join(" or ")))
}
