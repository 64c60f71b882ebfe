//! Shared web server and site control.
//!
//! Sites are driven through `appcmd.exe`, the whole server through
//! `iisreset.exe`. A site that cannot be found, or whose state the server
//! does not report (server fully down), comes back as `None` from
//! [`WebControl::site_state`].

use async_trait::async_trait;
use tracing::debug;

use axup_core::error::Result;
use axup_core::types::SiteState;

use crate::command::CommandRunner;

const APPCMD: &str = r"C:\Windows\System32\inetsrv\appcmd.exe";

#[async_trait]
pub trait WebControl: Send + Sync {
    /// Whether a site of this name is configured at all, regardless of the
    /// server being up.
    async fn site_exists(&self, name: &str) -> Result<bool>;
    /// State of the named site, or `None` when the server reports no state
    /// for it at all.
    async fn site_state(&self, name: &str) -> Result<Option<SiteState>>;
    async fn site_start(&self, name: &str) -> Result<()>;
    async fn site_stop(&self, name: &str) -> Result<()>;
    /// Starts the shared web server process itself.
    async fn server_start(&self) -> Result<()>;
    /// Stops the shared web server process itself.
    async fn server_stop(&self) -> Result<()>;
}

/// Adapter over the web server's management tools.
pub struct IisWebControl<R> {
    runner: R,
}

impl<R: CommandRunner> IisWebControl<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl<R: CommandRunner> WebControl for IisWebControl<R> {
    async fn site_exists(&self, name: &str) -> Result<bool> {
        // appcmd exits non-zero when no site object matches the name.
        let out = self.runner.run(APPCMD, &["list", "site", name]).await?;
        Ok(out.success())
    }

    async fn site_state(&self, name: &str) -> Result<Option<SiteState>> {
        // A missing site makes appcmd exit non-zero; that is "no state", not
        // a fatal tool failure.
        let out = self.runner.run(APPCMD, &["list", "site", name]).await?;
        if !out.success() {
            debug!(site = name, "no site object reported");
            return Ok(None);
        }
        Ok(parse_site_state(&out.stdout, name))
    }

    async fn site_start(&self, name: &str) -> Result<()> {
        let arg = format!("/site.name:{name}");
        self.runner
            .run(APPCMD, &["start", "site", &arg])
            .await?
            .expect_success("appcmd start site")?;
        Ok(())
    }

    async fn site_stop(&self, name: &str) -> Result<()> {
        let arg = format!("/site.name:{name}");
        self.runner
            .run(APPCMD, &["stop", "site", &arg])
            .await?
            .expect_success("appcmd stop site")?;
        Ok(())
    }

    async fn server_start(&self) -> Result<()> {
        self.runner
            .run("iisreset.exe", &["/start"])
            .await?
            .expect_success("iisreset /start")?;
        Ok(())
    }

    async fn server_stop(&self) -> Result<()> {
        self.runner
            .run("iisreset.exe", &["/stop"])
            .await?
            .expect_success("iisreset /stop")?;
        Ok(())
    }
}

/// Extracts the `state:` field for `name` from `appcmd list site` output,
/// e.g. `SITE "AosService" (id:1,bindings:http/*:80:,state:Started)`.
pub fn parse_site_state(lines: &[String], name: &str) -> Option<SiteState> {
    let needle = format!("SITE \"{name}\"");
    let line = lines.iter().find(|l| l.starts_with(&needle))?;
    let state = line
        .rsplit_once("state:")?
        .1
        .trim_end_matches(')')
        .trim();
    match state {
        "Started" => Some(SiteState::Started),
        "Stopped" => Some(SiteState::Stopped),
        // "Unknown" while the server is down, or anything unrecognized
        _ => None,
    }
}
