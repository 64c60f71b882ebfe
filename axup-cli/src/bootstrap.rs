//! Developer/build machine provisioning.
//!
//! A strictly-ordered sequence of host steps, every one driven through the
//! command runner and aborted on the first non-success exit code. There is no
//! rollback: re-run after remediation.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use axup_core::error::Result;
use axup_core::store::{ConfigKey, ConfigStore};
use axup_host::CommandRunner;

/// Packages installed with `--install-software`, via the package manager.
const SOFTWARE: [&str; 4] = ["git", "vscode", "sysinternals", "notepadplusplus"];

#[derive(Debug, Args)]
pub struct BootstrapArgs {
    /// Drive letter holding the OS (informational, recorded in the store)
    #[arg(long, default_value = "C:")]
    pub system_drive: String,
    /// Drive letter the deployment lives on
    #[arg(long, default_value = "K:")]
    pub service_drive: String,
    /// Source repository checkout directory to create
    #[arg(long)]
    pub repo_dir: Option<PathBuf>,
    /// Time zone name, e.g. "W. Europe Standard Time"
    #[arg(long)]
    pub timezone: Option<String>,
    /// System locale, e.g. "en-US"
    #[arg(long)]
    pub locale: Option<String>,
    /// Install the workstation software set via the package manager
    #[arg(long)]
    pub install_software: bool,
}

pub async fn run(
    runner: &dyn CommandRunner,
    store: &mut dyn ConfigStore,
    args: BootstrapArgs,
) -> Result<()> {
    if let Some(tz) = &args.timezone {
        info!(timezone = tz.as_str(), "setting time zone");
        runner.run("tzutil", &["/s", tz]).await?.expect_success("tzutil")?;
    }

    if let Some(locale) = &args.locale {
        info!(locale = locale.as_str(), "setting system locale");
        let cmd = format!("Set-WinSystemLocale -SystemLocale {locale}");
        runner
            .run("powershell", &["-NoProfile", "-Command", &cmd])
            .await?
            .expect_success("powershell Set-WinSystemLocale")?;
    }

    if let Some(repo) = &args.repo_dir {
        info!(dir = %repo.display(), "creating repository directory");
        tokio::fs::create_dir_all(repo).await?;
    }

    if args.install_software {
        for package in SOFTWARE {
            info!(package, "installing");
            runner
                .run("choco", &["install", "-y", package])
                .await?
                .expect_success("choco install")?;
        }
    }

    // Remember where this deployment lives so later lifecycle runs need no
    // flags.
    let install = format!(r"{}\AosService", args.service_drive);
    store.set(ConfigKey::InstallPath, &install)?;
    store.set(
        ConfigKey::PackagesPath,
        &format!(r"{install}\PackagesLocalDirectory"),
    )?;
    store.set(
        ConfigKey::MetadataPath,
        &format!(r"{install}\PackagesLocalDirectory"),
    )?;
    store.set(
        ConfigKey::BinariesPath,
        &format!(r"{install}\webroot\bin"),
    )?;
    info!(system_drive = args.system_drive.as_str(), "bootstrap complete");
    Ok(())
}
