#![forbid(unsafe_code)]

mod bootstrap;
mod status;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use axup_control::{start_environment, stop_environment, WaitPolicy};
use axup_core::store::{ConfigKey, ConfigStore, FileConfigStore};
use axup_host::{IisWebControl, ScmServiceControl, SysinfoProcesses, SystemRunner};

use bootstrap::BootstrapArgs;

#[derive(Debug, Parser)]
#[command(name = "axup", version, about = "Deployment lifecycle controller for AOS environments")]
struct Cli {
    /// Deployment store path (default: AXUP_STORE, then the platform data dir)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Bounded wait for a service status transition, in seconds
    #[arg(long, global = true, default_value_t = 120)]
    stop_timeout_secs: u64,
    /// Bounded wait for a stopping service's process to exit, in seconds
    #[arg(long, global = true, default_value_t = 60)]
    exit_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Stop the web tier, then the background services
    Stop {
        /// Site name (default: the store's website_name, then well-known names)
        #[arg(long)]
        site: Option<String>,
    },
    /// Start the background services, then the web tier
    Start {
        #[arg(long)]
        site: Option<String>,
    },
    /// Stop followed by start
    Restart {
        #[arg(long)]
        site: Option<String>,
    },
    /// Show the resolved site and service statuses
    Status {
        #[arg(long)]
        site: Option<String>,
    },
    /// Resolve and print the deployment's site name
    Resolve {
        #[arg(long)]
        site: Option<String>,
    },
    /// Deployment store helpers
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
    /// Provision a developer/build machine
    Bootstrap(BootstrapArgs),
}

#[derive(Debug, Subcommand)]
enum ConfigCmd {
    /// Print one value (empty output when unset)
    Get { key: String },
    /// Set one value
    Set { key: String, value: String },
    /// Print all known keys and their values
    Show,
    /// Read one appSettings value from the application server's config file
    AppSetting { path: PathBuf, key: String },
}

fn default_store_path() -> PathBuf {
    if let Ok(p) = std::env::var("AXUP_STORE") {
        if !p.trim().is_empty() {
            return PathBuf::from(p);
        }
    }
    #[cfg(windows)]
    {
        if let Ok(data) = std::env::var("ProgramData") {
            return PathBuf::from(data).join("axup").join("axup-deploy.toml");
        }
        PathBuf::from("axup-deploy.toml")
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/var/lib/axup/axup-deploy.toml")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let store_path = cli.store.clone().unwrap_or_else(default_store_path);
    let policy = WaitPolicy {
        status_timeout: std::time::Duration::from_secs(cli.stop_timeout_secs),
        exit_timeout: std::time::Duration::from_secs(cli.exit_timeout_secs),
        ..WaitPolicy::default()
    };

    let web = IisWebControl::new(SystemRunner);
    let services = ScmServiceControl::new(SystemRunner);
    let processes = SysinfoProcesses::new();

    match cli.command {
        Command::Stop { site } => {
            let explicit = site_from(&store_path, site)?;
            stop_environment(&web, &services, &processes, explicit.as_deref(), &policy).await?;
        }
        Command::Start { site } => {
            let explicit = site_from(&store_path, site)?;
            start_environment(&web, &services, explicit.as_deref()).await?;
        }
        Command::Restart { site } => {
            let explicit = site_from(&store_path, site)?;
            stop_environment(&web, &services, &processes, explicit.as_deref(), &policy).await?;
            start_environment(&web, &services, explicit.as_deref()).await?;
        }
        Command::Status { site } => {
            let explicit = site_from(&store_path, site)?;
            status::print_status(&web, &services, explicit.as_deref()).await?;
        }
        Command::Resolve { site } => {
            let explicit = site_from(&store_path, site)?;
            let resolved = axup_control::resolve_site(&web, explicit.as_deref()).await?;
            println!("{resolved}");
        }
        Command::Config { action } => run_config(&store_path, action)?,
        Command::Bootstrap(args) => {
            let mut store = FileConfigStore::open(&store_path)
                .with_context(|| format!("open store {}", store_path.display()))?;
            bootstrap::run(&SystemRunner, &mut store, args).await?;
        }
    }
    Ok(())
}

/// Explicit site name: the flag wins, else the store's `website_name`. A
/// `None` here leaves resolution to the well-known default names.
fn site_from(store_path: &Path, flag: Option<String>) -> anyhow::Result<Option<String>> {
    if flag.is_some() {
        return Ok(flag);
    }
    let store = FileConfigStore::open(store_path)
        .with_context(|| format!("open store {}", store_path.display()))?;
    Ok(store.get(ConfigKey::WebsiteName)?)
}

fn run_config(store_path: &Path, action: ConfigCmd) -> anyhow::Result<()> {
    let mut store = FileConfigStore::open(store_path)
        .with_context(|| format!("open store {}", store_path.display()))?;
    match action {
        ConfigCmd::Get { key } => {
            let key = parse_key(&key)?;
            if let Some(value) = store.get(key)? {
                println!("{value}");
            }
        }
        ConfigCmd::Set { key, value } => {
            let key = parse_key(&key)?;
            store.set(key, &value)?;
            info!(%key, "stored");
        }
        ConfigCmd::AppSetting { path, key } => {
            println!("{}", axup_core::appsettings::read_app_setting(path, &key)?);
        }
        ConfigCmd::Show => {
            let mut table = comfy_table::Table::new();
            table.set_header(["key", "value"]);
            for key in ConfigKey::ALL {
                table.add_row([key.as_str(), store.get(key)?.as_deref().unwrap_or("")]);
            }
            println!("{table}");
        }
    }
    Ok(())
}

fn parse_key(raw: &str) -> anyhow::Result<ConfigKey> {
    ConfigKey::parse(raw).ok_or_else(|| {
        let known = ConfigKey::ALL.map(|k| k.as_str()).join(", ");
        anyhow::anyhow!("unknown config key {raw:?} (known: {known})")
    })
}
