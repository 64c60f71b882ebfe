//! Flat key-value deployment store.
//!
//! The store remembers deployment-specific paths and names across
//! invocations. Callers receive it as an injected port rather than reaching
//! for a machine-global location, so tests can substitute an in-memory
//! implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Well-known store keys. Every value is an optional string; absence means
/// unset, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKey {
    InstallPath,
    BackupPath,
    ServerUrl,
    WebsiteName,
    DatabaseName,
    DatabaseServer,
    BinariesPath,
    MetadataPath,
    PackagesPath,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 9] = [
        ConfigKey::InstallPath,
        ConfigKey::BackupPath,
        ConfigKey::ServerUrl,
        ConfigKey::WebsiteName,
        ConfigKey::DatabaseName,
        ConfigKey::DatabaseServer,
        ConfigKey::BinariesPath,
        ConfigKey::MetadataPath,
        ConfigKey::PackagesPath,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::InstallPath => "install_path",
            ConfigKey::BackupPath => "backup_path",
            ConfigKey::ServerUrl => "server_url",
            ConfigKey::WebsiteName => "website_name",
            ConfigKey::DatabaseName => "database_name",
            ConfigKey::DatabaseServer => "database_server",
            ConfigKey::BinariesPath => "binaries_path",
            ConfigKey::MetadataPath => "metadata_path",
            ConfigKey::PackagesPath => "packages_path",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value persistence port for deployment settings.
pub trait ConfigStore {
    /// Absence of a key yields `Ok(None)`, not an error.
    fn get(&self, key: ConfigKey) -> Result<Option<String>>;
    fn set(&mut self, key: ConfigKey, value: &str) -> Result<()>;
}

/// TOML-file backed store. The whole document is a flat string table; unknown
/// keys in the file are preserved on write.
#[derive(Debug)]
pub struct FileConfigStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileConfigStore {
    /// Opens the store, creating an empty one if the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(data) => toml::from_str(&data)
                .map_err(|e| Error::config(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "store file absent, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let data = toml::to_string_pretty(&self.values)
            .map_err(|e| Error::config(format!("serialize store: {e}")))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self, key: ConfigKey) -> Result<Option<String>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        self.values.insert(key.as_str().to_string(), value.to_string());
        self.persist()
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: BTreeMap<String, String>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: ConfigKey) -> Result<Option<String>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        self.values.insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }
}
