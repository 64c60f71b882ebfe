#![forbid(unsafe_code)]
//! Core types for the axup deployment lifecycle controller: the error
//! taxonomy, the flat key-value deployment store, and the application
//! config-file reader.

pub mod appsettings;
pub mod error;
pub mod store;
pub mod types;

pub use error::{Error, ResourceKind, Result};
pub use store::{ConfigKey, ConfigStore, FileConfigStore, MemoryConfigStore};
pub use types::{ServiceStatus, SiteState, DEFAULT_SITE_NAMES, DEPLOYMENT_SERVICES};
