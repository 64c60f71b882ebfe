use std::time::Duration;

use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// What kind of named resource a `NotFound` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Service,
    Site,
    ConfigKey,
    File,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Service => "service",
            ResourceKind::Site => "site",
            ResourceKind::ConfigKey => "config key",
            ResourceKind::File => "file",
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{} not found: {name}", kind.as_str())]
    NotFound { kind: ResourceKind, name: String },
    #[error("timed out after {waited:?} waiting for {what}")]
    Timeout { what: String, waited: Duration },
    #[error("{program} exited with code {code}{}", if stderr.is_empty() { String::new() } else { format!(": {stderr}") })]
    UnexpectedExitCode {
        program: String,
        code: i32,
        stderr: String,
    },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Config(String),
    #[error("parse: {0}")]
    Parse(String),
}

impl Error {
    pub fn not_found(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self::NotFound { kind, name: name.into() }
    }
    pub fn timeout(what: impl Into<String>, waited: Duration) -> Self {
        Self::Timeout { what: what.into(), waited }
    }
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// True for the skip-eligible variant; Timeout and UnexpectedExitCode are
    /// always fatal to the surrounding sequence.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
