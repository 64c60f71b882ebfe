#![forbid(unsafe_code)]
//! Host ports and their system adapters.
//!
//! Every side effect the lifecycle controllers perform goes through one of
//! the traits here: [`CommandRunner`] for external tools, [`ServiceControl`]
//! for the OS service manager, [`WebControl`] for the shared web server, and
//! [`ProcessControl`] for raw process inspection. The system adapters drive
//! the real host; tests substitute mocks.

pub mod command;
pub mod process;
pub mod service;
pub mod web;

pub use command::{CommandOutput, CommandRunner, SystemRunner};
pub use process::{ProcessControl, SysinfoProcesses};
pub use service::{ScmServiceControl, ServiceControl};
pub use web::{IisWebControl, WebControl};
