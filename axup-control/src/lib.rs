#![forbid(unsafe_code)]
//! Lifecycle controllers for the deployment: web tier first on the way down,
//! services first on the way up, everything strictly sequential with bounded
//! waits and no rollback.

pub mod lifecycle;
pub mod resolver;
pub mod service_tier;
pub mod wait;
pub mod web_tier;

pub use lifecycle::{start_environment, stop_environment};
pub use resolver::resolve_site;
pub use wait::WaitPolicy;
