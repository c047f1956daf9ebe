//! High-level commands for rosti operations.
//!
//! Called by the CLI frontend; they own the orchestration between the
//! catalog, the resolvers and the local filesystem.

pub mod deploy;

pub use deploy::{DeployCommand, DeployOptions, DeployOutcome, DeploymentRequest};
