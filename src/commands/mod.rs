//! CLI commands for cargo-fleet
//!
//! - **build**: Build every enabled target in release mode (default command)
//! - **targets**: Show the effective target list
//! - **init**: Write a starter fleet.toml

pub mod build;
pub mod init;
pub mod targets;

pub use build::{BuildOptions, run_build};
pub use init::run_init;
pub use targets::run_targets;
