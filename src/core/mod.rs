//! Core engine for cargo-fleet
//!
//! - **config**: fleet.toml discovery, parsing and the built-in target list
//! - **error**: Error types with exit codes and contextual help messages
//! - **orchestrator**: The sequential build loop, failure policy and run report
//! - **target**: Target triples and the ordered target list
//! - **toolchain**: The external cross-compilation toolchain seam

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod target;
pub mod toolchain;
