//! Integration tests for cargo-fleet
//!
//! Each test drives the compiled binary against a shell-script toolchain, so
//! these only run on Unix.

#![cfg(unix)]

mod helpers;
mod test_init;
mod test_targets;
