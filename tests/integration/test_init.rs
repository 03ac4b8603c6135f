//! Integration tests for `cargo fleet init`

use crate::helpers::{TestWorkspace, run_cargo_fleet, run_cargo_fleet_raw, stderr, stdout};
use anyhow::Result;

#[test]
fn test_init_writes_default_config() -> Result<()> {
  let ws = TestWorkspace::new()?;

  run_cargo_fleet(&ws.path, &["fleet", "init"])?;

  assert!(ws.file_exists("fleet.toml"));
  let content = ws.read_file("fleet.toml")?;
  assert!(content.contains("x86_64-unknown-linux-gnu"));
  assert!(content.contains("aarch64-unknown-linux-gnu"));

  // The written file is picked up and matches the built-in list
  let output = run_cargo_fleet(&ws.path, &["fleet", "targets"])?;
  let out = stdout(&output);
  assert!(out.contains("fleet.toml"));
  assert!(out.contains("2 of 3 enabled"));
  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_config("targets = []\n")?;

  let output = run_cargo_fleet_raw(&ws.path, &["fleet", "init"])?;
  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("--force"));
  assert_eq!(ws.read_file("fleet.toml")?, "targets = []\n");

  run_cargo_fleet(&ws.path, &["fleet", "init", "--force"])?;
  assert!(ws.read_file("fleet.toml")?.contains("x86_64-pc-windows-gnu"));
  Ok(())
}

#[test]
fn test_init_write_failure_is_system_error() -> Result<()> {
  let ws = TestWorkspace::new()?;
  // A directory where the file should go is not a config, so init tries to write and fails
  std::fs::create_dir(ws.path.join("fleet.toml"))?;

  let output = run_cargo_fleet_raw(&ws.path, &["fleet", "init"])?;

  assert_eq!(output.status.code(), Some(3), "stderr: {}", stderr(&output));
  assert!(stderr(&output).contains("Failed to write config to"));
  Ok(())
}
