//! Integration tests for `cargo fleet targets`

use crate::helpers::{TestWorkspace, run_cargo_fleet, run_cargo_fleet_raw, stdout};
use anyhow::Result;

#[test]
fn test_lists_builtin_defaults_without_config() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_cargo_fleet(&ws.path, &["fleet", "targets"])?;
  let out = stdout(&output);

  assert!(out.contains("built-in defaults"));
  assert!(out.contains("✅ x86_64-unknown-linux-gnu"));
  assert!(out.contains("✅ x86_64-pc-windows-gnu"));
  assert!(out.contains("aarch64-unknown-linux-gnu (disabled)"));
  assert!(out.contains("2 of 3 enabled, built with `cross` (fail-fast)"));
  Ok(())
}

#[test]
fn test_json_listing_preserves_order() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.write_config(
    r#"[build]
policy = "keep-going"

[[targets]]
triple = "wasm32-wasip1"
enabled = false

[[targets]]
triple = "aarch64-apple-darwin"
"#,
  )?;

  let output = run_cargo_fleet(&ws.path, &["fleet", "targets", "--json"])?;
  let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert!(value["config"].as_str().unwrap_or_default().ends_with("fleet.toml"));
  assert_eq!(value["policy"], "keep-going");
  assert_eq!(value["toolchain"], "cross");
  assert_eq!(value["targets"][0]["triple"], "wasm32-wasip1");
  assert_eq!(value["targets"][0]["enabled"], false);
  assert_eq!(value["targets"][1]["triple"], "aarch64-apple-darwin");
  assert_eq!(value["targets"][1]["enabled"], true);
  Ok(())
}

#[test]
fn test_explicit_config_path() -> Result<()> {
  let ws = TestWorkspace::new()?;
  std::fs::create_dir_all(ws.path.join("ci"))?;
  std::fs::write(
    ws.path.join("ci/release.toml"),
    "[[targets]]\ntriple = \"x86_64-unknown-freebsd\"\n",
  )?;

  let output = run_cargo_fleet(&ws.path, &["fleet", "targets", "--config", "ci/release.toml"])?;
  assert!(stdout(&output).contains("✅ x86_64-unknown-freebsd"));

  let output = run_cargo_fleet_raw(&ws.path, &["fleet", "targets", "--config", "ci/missing.toml"])?;
  assert_eq!(output.status.code(), Some(2));
  Ok(())
}
