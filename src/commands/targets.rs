//! `cargo fleet targets` - Show the effective target list
//!
//! Prints every configured target in build order, marking disabled entries,
//! together with where the list came from.

use crate::core::config::FleetConfig;
use crate::core::error::FleetResult;
use serde_json::json;
use std::path::Path;

/// Run the targets command
pub fn run_targets(
  workspace_root: &Path,
  config: Option<&Path>,
  toolchain: Option<&str>,
  json: bool,
) -> FleetResult<()> {
  let (config, source) = FleetConfig::load(workspace_root, config)?;
  let targets = config.target_list()?;
  let program = config.effective_program(toolchain);

  if json {
    let entries: Vec<_> = targets
      .entries()
      .iter()
      .map(|e| json!({ "triple": e.triple, "enabled": e.enabled }))
      .collect();
    let value = json!({
      "config": source.to_string(),
      "toolchain": program,
      "policy": config.build.policy,
      "targets": entries,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    return Ok(());
  }

  println!("🎯 Targets ({})", source);
  println!("════════════════════════════════════════");
  if targets.is_empty() {
    println!("  (none configured)");
  }
  for entry in targets.entries() {
    if entry.enabled {
      println!("  ✅ {}", entry.triple);
    } else {
      println!("  ⏸  {} (disabled)", entry.triple);
    }
  }
  println!();
  println!(
    "{} of {} enabled, built with `{}` ({})",
    targets.enabled_count(),
    targets.len(),
    program,
    config.build.policy
  );
  Ok(())
}
