//! `cargo fleet init` - Write a starter fleet.toml
//!
//! The file contains the built-in target list so it can be edited in place.
//! An existing configuration (at any searched location) is left alone unless
//! `--force` is given.

use crate::core::config::{CONFIG_FILE_NAME, FleetConfig};
use crate::core::error::{ConfigError, FleetResult};
use std::path::Path;

/// Run the init command
pub fn run_init(workspace_root: &Path, force: bool) -> FleetResult<()> {
  if let Some(existing) = FleetConfig::find_config_path(workspace_root)
    && !force
  {
    return Err(ConfigError::AlreadyExists { path: existing }.into());
  }

  let path = workspace_root.join(CONFIG_FILE_NAME);
  FleetConfig::default().save(&path)?;

  println!("✅ Wrote {}", path.display());
  println!("   Edit the [[targets]] list, then run `cargo fleet build`");
  Ok(())
}
