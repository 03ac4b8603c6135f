use crate::core::error::{ConfigError, FleetResult, ResultExt};
use crate::core::orchestrator::FailurePolicy;
use crate::core::target::{TargetEntry, TargetList, TargetTriple};
use crate::core::toolchain::DEFAULT_PROGRAM;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default file name written by `cargo fleet init`
pub const CONFIG_FILE_NAME: &str = "fleet.toml";

/// Targets built when no fleet.toml exists
const DEFAULT_TARGETS: &[(&str, bool)] = &[
  ("x86_64-unknown-linux-gnu", true),
  ("x86_64-pc-windows-gnu", true),
  ("aarch64-unknown-linux-gnu", false),
];

/// Configuration for cargo-fleet
/// Searched in order: fleet.toml, .fleet.toml, .cargo/fleet.toml, .config/fleet.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FleetConfig {
  #[serde(default)]
  pub toolchain: ToolchainConfig,
  #[serde(default)]
  pub build: BuildConfig,
  /// `None` (key absent) means the built-in list; `Some(vec![])` means no targets
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub targets: Option<Vec<TargetConfig>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainConfig {
  /// Program invoked once per target (default: "cross")
  #[serde(default = "default_program")]
  pub program: String,

  /// Extra arguments appended after `--release`
  #[serde(default)]
  pub args: Vec<String>,
}

fn default_program() -> String {
  DEFAULT_PROGRAM.to_string()
}

impl Default for ToolchainConfig {
  fn default() -> Self {
    Self {
      program: default_program(),
      args: Vec::new(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
  #[serde(default)]
  pub policy: FailurePolicy,
}

/// One `[[targets]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
  pub triple: String,
  #[serde(default = "default_enabled")]
  pub enabled: bool,
}

fn default_enabled() -> bool {
  true
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
  File(PathBuf),
  BuiltIn,
}

impl fmt::Display for ConfigSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigSource::File(path) => write!(f, "{}", path.display()),
      ConfigSource::BuiltIn => write!(f, "built-in defaults"),
    }
  }
}

impl Default for FleetConfig {
  fn default() -> Self {
    Self {
      toolchain: ToolchainConfig::default(),
      build: BuildConfig::default(),
      targets: Some(default_targets()),
    }
  }
}

fn default_targets() -> Vec<TargetConfig> {
  DEFAULT_TARGETS
    .iter()
    .map(|(triple, enabled)| TargetConfig {
      triple: triple.to_string(),
      enabled: *enabled,
    })
    .collect()
}

impl FleetConfig {
  /// Find config file in search order: fleet.toml, .fleet.toml, .cargo/fleet.toml, .config/fleet.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join(CONFIG_FILE_NAME),
      path.join(".fleet.toml"),
      path.join(".cargo").join(CONFIG_FILE_NAME),
      path.join(".config").join(CONFIG_FILE_NAME),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Resolve the effective configuration.
  ///
  /// An explicit path must exist. Otherwise the search order is tried and the
  /// built-in defaults are used when nothing is found.
  pub fn load(workspace_root: &Path, explicit: Option<&Path>) -> FleetResult<(Self, ConfigSource)> {
    let path = match explicit {
      Some(path) if !path.is_file() => {
        let path = path.to_path_buf();
        return Err(ConfigError::NotFound { path }.into());
      }
      Some(path) => path.to_path_buf(),
      None => match Self::find_config_path(workspace_root) {
        Some(path) => path,
        None => return Ok((Self::default(), ConfigSource::BuiltIn)),
      },
    };

    let config = Self::load_file(&path)?;
    Ok((config, ConfigSource::File(path)))
  }

  /// Parse and validate one config file
  pub fn load_file(path: &Path) -> FleetResult<Self> {
    let content = fs::read_to_string(path)
      .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: FleetConfig = toml_edit::de::from_str(&content).map_err(|e| ConfigError::Invalid {
      path: path.to_path_buf(),
      reason: e.to_string(),
    })?;

    // Surface bad triples at load time, not halfway through a run
    config.target_list()?;

    Ok(config)
  }

  /// Write config to `path`
  pub fn save(&self, path: &Path) -> FleetResult<()> {
    let body = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    let content = format!(
      "# cargo-fleet configuration\n# Targets are built in order; set `enabled = false` to skip one.\n\n{}",
      body
    );
    fs::write(path, content).with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
  }

  /// Program to invoke per target: `override_program` (from `--toolchain` or
  /// `CARGO_FLEET_TOOLCHAIN`) wins over `[toolchain] program`
  pub fn effective_program<'a>(&'a self, override_program: Option<&'a str>) -> &'a str {
    override_program.unwrap_or(self.toolchain.program.as_str())
  }

  /// The validated, ordered target list
  pub fn target_list(&self) -> FleetResult<TargetList> {
    let defaults;
    let targets = match &self.targets {
      Some(targets) => targets,
      None => {
        defaults = default_targets();
        &defaults
      }
    };

    let entries = targets
      .iter()
      .map(|t| -> FleetResult<TargetEntry> {
        let triple = TargetTriple::new(t.triple.clone())?;
        Ok(if t.enabled {
          TargetEntry::enabled(triple)
        } else {
          TargetEntry::disabled(triple)
        })
      })
      .collect::<FleetResult<Vec<_>>>()?;

    TargetList::new(entries)
  }
}
