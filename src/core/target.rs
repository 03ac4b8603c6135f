//! Target triples and the ordered target list
//!
//! A [`TargetTriple`] is opaque: it is validated only so that it can be passed
//! as a single process argument, and is otherwise handed to the toolchain
//! verbatim. A [`TargetList`] keeps disabled entries in place so a config file
//! can switch a target off without deleting it.

use crate::core::error::{ConfigError, FleetResult};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// An architecture-OS-environment identifier such as `x86_64-unknown-linux-gnu`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TargetTriple(String);

impl TargetTriple {
  /// Validate and wrap a triple
  pub fn new(triple: impl Into<String>) -> FleetResult<Self> {
    let triple = triple.into();
    if triple.is_empty() || triple.chars().any(char::is_whitespace) {
      return Err(ConfigError::InvalidTriple { triple }.into());
    }
    Ok(Self(triple))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TargetTriple {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// One entry of the target list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry {
  pub triple: TargetTriple,
  pub enabled: bool,
}

impl TargetEntry {
  pub fn enabled(triple: TargetTriple) -> Self {
    Self { triple, enabled: true }
  }

  pub fn disabled(triple: TargetTriple) -> Self {
    Self { triple, enabled: false }
  }
}

/// Ordered, duplicate-free list of targets, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetList {
  entries: Vec<TargetEntry>,
}

impl TargetList {
  /// Build a list, rejecting triples that appear more than once
  pub fn new(entries: Vec<TargetEntry>) -> FleetResult<Self> {
    let mut seen = HashSet::new();
    for entry in &entries {
      if !seen.insert(entry.triple.as_str()) {
        return Err(
          ConfigError::DuplicateTarget {
            triple: entry.triple.to_string(),
          }
          .into(),
        );
      }
    }
    Ok(Self { entries })
  }

  /// Build a list where every given triple is enabled, in the given order
  pub fn from_triples<I, S>(triples: I) -> FleetResult<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let entries = triples
      .into_iter()
      .map(|t| TargetTriple::new(t).map(TargetEntry::enabled))
      .collect::<FleetResult<Vec<_>>>()?;
    Self::new(entries)
  }

  /// All entries, disabled ones included
  pub fn entries(&self) -> &[TargetEntry] {
    &self.entries
  }

  /// Enabled triples in list order
  pub fn enabled(&self) -> impl Iterator<Item = &TargetTriple> {
    self.entries.iter().filter(|e| e.enabled).map(|e| &e.triple)
  }

  pub fn enabled_count(&self) -> usize {
    self.enabled().count()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
