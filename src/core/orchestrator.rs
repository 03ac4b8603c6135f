//! The build loop: one toolchain invocation per enabled target, in list order
//!
//! # Guarantees
//!
//! - Every enabled target is built at most once, disabled targets never.
//! - Invocations never overlap: each `build` call returns before the next starts.
//! - A failed target is never reported as success. With [`FailurePolicy::FailFast`]
//!   the loop stops at the first failure; with [`FailurePolicy::KeepGoing`] every
//!   enabled target is attempted and all failures are reported together.
//! - Errors returned by the toolchain itself (missing binary, interrupted child)
//!   abort the run regardless of policy.
//! - Nothing is retried.

use crate::core::error::{FleetError, FleetResult};
use crate::core::target::{TargetList, TargetTriple};
use crate::core::toolchain::{BuildStatus, Toolchain};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// What to do after a target fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
  /// Stop at the first failed target
  #[default]
  FailFast,
  /// Attempt every target, then report all failures
  KeepGoing,
}

impl fmt::Display for FailurePolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FailurePolicy::FailFast => write!(f, "fail-fast"),
      FailurePolicy::KeepGoing => write!(f, "keep-going"),
    }
  }
}

/// Run lifecycle. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
  Running,
  Succeeded,
  Failed,
}

/// Result of building one target
#[derive(Debug, Clone, Serialize)]
pub struct TargetOutcome {
  pub target: TargetTriple,
  #[serde(flatten)]
  pub status: BuildStatus,
  pub elapsed_secs: f64,
}

/// Everything a finished run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
  pub started_at: DateTime<Utc>,
  pub policy: FailurePolicy,
  pub state: RunState,
  /// Attempted targets, in invocation order
  pub outcomes: Vec<TargetOutcome>,
  /// Enabled targets skipped because an earlier one failed (fail-fast only)
  pub not_attempted: Vec<TargetTriple>,
}

impl RunReport {
  fn new(policy: FailurePolicy) -> Self {
    Self {
      started_at: Utc::now(),
      policy,
      state: RunState::Running,
      outcomes: Vec::new(),
      not_attempted: Vec::new(),
    }
  }

  fn record(&mut self, target: TargetTriple, status: BuildStatus, elapsed: Duration) {
    debug_assert_eq!(self.state, RunState::Running);
    self.outcomes.push(TargetOutcome {
      target,
      status,
      elapsed_secs: elapsed.as_secs_f64(),
    });
  }

  fn finish(&mut self) {
    debug_assert_eq!(self.state, RunState::Running);
    self.state = if self.outcomes.iter().any(|o| !o.status.is_success()) {
      RunState::Failed
    } else {
      RunState::Succeeded
    };
  }

  /// Targets whose build failed, in invocation order
  pub fn failed(&self) -> impl Iterator<Item = &TargetTriple> {
    self
      .outcomes
      .iter()
      .filter(|o| !o.status.is_success())
      .map(|o| &o.target)
  }

  pub fn succeeded_count(&self) -> usize {
    self.outcomes.iter().filter(|o| o.status.is_success()).count()
  }

  /// Convert a failed run into [`FleetError::TargetsFailed`]
  pub fn ensure_success(&self) -> FleetResult<()> {
    match self.state {
      RunState::Succeeded => Ok(()),
      _ => Err(FleetError::TargetsFailed {
        failed: self.failed().map(ToString::to_string).collect(),
      }),
    }
  }
}

/// Progress notifications emitted while the loop runs
#[derive(Debug, Clone, Copy)]
pub enum RunEvent<'a> {
  /// About to invoke the toolchain; `index` is zero-based among enabled targets
  Started {
    target: &'a TargetTriple,
    index: usize,
    total: usize,
  },
  Finished {
    target: &'a TargetTriple,
    status: BuildStatus,
    elapsed: Duration,
  },
}

/// Drives the toolchain over a target list
pub struct Orchestrator<'a> {
  targets: &'a TargetList,
  policy: FailurePolicy,
}

impl<'a> Orchestrator<'a> {
  pub fn new(targets: &'a TargetList, policy: FailurePolicy) -> Self {
    Self { targets, policy }
  }

  /// Command lines that a run would execute, without executing anything
  pub fn plan<T: Toolchain>(&self, toolchain: &T) -> Vec<String> {
    self.targets.enabled().map(|t| toolchain.describe(t)).collect()
  }

  /// Run without progress callbacks
  #[cfg(test)]
  pub fn run<T: Toolchain>(&self, toolchain: &mut T) -> FleetResult<RunReport> {
    self.run_with(toolchain, |_| {})
  }

  /// Build every enabled target in order, reporting progress to `on_event`
  pub fn run_with<T, F>(&self, toolchain: &mut T, mut on_event: F) -> FleetResult<RunReport>
  where
    T: Toolchain,
    F: FnMut(RunEvent<'_>),
  {
    let enabled: Vec<&TargetTriple> = self.targets.enabled().collect();
    let total = enabled.len();
    let mut report = RunReport::new(self.policy);
    info!(policy = %self.policy, total, "starting run");

    for (index, target) in enabled.iter().copied().enumerate() {
      on_event(RunEvent::Started { target, index, total });

      let started = Instant::now();
      let status = toolchain.build(target)?;
      let elapsed = started.elapsed();

      on_event(RunEvent::Finished {
        target,
        status,
        elapsed,
      });
      report.record(target.clone(), status, elapsed);

      if !status.is_success() {
        warn!(target = %target, ?status, "target build failed");
        if self.policy == FailurePolicy::FailFast {
          report.not_attempted = enabled[index + 1..].iter().map(|t| (*t).clone()).collect();
          break;
        }
      }
    }

    report.finish();
    info!(state = ?report.state, built = report.succeeded_count(), "run finished");
    Ok(report)
  }
}
