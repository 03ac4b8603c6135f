//! The external cross-compilation toolchain
//!
//! The orchestrator only needs one operation from the toolchain:
//! `build(target, release)` returning success or failure. [`Toolchain`] is that
//! seam; [`CommandToolchain`] implements it by running a child process
//! (`cross build --target <triple> --release` by default) and waiting for it.

use crate::core::error::{FleetError, FleetResult};
use crate::core::target::TargetTriple;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Program used when nothing else is configured
pub const DEFAULT_PROGRAM: &str = "cross";

/// Outcome of one toolchain invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BuildStatus {
  Succeeded,
  /// Non-zero exit. `code` is `None` when the platform reports no code.
  Failed { code: Option<i32> },
}

impl BuildStatus {
  pub fn is_success(&self) -> bool {
    matches!(self, BuildStatus::Succeeded)
  }
}

/// Anything that can build one target in release mode
pub trait Toolchain {
  /// Human-readable command line for `target` (dry runs, logs)
  fn describe(&self, target: &TargetTriple) -> String;

  /// Build `target` in release mode, blocking until done.
  ///
  /// `Ok(Failed)` is a per-target failure; `Err` aborts the whole run.
  fn build(&mut self, target: &TargetTriple) -> FleetResult<BuildStatus>;
}

/// Runs the toolchain as a child process, one invocation per target
#[derive(Debug, Clone)]
pub struct CommandToolchain {
  program: String,
  extra_args: Vec<String>,
  working_dir: PathBuf,
  stdout_to_stderr: bool,
}

impl CommandToolchain {
  pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      extra_args: Vec::new(),
      working_dir: working_dir.into(),
      stdout_to_stderr: false,
    }
  }

  /// Arguments appended after `--release`
  pub fn with_extra_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
    self.extra_args.extend(args);
    self
  }

  /// Send the child's stdout to our stderr so our stdout stays machine-readable
  pub fn with_stdout_to_stderr(mut self, enabled: bool) -> Self {
    self.stdout_to_stderr = enabled;
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  /// Arguments passed to the program for `target`
  pub fn args(&self, target: &TargetTriple) -> Vec<String> {
    let mut args = vec![
      "build".to_string(),
      "--target".to_string(),
      target.as_str().to_string(),
      "--release".to_string(),
    ];
    args.extend(self.extra_args.iter().cloned());
    args
  }

  fn command(&self, target: &TargetTriple) -> Command {
    let mut cmd = Command::new(&self.program);
    cmd.current_dir(&self.working_dir).args(self.args(target));
    if self.stdout_to_stderr {
      cmd.stdout(Stdio::from(io::stderr()));
    }
    cmd
  }

  fn spawn_error(&self, target: &TargetTriple, err: io::Error) -> FleetError {
    match err.kind() {
      io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => FleetError::ToolchainNotAvailable {
        program: self.program.clone(),
        reason: err.to_string(),
      },
      _ => FleetError::system(format!("Failed to execute {} for {}: {}", self.program, target, err)),
    }
  }
}

impl Toolchain for CommandToolchain {
  fn describe(&self, target: &TargetTriple) -> String {
    format!("{} {}", self.program, self.args(target).join(" "))
  }

  fn build(&mut self, target: &TargetTriple) -> FleetResult<BuildStatus> {
    debug!(program = %self.program, target = %target, dir = %self.working_dir.display(), "spawning toolchain");
    // No timeout: the wait is unbounded, like a shell loop.
    let status = self
      .command(target)
      .status()
      .map_err(|e| self.spawn_error(target, e))?;
    debug!(target = %target, ?status, "toolchain exited");
    classify(target, status)
  }
}

/// Map a child exit status to a build outcome.
///
/// A child killed by a signal means the operator (or the system) stopped the
/// run, so it aborts everything instead of counting as one failed target.
fn classify(target: &TargetTriple, status: ExitStatus) -> FleetResult<BuildStatus> {
  if status.success() {
    return Ok(BuildStatus::Succeeded);
  }

  #[cfg(unix)]
  {
    use std::os::unix::process::ExitStatusExt;
    if status.signal().is_some() {
      return Err(FleetError::Interrupted {
        target: target.to_string(),
      });
    }
  }
  #[cfg(not(unix))]
  let _ = target;

  Ok(BuildStatus::Failed { code: status.code() })
}
