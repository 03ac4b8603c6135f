//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch project directory with a scripted stand-in for `cross`
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create an empty workspace
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Where the fake toolchain appends one line per invocation
  pub fn log_path(&self) -> PathBuf {
    self.path.join("toolchain.log")
  }

  /// Write an executable fake toolchain that fails for the given triples.
  ///
  /// Each invocation appends its full argument list to `toolchain.log`.
  /// Failing targets exit with status 7.
  pub fn fake_toolchain(&self, failing: &[&str]) -> Result<PathBuf> {
    self.fake_toolchain_with(failing, &[])
  }

  /// Like [`fake_toolchain`](Self::fake_toolchain), but the process kills
  /// itself with SIGKILL when asked to build one of `killed`
  pub fn fake_toolchain_with(&self, failing: &[&str], killed: &[&str]) -> Result<PathBuf> {
    let script = self.path.join("fake-cross");
    let content = format!(
      r#"#!/bin/sh
echo "$*" >> "{log}"
target="$3"
case " {killed} " in
  *" $target "*)
    kill -9 $$
    ;;
esac
case " {failing} " in
  *" $target "*)
    echo "fake-cross: compile error for $target" >&2
    exit 7
    ;;
esac
echo "fake-cross: built $target"
exit 0
"#,
      log = self.log_path().display(),
      failing = failing.join(" "),
      killed = killed.join(" "),
    );
    std::fs::write(&script, content)?;
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;
    Ok(script)
  }

  /// Write fleet.toml
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("fleet.toml"), content)?;
    Ok(())
  }

  /// Invocations recorded by the fake toolchain, in order
  pub fn invocations(&self) -> Result<Vec<String>> {
    if !self.log_path().exists() {
      return Ok(Vec::new());
    }
    Ok(
      std::fs::read_to_string(self.log_path())?
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Just the target triples from recorded invocations
  pub fn built_targets(&self) -> Result<Vec<String>> {
    Ok(
      self
        .invocations()?
        .iter()
        .filter_map(|line| line.split_whitespace().nth(2).map(String::from))
        .collect(),
    )
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run cargo-fleet and return its output whatever the exit status
pub fn run_cargo_fleet_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let cargo_fleet_bin = env!("CARGO_BIN_EXE_cargo-fleet");

  Command::new(cargo_fleet_bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("CARGO_FLEET_TOOLCHAIN")
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run cargo-fleet")
}

/// Run cargo-fleet and fail unless it exits successfully
pub fn run_cargo_fleet(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_cargo_fleet_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "cargo-fleet command failed: cargo {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
