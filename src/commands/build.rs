//! `cargo fleet build` - Build every enabled target in release mode
//!
//! This is the default command: a bare `cargo fleet` behaves the same way.
//!
//! Supports:
//! - `--target <triple>` (repeatable) to build exactly these targets, in order
//! - `--keep-going` / `--fail-fast` to choose the failure policy
//! - `--toolchain <program>` to replace `cross`
//! - `--dry-run` to show the plan without executing
//! - `--json` to print a machine-readable run report on stdout

use crate::core::config::{ConfigSource, FleetConfig};
use crate::core::error::FleetResult;
use crate::core::orchestrator::{FailurePolicy, Orchestrator, RunEvent, RunReport, RunState};
use crate::core::target::TargetList;
use crate::core::toolchain::{BuildStatus, CommandToolchain};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for a build run, already resolved from the command line
#[derive(Debug, Default)]
pub struct BuildOptions {
  /// Overrides the configured list when non-empty
  pub targets: Vec<String>,
  /// Overrides `[build] policy`
  pub policy: Option<FailurePolicy>,
  /// Overrides `[toolchain] program`
  pub toolchain: Option<String>,
  pub config: Option<PathBuf>,
  pub dry_run: bool,
  pub json: bool,
  /// Appended after the configured `[toolchain] args`
  pub toolchain_args: Vec<String>,
}

/// Run the build command
pub fn run_build(workspace_root: &Path, opts: BuildOptions) -> FleetResult<()> {
  let (config, source) = FleetConfig::load(workspace_root, opts.config.as_deref())?;

  let targets = if opts.targets.is_empty() {
    config.target_list()?
  } else {
    TargetList::from_triples(opts.targets)?
  };
  let policy = opts.policy.unwrap_or(config.build.policy);
  let program = config.effective_program(opts.toolchain.as_deref()).to_string();

  let mut toolchain = CommandToolchain::new(program, workspace_root)
    .with_extra_args(config.toolchain.args.into_iter().chain(opts.toolchain_args))
    .with_stdout_to_stderr(opts.json);

  info!(config = %source, %policy, program = toolchain.program(), "resolved build settings");
  let orchestrator = Orchestrator::new(&targets, policy);

  if opts.dry_run {
    return print_plan(&orchestrator.plan(&toolchain), &source, opts.json);
  }

  let total = targets.enabled_count();
  if !opts.json {
    if total == 0 {
      println!("✅ Nothing to build: every target is disabled");
    } else {
      println!(
        "🚀 Building {} target(s) in release mode with {} ({})",
        total,
        toolchain.program(),
        policy
      );
    }
  }

  let json = opts.json;
  let report = orchestrator.run_with(&mut toolchain, |event| {
    if !json {
      print_event(event);
    }
  })?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else if total > 0 {
    print_summary(&report);
  }

  report.ensure_success()
}

fn print_plan(plan: &[String], source: &ConfigSource, json: bool) -> FleetResult<()> {
  if json {
    let value = json!({
      "dry_run": true,
      "config": source.to_string(),
      "commands": plan,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    return Ok(());
  }

  if plan.is_empty() {
    println!("DRY RUN: Nothing to build, every target is disabled");
    return Ok(());
  }

  println!("DRY RUN: Would execute (config: {}):", source);
  for command in plan {
    println!("  {}", command);
  }
  Ok(())
}

fn print_event(event: RunEvent<'_>) {
  match event {
    RunEvent::Started { target, index, total } => {
      println!("\n🔨 [{}/{}] Building {} ...", index + 1, total, target);
    }
    RunEvent::Finished {
      target,
      status,
      elapsed,
    } => match status {
      BuildStatus::Succeeded => {
        println!("✅ {} built in {:.1}s", target, elapsed.as_secs_f64());
      }
      BuildStatus::Failed { code: Some(code) } => {
        eprintln!("❌ {} failed with exit code {}", target, code);
      }
      BuildStatus::Failed { code: None } => {
        eprintln!("❌ {} failed", target);
      }
    },
  }
}

fn print_summary(report: &RunReport) {
  println!();
  println!("Build Summary ({})", report.policy);
  println!("════════════════════════════════════════");
  for outcome in &report.outcomes {
    let marker = if outcome.status.is_success() { "✅" } else { "❌" };
    println!("  {} {} ({:.1}s)", marker, outcome.target, outcome.elapsed_secs);
  }
  for target in &report.not_attempted {
    println!("  ⏭  {} (not attempted)", target);
  }
  println!();

  if report.state == RunState::Succeeded {
    println!("✅ All {} target(s) built successfully", report.succeeded_count());
  }
}
