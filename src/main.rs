mod commands;
mod core;
mod logging;

use clap::{ArgAction, Args, Parser, Subcommand};
use commands::BuildOptions;
use crate::core::error::{ExitCode, FleetError, print_error};
use crate::core::orchestrator::FailurePolicy;
use std::path::PathBuf;

/// Build release binaries for a list of target triples
#[derive(Parser)]
#[command(name = "cargo")]
#[command(bin_name = "cargo")]
#[command(styles = get_styles())]
enum CargoCli {
  Fleet(FleetCli),
}

#[derive(Parser)]
#[command(name = "fleet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
#[command(styles = get_styles())]
struct FleetCli {
  /// Path to fleet.toml (default: search the current directory)
  #[arg(long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Increase diagnostic output (-v, -vv, -vvv); RUST_LOG overrides
  #[arg(short, long, global = true, action = ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Option<Commands>,

  // Running without a subcommand is the same as `build`
  #[command(flatten)]
  build: BuildArgs,
}

#[derive(Subcommand)]
enum Commands {
  /// Build every enabled target in release mode (default)
  Build(BuildArgs),

  /// Show the effective target list
  Targets {
    /// Program that builds would invoke instead of `cross`
    #[arg(long, env = "CARGO_FLEET_TOOLCHAIN", value_name = "PROGRAM")]
    toolchain: Option<String>,

    /// Output the list in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Write a starter fleet.toml in the current directory
  Init {
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },
}

#[derive(Args, Default)]
struct BuildArgs {
  /// Build only these targets, in this order (overrides the configured list)
  #[arg(short, long = "target", value_name = "TRIPLE")]
  targets: Vec<String>,

  /// Attempt every target even after a failure, then report all failures
  #[arg(long, conflicts_with = "fail_fast")]
  keep_going: bool,

  /// Stop at the first failed target (default)
  #[arg(long)]
  fail_fast: bool,

  /// Program invoked per target instead of `cross`
  #[arg(long, env = "CARGO_FLEET_TOOLCHAIN", value_name = "PROGRAM")]
  toolchain: Option<String>,

  /// Show the commands that would run without executing them
  #[arg(long)]
  dry_run: bool,

  /// Output the run report in JSON format (toolchain stdout goes to stderr)
  #[arg(long)]
  json: bool,

  /// Extra arguments passed to every toolchain invocation (after `--`)
  #[arg(last = true, value_name = "TOOLCHAIN_ARGS")]
  toolchain_args: Vec<String>,
}

impl BuildArgs {
  fn into_options(self, config: Option<PathBuf>) -> BuildOptions {
    let policy = if self.keep_going {
      Some(FailurePolicy::KeepGoing)
    } else if self.fail_fast {
      Some(FailurePolicy::FailFast)
    } else {
      None
    };

    BuildOptions {
      targets: self.targets,
      policy,
      toolchain: self.toolchain,
      config,
      dry_run: self.dry_run,
      json: self.json,
      toolchain_args: self.toolchain_args,
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let CargoCli::Fleet(cli) = CargoCli::parse();
  logging::init(cli.verbose);

  let workspace_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(ExitCode::System.as_i32());
    }
  };

  let command = match cli.command {
    Some(command) => command,
    None => Commands::Build(cli.build),
  };

  let result = match command {
    Commands::Build(args) => commands::run_build(&workspace_root, args.into_options(cli.config)),
    Commands::Targets { toolchain, json } => {
      commands::run_targets(&workspace_root, cli.config.as_deref(), toolchain.as_deref(), json)
    }
    Commands::Init { force } => commands::run_init(&workspace_root, force),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: FleetError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
