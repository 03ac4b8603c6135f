//! Error types for cargo-fleet with contextual messages and exit codes
//!
//! Every failure the CLI can surface is a [`FleetError`]. Each variant maps to a
//! process exit code and may carry a help line that points the operator at the
//! fix (install the toolchain, edit `fleet.toml`, re-run a single target).

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for cargo-fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// One or more target builds failed
  BuildFailed = 1,
  /// User error (config, invalid args, invalid triples)
  User = 2,
  /// System error (toolchain missing, I/O)
  System = 3,
  /// Toolchain child was terminated by a signal
  Interrupted = 130,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for cargo-fleet
#[derive(Debug)]
pub enum FleetError {
  /// Configuration errors
  Config(ConfigError),

  /// At least one target build returned a failure status
  TargetsFailed { failed: Vec<String> },

  /// The toolchain binary could not be located or executed
  ToolchainNotAvailable { program: String, reason: String },

  /// The toolchain child was killed by a signal while building `target`
  Interrupted { target: String },

  /// I/O errors
  Io(io::Error),

  /// System failure with context (I/O, process spawning)
  System { message: String, context: Option<String> },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl FleetError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    FleetError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create a system-class error (exit code 3)
  pub fn system(msg: impl Into<String>) -> Self {
    FleetError::System {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error, keeping its exit class
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      FleetError::Message { message, context, help } => FleetError::Message {
        message,
        context: Some(chain(ctx_str, context)),
        help,
      },
      FleetError::System { message, context } => FleetError::System {
        message,
        context: Some(chain(ctx_str, context)),
      },
      FleetError::Io(err) => FleetError::System {
        message: ctx_str,
        context: Some(err.to_string()),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      FleetError::Config(_) => ExitCode::User,
      FleetError::TargetsFailed { .. } => ExitCode::BuildFailed,
      FleetError::ToolchainNotAvailable { .. } => ExitCode::System,
      FleetError::Interrupted { .. } => ExitCode::Interrupted,
      FleetError::Io(_) | FleetError::System { .. } => ExitCode::System,
      FleetError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      FleetError::Config(e) => e.help_message(),
      FleetError::TargetsFailed { failed } => {
        let retry: Vec<String> = failed.iter().map(|t| format!("--target {}", t)).collect();
        Some(format!(
          "Fix the failing build, then retry just those targets with: cargo fleet build {}",
          retry.join(" ")
        ))
      }
      FleetError::ToolchainNotAvailable { program, .. } if program == "cross" => Some(
        "Install it with `cargo install cross`, or pick another program with --toolchain / CARGO_FLEET_TOOLCHAIN."
          .to_string(),
      ),
      FleetError::ToolchainNotAvailable { .. } => {
        Some("Check that the program is installed and on PATH, or pick another one with --toolchain.".to_string())
      }
      FleetError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for FleetError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FleetError::Config(e) => write!(f, "{}", e),
      FleetError::TargetsFailed { failed } => {
        write!(f, "Build failed for {} target(s): {}", failed.len(), failed.join(", "))
      }
      FleetError::ToolchainNotAvailable { program, reason } => {
        write!(f, "Toolchain '{}' is not available: {}", program, reason)
      }
      FleetError::Interrupted { target } => {
        write!(f, "Build for {} was interrupted by a signal; run aborted", target)
      }
      FleetError::Io(e) => write!(f, "I/O error: {}", e),
      FleetError::Message { message, context, .. } | FleetError::System { message, context } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

fn chain(outer: String, inner: Option<String>) -> String {
  match inner {
    Some(inner) => format!("{}\n{}", outer, inner),
    None => outer,
  }
}

impl std::error::Error for FleetError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      FleetError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for FleetError {
  fn from(err: io::Error) -> Self {
    FleetError::Io(err)
  }
}

impl From<ConfigError> for FleetError {
  fn from(err: ConfigError) -> Self {
    FleetError::Config(err)
  }
}

impl From<toml_edit::ser::Error> for FleetError {
  fn from(err: toml_edit::ser::Error) -> Self {
    FleetError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for FleetError {
  fn from(err: serde_json::Error) -> Self {
    FleetError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// An explicitly requested config file does not exist
  NotFound { path: PathBuf },

  /// fleet.toml exists but could not be parsed
  Invalid { path: PathBuf, reason: String },

  /// A target triple is empty or contains whitespace
  InvalidTriple { triple: String },

  /// The same triple appears more than once in the target list
  DuplicateTarget { triple: String },

  /// `init` refused to overwrite an existing file
  AlreadyExists { path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `cargo fleet init` to create a configuration file.".to_string()),
      ConfigError::Invalid { .. } => {
        Some("See `cargo fleet init` for the expected layout of fleet.toml.".to_string())
      }
      ConfigError::DuplicateTarget { .. } => {
        Some("Each target may appear only once; remove the repeated entry.".to_string())
      }
      ConfigError::AlreadyExists { .. } => Some("Pass --force to overwrite it.".to_string()),
      ConfigError::InvalidTriple { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Configuration file not found: {}", path.display())
      }
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid configuration in {}:\n{}", path.display(), reason)
      }
      ConfigError::InvalidTriple { triple } => {
        write!(
          f,
          "Invalid target triple '{}': must be non-empty and contain no whitespace",
          triple
        )
      }
      ConfigError::DuplicateTarget { triple } => {
        write!(f, "Target '{}' is listed more than once", triple)
      }
      ConfigError::AlreadyExists { path } => {
        write!(f, "Configuration already exists: {}", path.display())
      }
    }
  }
}

/// Result type alias for cargo-fleet
pub type FleetResult<T> = Result<T, FleetError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> FleetResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> FleetResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<FleetError>,
{
  fn context(self, ctx: impl Into<String>) -> FleetResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> FleetResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &FleetError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
