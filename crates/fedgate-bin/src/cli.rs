// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `login`: Store a token pair
//! - `logout`: Clear the stored token pair
//! - `whoami`: Show the current session
//! - `menu`: Show the navigation menu for the session or a role
//! - `landing`: Show the landing route for the session or a role
//! - `guard`: Evaluate navigation to a path
//! - `probe`: Run the startup refresh probe
//! - `validate`: Validate the configuration file
//! - `version`: Show version information

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fedgate_config::LoggingConfig;

// =============================================================================
// Main CLI Structure
// =============================================================================

/// fedgate - session and access control for the federation admin console
#[derive(Parser, Debug)]
#[command(
    name = "fedgate",
    author = "Sylvex <contact@sylvex.io>",
    version = fedgate_core::VERSION,
    about = "Session and access control for the federation admin console",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path (defaults to ./fedgate.yaml when present)
    #[arg(short, long, env = "FEDGATE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overriding the configuration
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Log format (text, json, compact), overriding the configuration
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Enable quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Store an access/refresh token pair
    ///
    /// The access token must decode as a bearer token. It is not verified.
    Login(LoginArgs),

    /// Clear the stored token pair
    Logout,

    /// Show the current session
    Whoami(OutputArgs),

    /// Show the navigation menu
    Menu(RoleArgs),

    /// Show the default landing route
    Landing(RoleArgs),

    /// Evaluate navigation to a path
    Guard(GuardArgs),

    /// Run the startup refresh probe against the stored credential
    Probe(ProbeArgs),

    /// Validate the configuration file
    Validate(ValidateArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `login` command.
#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Access token
    pub access_token: String,

    /// Refresh token
    #[arg(short, long, env = "FEDGATE_REFRESH_TOKEN")]
    pub refresh_token: String,
}

/// Output format selection.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for `menu` and `landing`.
#[derive(Args, Debug, Clone, Default)]
pub struct RoleArgs {
    /// Resolve for this role instead of the current session
    #[arg(short, long)]
    pub role: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `guard` command.
#[derive(Args, Debug, Clone)]
pub struct GuardArgs {
    /// Route path, e.g. /dashboard/roles
    pub path: String,

    /// Exit with an error when the decision is a redirect
    #[arg(long)]
    pub fail_on_redirect: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `probe` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ProbeArgs {
    /// Probe timeout in milliseconds (overrides the configuration)
    #[arg(short, long)]
    pub timeout_ms: Option<u64>,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Show parsed configuration after validation
    #[arg(short, long)]
    pub show_config: bool,

    /// Output format for validation results
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

impl From<fedgate_config::LogFormat> for LogFormat {
    fn from(format: fedgate_config::LogFormat) -> Self {
        match format {
            fedgate_config::LogFormat::Text => LogFormat::Text,
            fedgate_config::LogFormat::Json => LogFormat::Json,
            fedgate_config::LogFormat::Compact => LogFormat::Compact,
        }
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic parsing
    Json,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective log level.
    ///
    /// `--quiet` and `--verbose` win over `--log-level`, which wins over the
    /// configured level (file or `FEDGATE_LOG_LEVEL`).
    pub fn effective_log_level(&self, config: Option<&LoggingConfig>) -> &str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else if let Some(ref level) = self.log_level {
            level
        } else {
            config.map(|c| c.level).unwrap_or_default().as_str()
        }
    }

    /// Get the effective log format: `--log-format`, else the configured
    /// format (file or `FEDGATE_LOG_FORMAT`).
    pub fn effective_log_format(&self, config: Option<&LoggingConfig>) -> LogFormat {
        self.log_format
            .or_else(|| config.map(|c| c.format.into()))
            .unwrap_or_default()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_command() {
        let cli = Cli::parse_from(["fedgate", "login", "a.b.c", "-r", "refresh"]);
        if let Commands::Login(args) = cli.command {
            assert_eq!(args.access_token, "a.b.c");
            assert_eq!(args.refresh_token, "refresh");
        } else {
            panic!("Expected Login command");
        }
    }

    #[test]
    fn test_guard_command() {
        let cli = Cli::parse_from([
            "fedgate",
            "guard",
            "/dashboard/roles",
            "--fail-on-redirect",
            "-f",
            "json",
        ]);
        if let Commands::Guard(args) = cli.command {
            assert_eq!(args.path, "/dashboard/roles");
            assert!(args.fail_on_redirect);
            assert_eq!(args.format, OutputFormat::Json);
        } else {
            panic!("Expected Guard command");
        }
    }

    #[test]
    fn test_menu_with_role() {
        let cli = Cli::parse_from(["fedgate", "menu", "--role", "ENTRENADOR"]);
        if let Commands::Menu(args) = cli.command {
            assert_eq!(args.role.as_deref(), Some("ENTRENADOR"));
        } else {
            panic!("Expected Menu command");
        }
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::parse_from(["fedgate", "-c", "/etc/fedgate/fedgate.yaml", "logout"]);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/fedgate/fedgate.yaml")));
        assert!(matches!(cli.command, Commands::Logout));
    }

    #[test]
    fn test_quiet_mode() {
        let cli = Cli::parse_from(["fedgate", "-q", "whoami"]);
        assert!(cli.quiet);
        assert_eq!(cli.effective_log_level(None), "error");
    }

    #[test]
    fn test_verbose_mode() {
        let cli = Cli::parse_from(["fedgate", "-v", "probe", "-t", "500"]);
        assert_eq!(cli.effective_log_level(None), "debug");
        if let Commands::Probe(args) = cli.command {
            assert_eq!(args.timeout_ms, Some(500));
        } else {
            panic!("Expected Probe command");
        }
    }

    #[test]
    fn test_log_settings_default() {
        let cli = Cli::parse_from(["fedgate", "whoami"]);
        assert_eq!(cli.effective_log_level(None), "warn");
        assert_eq!(cli.effective_log_format(None), LogFormat::Text);
    }

    #[test]
    fn test_log_settings_from_config() {
        let logging = LoggingConfig {
            level: fedgate_config::LogLevel::Debug,
            format: fedgate_config::LogFormat::Json,
        };

        let cli = Cli::parse_from(["fedgate", "whoami"]);
        assert_eq!(cli.effective_log_level(Some(&logging)), "debug");
        assert_eq!(cli.effective_log_format(Some(&logging)), LogFormat::Json);
    }

    #[test]
    fn test_log_flags_override_config() {
        let logging = LoggingConfig {
            level: fedgate_config::LogLevel::Debug,
            format: fedgate_config::LogFormat::Json,
        };

        let cli = Cli::parse_from([
            "fedgate",
            "--log-level",
            "trace",
            "--log-format",
            "compact",
            "whoami",
        ]);
        assert_eq!(cli.effective_log_level(Some(&logging)), "trace");
        assert_eq!(cli.effective_log_format(Some(&logging)), LogFormat::Compact);

        let cli = Cli::parse_from(["fedgate", "-q", "--log-level", "trace", "whoami"]);
        assert_eq!(cli.effective_log_level(Some(&logging)), "error");
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["fedgate"]).is_err());
    }
}
