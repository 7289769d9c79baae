// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `login`, `logout`, `whoami`, `probe`: credential and session
//! - `menu`, `landing`, `guard`: navigation
//! - `validate`: configuration check
//! - `version`: version information

mod navigation;
mod session;
mod validate;
mod version;

use std::path::Path;

use fedgate_config::{AccessConfig, ConfigFormat, ConfigLoader};
use fedgate_core::Role;
use tracing::debug;

pub use navigation::{guard, landing, menu};
pub use session::{login, logout, probe, whoami};
pub use validate::validate;
pub use version::version;

use crate::cli::{Cli, Commands};
use crate::error::{BinError, BinResult};

/// Configuration file looked up in the working directory when `--config`
/// is not given.
pub const DEFAULT_CONFIG_FILE: &str = "fedgate.yaml";

/// Executes the appropriate command based on CLI arguments.
pub async fn execute(cli: Cli) -> BinResult<()> {
    match cli.command.clone() {
        Commands::Login(args) => session::login(&cli, args),
        Commands::Logout => session::logout(&cli),
        Commands::Whoami(args) => session::whoami(&cli, args),
        Commands::Probe(args) => session::probe(&cli, args).await,
        Commands::Menu(args) => navigation::menu(&cli, args),
        Commands::Landing(args) => navigation::landing(&cli, args),
        Commands::Guard(args) => navigation::guard(&cli, args),
        Commands::Validate(args) => validate::validate(&cli, args),
        Commands::Version => version::version(&cli),
    }
}

/// Loads the configuration for a command.
///
/// An explicit `--config` must exist. Without one, `./fedgate.yaml` is used
/// if present, else the built-in defaults (still subject to `FEDGATE_*`
/// overrides).
pub fn load_config(cli: &Cli) -> BinResult<AccessConfig> {
    if let Some(ref path) = cli.config {
        return Ok(fedgate_config::load_config(path)?);
    }

    let default = Path::new(DEFAULT_CONFIG_FILE);
    if default.exists() {
        return Ok(fedgate_config::load_config(default)?);
    }

    debug!("No configuration file, using defaults");
    Ok(ConfigLoader::new().load_from_str("", ConfigFormat::Yaml)?)
}

/// Parses a role wire name given on the command line.
pub(crate) fn parse_role(name: &str) -> BinResult<Role> {
    Role::parse(name).ok_or_else(|| {
        let known: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
        BinError::invalid_input(format!(
            "unknown role '{}' (expected one of {})",
            name,
            known.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("entrenador").unwrap(), Role::Entrenador);
        let err = parse_role("JUEZ").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("ADMINISTRADOR"));
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let cli = <Cli as clap::Parser>::parse_from([
            "fedgate",
            "-c",
            "/nonexistent/fedgate.yaml",
            "whoami",
        ]);
        assert!(matches!(load_config(&cli), Err(BinError::Config(_))));
    }
}
