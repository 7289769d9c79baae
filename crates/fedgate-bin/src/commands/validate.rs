// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use std::path::PathBuf;

use fedgate_core::Role;

use super::DEFAULT_CONFIG_FILE;
use crate::cli::{Cli, OutputFormat, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Executes the `validate` command to validate configuration.
pub fn validate(cli: &Cli, args: ValidateArgs) -> BinResult<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    if !config_path.exists() {
        return Err(BinError::Configuration(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let config = fedgate_config::load_config(&config_path).map_err(|e| {
        BinError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    let menu = config.role_menu()?;

    let mut warnings: Vec<String> = Vec::new();

    if config.protected_routes.is_empty() {
        warnings.push("No protected routes configured; every path renders".to_string());
    }
    for role in Role::ALL {
        if menu.entries_for(Some(role)).is_empty() {
            warnings.push(format!("Role {} has no menu entries", role));
        }
    }
    if let Some(parent) = config.storage.path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            warnings.push(format!(
                "Storage directory does not exist yet: {}",
                parent.display()
            ));
        }
    }

    match args.format {
        OutputFormat::Text => {
            println!("✓ Configuration is valid: {}", config_path.display());
            println!();
            println!("Summary:");
            println!("  Login route:      {}", config.routes.login);
            println!("  Unauthorized:     {}", config.routes.unauthorized);
            println!("  Storage:          {}", config.storage.path.display());
            println!("  Probe timeout:    {} ms", config.session.probe_timeout_ms);
            println!("  Protected routes: {}", config.protected_routes.len());
            println!(
                "  Menu:             {}",
                if config.menu.is_some() { "override" } else { "built-in" }
            );

            if !warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &warnings {
                    println!("  ⚠ {}", warning);
                }
            }

            if args.show_config {
                println!();
                println!("Parsed configuration:");
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "valid": true,
                "config_path": config_path.display().to_string(),
                "summary": {
                    "login": config.routes.login,
                    "unauthorized": config.routes.unauthorized,
                    "storage_path": config.storage.path.display().to_string(),
                    "probe_timeout_ms": config.session.probe_timeout_ms,
                    "protected_route_count": config.protected_routes.len(),
                    "menu_override": config.menu.is_some(),
                },
                "warnings": warnings,
                "config": if args.show_config { Some(&config) } else { None },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
