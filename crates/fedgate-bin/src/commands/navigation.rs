// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `menu`, `landing` and `guard` commands.

use fedgate_core::{Role, RoleMenuEntry};

use super::{load_config, parse_role};
use crate::cli::{Cli, GuardArgs, OutputFormat, RoleArgs};
use crate::error::{BinError, BinResult};

/// Executes the `menu` command.
pub fn menu(cli: &Cli, args: RoleArgs) -> BinResult<()> {
    let config = load_config(cli)?;
    let access = config.access_control()?;
    let navigation = access.navigation();

    let entries = match args.role.as_deref() {
        Some(name) => navigation.menu_for_role(Some(parse_role(name)?)),
        None => navigation.menu_for_current_session(),
    };

    match args.format {
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("(no menu)");
            }
            print_entries(&entries);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }

    Ok(())
}

/// Executes the `landing` command.
pub fn landing(cli: &Cli, args: RoleArgs) -> BinResult<()> {
    let config = load_config(cli)?;
    let access = config.access_control()?;
    let navigation = access.navigation();

    let (role, route): (Option<Role>, String) = match args.role.as_deref() {
        Some(name) => {
            let role = parse_role(name)?;
            (Some(role), navigation.landing_route_for(Some(role)))
        }
        None => (
            access.session().current_role(),
            navigation.default_landing_route(),
        ),
    };

    match args.format {
        OutputFormat::Text => println!("{}", route),
        OutputFormat::Json => {
            let output = serde_json::json!({ "role": role, "landing_route": route });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Executes the `guard` command.
pub fn guard(cli: &Cli, args: GuardArgs) -> BinResult<()> {
    let config = load_config(cli)?;
    let access = config.access_control()?;

    let (decision, target) = access.resolve(&args.path);

    match args.format {
        OutputFormat::Text => println!("{} -> {}", decision, target),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": args.path,
                "decision": decision,
                "target": target,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    if args.fail_on_redirect && !decision.is_render() {
        return Err(BinError::Redirected {
            path: args.path,
            decision,
            target,
        });
    }

    Ok(())
}

fn print_entries(entries: &[RoleMenuEntry]) {
    for entry in entries {
        println!("{:<32} {}", entry.path, entry.label);
        for child in &entry.children {
            println!("  {:<30} {}", child.path, child.label);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
