// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `login`, `logout`, `whoami` and `probe` commands.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use fedgate_core::{BootstrapState, Credential, LocalRefresher, SessionBootstrap, TokenDecoder};
use tracing::info;

use super::load_config;
use crate::cli::{Cli, LoginArgs, OutputArgs, OutputFormat, ProbeArgs};
use crate::error::{BinError, BinResult};

/// Executes the `login` command.
///
/// The access token must decode and be unexpired before it is stored.
pub fn login(cli: &Cli, args: LoginArgs) -> BinResult<()> {
    let config = load_config(cli)?;

    let claims = TokenDecoder::new()
        .decode(Some(&args.access_token))
        .map_err(|e| BinError::invalid_input(format!("access token rejected: {}", e)))?;
    if claims.is_expired() {
        return Err(BinError::invalid_input("access token is expired"));
    }

    let access = config.access_control()?;
    access
        .session()
        .sign_in(Credential::new(args.access_token, args.refresh_token))?;

    info!(subject = ?claims.sub, role = ?claims.role, "Signed in");

    let who = claims
        .email
        .as_deref()
        .or(claims.sub.as_deref())
        .unwrap_or("(anonymous)");
    println!("Signed in as {}", who);
    if claims.role().is_none() {
        println!(
            "Warning: role {:?} is not recognized; no menu will be shown",
            claims.role.as_deref().unwrap_or("")
        );
    }
    println!("Landing route: {}", access.navigation().default_landing_route());

    Ok(())
}

/// Executes the `logout` command.
pub fn logout(cli: &Cli) -> BinResult<()> {
    let config = load_config(cli)?;
    let access = config.access_control()?;

    access.session().sign_out()?;
    info!("Signed out");
    println!("Signed out");

    Ok(())
}

/// Executes the `whoami` command.
pub fn whoami(cli: &Cli, args: OutputArgs) -> BinResult<()> {
    let config = load_config(cli)?;
    let access = config.access_control()?;

    let claims = access
        .session()
        .live_claims_at(Utc::now().timestamp())
        .ok_or(BinError::NotAuthenticated)?;
    let role = claims.role();

    match args.format {
        OutputFormat::Text => {
            println!("Subject:  {}", claims.sub.as_deref().unwrap_or("-"));
            println!("Email:    {}", claims.email.as_deref().unwrap_or("-"));
            println!("Name:     {}", claims.name.as_deref().unwrap_or("-"));
            match role {
                Some(role) => println!("Role:     {}", role),
                None => println!(
                    "Role:     {} (unrecognized)",
                    claims.role.as_deref().unwrap_or("-")
                ),
            }
            if let Some(expires) = claims.expires_at() {
                println!("Expires:  {}", expires.to_rfc3339());
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "authenticated": true,
                "subject_id": claims.sub,
                "email": claims.email,
                "display_name": claims.name,
                "role": role,
                "raw_role": claims.role,
                "expires_at": claims.exp,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Executes the `probe` command.
///
/// Runs the startup probe with the offline refresher: a stored credential
/// that no longer decodes or has expired is cleared.
pub async fn probe(cli: &Cli, args: ProbeArgs) -> BinResult<()> {
    let config = load_config(cli)?;
    let access = config.access_control()?;

    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.session.probe_timeout());

    let mut handle = SessionBootstrap::new(access.session().clone(), Arc::new(LocalRefresher::new()))
        .with_timeout(timeout)
        .spawn();

    if handle.state() == BootstrapState::Loading {
        println!("Probing stored session...");
    }

    match handle.ready().await {
        BootstrapState::Ready {
            authenticated: true,
        } => {
            println!("Session ready");
            println!("Landing route: {}", access.navigation().default_landing_route());
        }
        _ => println!("No session; landing route: {}", access.paths().login),
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use fedgate_core::{Claims, Role, TokenStore};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::path::Path;

    fn token(claims: &Claims) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(b"cli")).unwrap()
    }

    fn write_config(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("fedgate.yaml");
        std::fs::write(&path, "storage:\n  path: session.json\n").unwrap();
        path
    }

    fn cli(config: &Path, args: &[&str]) -> Cli {
        let mut argv = vec!["fedgate", "-c", config.to_str().unwrap()];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    fn login_args(access_token: String) -> LoginArgs {
        LoginArgs {
            access_token,
            refresh_token: "refresh".to_string(),
        }
    }

    #[test]
    fn test_login_whoami_logout() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let access = token(&Claims::builder("7").role(Role::Entrenador).email("e@fed.org").build());

        login(&cli(&config, &["logout"]), login_args(access)).unwrap();
        assert!(dir.path().join("session.json").exists());

        whoami(&cli(&config, &["whoami"]), OutputArgs::default()).unwrap();

        logout(&cli(&config, &["logout"])).unwrap();
        assert!(matches!(
            whoami(&cli(&config, &["whoami"]), OutputArgs::default()),
            Err(BinError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_login_rejects_malformed_and_expired_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path());
        let c = cli(&config, &["logout"]);

        let err = login(&c, login_args("not-a-jwt".to_string())).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let expired = token(&Claims::builder("7").role(Role::Atleta).expires_in(-5).build());
        assert!(login(&c, login_args(expired)).is_err());

        assert!(!dir.path().join("session.json").exists());
    }

    #[tokio::test]
    async fn test_probe_clears_expired_session() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path());

        let config = fedgate_config::load_config(&config_path).unwrap();
        let expired = token(&Claims::builder("7").role(Role::Atleta).expires_in(-5).build());
        config
            .token_store()
            .set(Credential::new(expired, "refresh"))
            .unwrap();

        probe(&cli(&config_path, &["probe"]), ProbeArgs::default())
            .await
            .unwrap();

        assert!(config.token_store().get().unwrap().is_none());
    }
}
