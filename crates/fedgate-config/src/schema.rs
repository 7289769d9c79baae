// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema definitions for fedgate.
//!
//! # Schema Structure
//!
//! ```text
//! AccessConfig
//! ├── routes: RoutesConfig
//! ├── storage: StorageConfig
//! ├── session: SessionConfig
//! ├── menu: Option<role name -> [RoleMenuEntry]>
//! ├── protected_routes: Vec<ProtectedRouteConfig>
//! └── logging: LoggingConfig
//! ```
//!
//! Every section is optional. An empty document yields the canonical menu,
//! the default routes and no protected subtrees.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use fedgate_core::access::{
    AccessControl, AccessRequirement, ProtectedRoutes, RoleMenuEntry, RoleMenuMap, RoutePaths,
    DEFAULT_DASHBOARD_ROOT, DEFAULT_LOGIN_PATH, DEFAULT_PROFILE_PATH, DEFAULT_UNAUTHORIZED_PATH,
};
use fedgate_core::auth::store::{DEFAULT_ACCESS_TOKEN_KEY, DEFAULT_REFRESH_TOKEN_KEY};
use fedgate_core::auth::{FileTokenStore, Role, StorageKeys, TokenStore};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Constants
// =============================================================================

/// Default credential file, relative to the config file directory.
pub const DEFAULT_STORAGE_PATH: &str = "fedgate-session.json";

/// Default startup probe timeout in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 10_000;

/// Minimum probe timeout in milliseconds.
pub const MIN_PROBE_TIMEOUT_MS: u64 = 1;

/// Maximum probe timeout in milliseconds (5 minutes).
pub const MAX_PROBE_TIMEOUT_MS: u64 = 300_000;

// =============================================================================
// Top-Level Configuration
// =============================================================================

/// The root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    /// Well-known routes.
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Credential storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Session settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Role menu override, keyed by role wire name.
    ///
    /// When present it replaces the built-in table wholesale. Roles left out
    /// get an empty menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<BTreeMap<String, Vec<RoleMenuEntry>>>,

    /// Protected route subtrees.
    #[serde(default)]
    pub protected_routes: Vec<ProtectedRouteConfig>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AccessConfig {
    /// Validates the entire configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.routes.validate()?;
        self.storage.validate()?;
        self.session.validate()?;

        let mut prefixes = HashSet::new();
        for (i, route) in self.protected_routes.iter().enumerate() {
            route.validate(i)?;
            let prefix = route.prefix.trim_end_matches('/');
            if !prefixes.insert(prefix.to_string()) {
                return Err(ConfigError::validation(
                    format!("protected_routes[{}].prefix", i),
                    format!("duplicate prefix '{}'", route.prefix),
                ));
            }
        }

        self.role_menu()?;

        Ok(())
    }

    /// Returns the role menu table: the override if present, else the
    /// canonical one.
    pub fn role_menu(&self) -> ConfigResult<RoleMenuMap> {
        let Some(ref menu) = self.menu else {
            return Ok(RoleMenuMap::canonical());
        };

        let builder = menu
            .iter()
            .fold(RoleMenuMap::builder(), |builder, (name, entries)| {
                builder.named_role(name, entries.clone())
            });

        Ok(builder.build()?)
    }

    /// Builds the protected route table.
    pub fn protected_route_table(&self) -> ConfigResult<ProtectedRoutes> {
        self.protected_routes
            .iter()
            .enumerate()
            .try_fold(ProtectedRoutes::new(), |routes, (i, route)| {
                Ok(routes.protect(&route.prefix, route.requirement(i)?))
            })
    }

    /// Builds the file-backed credential store.
    pub fn token_store(&self) -> FileTokenStore {
        self.storage.token_store()
    }

    /// Builds access control over `store`.
    pub fn access_control_with(&self, store: Arc<dyn TokenStore>) -> ConfigResult<AccessControl> {
        Ok(AccessControl::builder(store)
            .menu(self.role_menu()?)
            .paths(self.routes.route_paths())
            .protected_routes(self.protected_route_table()?)
            .build())
    }

    /// Builds access control over the configured file store.
    pub fn access_control(&self) -> ConfigResult<AccessControl> {
        self.access_control_with(Arc::new(self.token_store()))
    }
}

// =============================================================================
// Routes Configuration
// =============================================================================

/// Well-known routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutesConfig {
    /// Login route.
    #[serde(default = "default_login")]
    pub login: String,

    /// Unauthorized route.
    #[serde(default = "default_unauthorized")]
    pub unauthorized: String,

    /// Profile route, the landing fallback.
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Dashboard root, skipped when picking a landing route.
    #[serde(default = "default_dashboard_root")]
    pub dashboard_root: String,
}

impl RoutesConfig {
    /// Validates the routes.
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("routes.login", &self.login),
            ("routes.unauthorized", &self.unauthorized),
            ("routes.profile", &self.profile),
            ("routes.dashboard_root", &self.dashboard_root),
        ] {
            validate_route(field, value)?;
        }

        if self.login == self.unauthorized {
            return Err(ConfigError::validation(
                "routes.unauthorized",
                "must differ from routes.login",
            ));
        }

        Ok(())
    }

    /// Converts to core route paths.
    pub fn route_paths(&self) -> RoutePaths {
        RoutePaths {
            login: self.login.clone(),
            unauthorized: self.unauthorized.clone(),
            profile: self.profile.clone(),
            dashboard_root: self.dashboard_root.clone(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: default_login(),
            unauthorized: default_unauthorized(),
            profile: default_profile(),
            dashboard_root: default_dashboard_root(),
        }
    }
}

fn default_login() -> String {
    DEFAULT_LOGIN_PATH.to_string()
}

fn default_unauthorized() -> String {
    DEFAULT_UNAUTHORIZED_PATH.to_string()
}

fn default_profile() -> String {
    DEFAULT_PROFILE_PATH.to_string()
}

fn default_dashboard_root() -> String {
    DEFAULT_DASHBOARD_ROOT.to_string()
}

fn validate_route(field: &str, value: &str) -> ConfigResult<()> {
    if !value.starts_with('/') {
        return Err(ConfigError::validation(field, "must start with '/'"));
    }
    if value.contains(char::is_whitespace) {
        return Err(ConfigError::validation(field, "must not contain whitespace"));
    }
    Ok(())
}

// =============================================================================
// Storage Configuration
// =============================================================================

/// Credential storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Credential file path.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,

    /// Key under which the access token is stored.
    #[serde(default = "default_access_token_key")]
    pub access_token_key: String,

    /// Key under which the refresh token is stored.
    #[serde(default = "default_refresh_token_key")]
    pub refresh_token_key: String,
}

impl StorageConfig {
    /// Validates the storage configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::validation("storage.path", "cannot be empty"));
        }
        if self.access_token_key.trim().is_empty() {
            return Err(ConfigError::validation(
                "storage.access_token_key",
                "cannot be empty",
            ));
        }
        if self.refresh_token_key.trim().is_empty() {
            return Err(ConfigError::validation(
                "storage.refresh_token_key",
                "cannot be empty",
            ));
        }
        if self.access_token_key == self.refresh_token_key {
            return Err(ConfigError::validation(
                "storage.refresh_token_key",
                "must differ from storage.access_token_key",
            ));
        }
        Ok(())
    }

    /// Returns the storage keys.
    pub fn keys(&self) -> StorageKeys {
        StorageKeys {
            access_token: self.access_token_key.clone(),
            refresh_token: self.refresh_token_key.clone(),
        }
    }

    /// Builds the file-backed credential store.
    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::with_keys(&self.path, self.keys())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            access_token_key: default_access_token_key(),
            refresh_token_key: default_refresh_token_key(),
        }
    }
}

/// Returns the default storage path.
pub fn default_storage_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_PATH)
}

fn default_access_token_key() -> String {
    DEFAULT_ACCESS_TOKEN_KEY.to_string()
}

fn default_refresh_token_key() -> String {
    DEFAULT_REFRESH_TOKEN_KEY.to_string()
}

// =============================================================================
// Session Configuration
// =============================================================================

/// Session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Startup refresh probe timeout in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl SessionConfig {
    /// Validates the session configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(MIN_PROBE_TIMEOUT_MS..=MAX_PROBE_TIMEOUT_MS).contains(&self.probe_timeout_ms) {
            return Err(ConfigError::validation(
                "session.probe_timeout_ms",
                format!(
                    "{} is out of range ({}..={})",
                    self.probe_timeout_ms, MIN_PROBE_TIMEOUT_MS, MAX_PROBE_TIMEOUT_MS
                ),
            ));
        }
        Ok(())
    }

    /// Returns the probe timeout as a Duration.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}

fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

// =============================================================================
// Protected Routes
// =============================================================================

/// A protected route subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtectedRouteConfig {
    /// Subtree root, e.g. `/dashboard/roles`.
    pub prefix: String,

    /// Role wire names allowed in. Empty means any authenticated role.
    #[serde(default)]
    pub allowed_roles: Vec<String>,
}

impl ProtectedRouteConfig {
    /// Validates the entry at `index`.
    pub fn validate(&self, index: usize) -> ConfigResult<()> {
        validate_route(&format!("protected_routes[{}].prefix", index), &self.prefix)?;
        self.requirement(index).map(|_| ())
    }

    /// Converts to an access requirement.
    pub fn requirement(&self, index: usize) -> ConfigResult<AccessRequirement> {
        let roles = self
            .allowed_roles
            .iter()
            .map(|name| {
                Role::parse(name).ok_or_else(|| {
                    ConfigError::validation(
                        format!("protected_routes[{}].allowed_roles", index),
                        format!("unknown role '{}'", name),
                    )
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(AccessRequirement::roles(roles))
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Logging configuration.
///
/// Used by the `fedgate` binary when no `--log-level`/`--log-format` flag is
/// given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warning level.
    #[default]
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Returns the level as a filter directive.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Compact single-line text.
    Compact,
    /// JSON lines.
    Json,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AccessConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.routes.route_paths(), RoutePaths::default());
        assert_eq!(config.session.probe_timeout(), Duration::from_secs(10));
        assert!(config.protected_route_table().unwrap().is_empty());
    }

    #[test]
    fn test_no_menu_override_uses_canonical_table() {
        let config = AccessConfig::default();
        let menu = config.role_menu().unwrap();
        assert_eq!(
            menu.entries_for(Some(Role::Administrador)),
            RoleMenuMap::canonical().entries_for(Some(Role::Administrador))
        );
    }

    #[test]
    fn test_menu_override_replaces_wholesale() {
        let mut menu = BTreeMap::new();
        menu.insert(
            "ATLETA".to_string(),
            vec![RoleMenuEntry::new("/dashboard/resultados", "Resultados")],
        );
        let config = AccessConfig {
            menu: Some(menu),
            ..Default::default()
        };

        let table = config.role_menu().unwrap();
        assert_eq!(table.entries_for(Some(Role::Atleta)).len(), 1);
        // Roles left out of the override get nothing.
        assert!(table.entries_for(Some(Role::Administrador)).is_empty());
    }

    #[test]
    fn test_menu_override_with_unknown_role_is_rejected() {
        let mut menu = BTreeMap::new();
        menu.insert("JUEZ".to_string(), vec![RoleMenuEntry::new("/x", "X")]);
        let config = AccessConfig {
            menu: Some(menu),
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::Menu(_))));
    }

    #[test]
    fn test_route_must_start_with_slash() {
        let mut config = AccessConfig::default();
        config.routes.login = "login".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "routes.login"
        ));
    }

    #[test]
    fn test_storage_keys_must_differ() {
        let mut config = AccessConfig::default();
        config.storage.refresh_token_key = config.storage.access_token_key.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_probe_timeout_range() {
        let mut config = AccessConfig::default();
        config.session.probe_timeout_ms = 0;
        assert!(config.validate().is_err());

        config.session.probe_timeout_ms = MAX_PROBE_TIMEOUT_MS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_protected_routes_conversion() {
        let config = AccessConfig {
            protected_routes: vec![
                ProtectedRouteConfig {
                    prefix: "/dashboard".to_string(),
                    allowed_roles: vec![],
                },
                ProtectedRouteConfig {
                    prefix: "/dashboard/roles".to_string(),
                    allowed_roles: vec!["administrador".to_string()],
                },
            ],
            ..Default::default()
        };

        assert!(config.validate().is_ok());
        let table = config.protected_route_table().unwrap();
        assert_eq!(table.len(), 2);
        let req = table.requirement_for("/dashboard/roles").unwrap();
        assert!(req.allows(Role::Administrador));
        assert!(!req.allows(Role::Entrenador));
    }

    #[test]
    fn test_protected_route_with_unknown_role_is_rejected() {
        let config = AccessConfig {
            protected_routes: vec![ProtectedRouteConfig {
                prefix: "/dashboard".to_string(),
                allowed_roles: vec!["JUEZ".to_string()],
            }],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_protected_prefix_is_rejected() {
        let route = ProtectedRouteConfig {
            prefix: "/dashboard".to_string(),
            allowed_roles: vec![],
        };
        let mut duplicate = route.clone();
        duplicate.prefix = "/dashboard/".to_string();

        let config = AccessConfig {
            protected_routes: vec![route, duplicate],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_conversion() {
        let storage = StorageConfig {
            path: PathBuf::from("/tmp/session.json"),
            access_token_key: "at".to_string(),
            refresh_token_key: "rt".to_string(),
        };
        let store = storage.token_store();
        assert_eq!(store.path(), PathBuf::from("/tmp/session.json").as_path());
        assert_eq!(store.keys().access_token, "at");
        assert_eq!(store.keys().refresh_token, "rt");
    }
}
