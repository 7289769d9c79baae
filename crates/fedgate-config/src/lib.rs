// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # fedgate-config
//!
//! Configuration management for fedgate.
//!
//! ## Features
//!
//! - **Schema Definition**: routes, credential storage, session probe,
//!   menu override and protected route subtrees, with validation
//! - **Multi-Format Support**: YAML, TOML, and JSON configuration files
//! - **Environment Overrides**: override values via `FEDGATE_*` variables
//! - **Core Conversions**: build [`AccessControl`](fedgate_core::AccessControl)
//!   straight from a loaded config
//!
//! ## Quick Start
//!
//! ```no_run
//! use fedgate_config::loader::load_config;
//!
//! let config = load_config("fedgate.yaml").unwrap();
//! let access = config.access_control().unwrap();
//!
//! println!("Landing: {}", access.navigation().default_landing_route());
//! ```
//!
//! ## Example File
//!
//! ```yaml
//! routes:
//!   login: /login
//!   unauthorized: /unauthorized
//!
//! storage:
//!   path: "${FEDGATE_HOME:.}/session.json"
//!
//! protected_routes:
//!   - prefix: /dashboard
//!   - prefix: /dashboard/roles
//!     allowed_roles: [ADMINISTRADOR]
//! ```
//!
//! The `menu` section, when present, replaces the built-in role menu table
//! entirely; it is never merged with it.

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod error;
pub mod loader;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, load_config_str, ConfigFormat, ConfigLoader, ConfigLoaderBuilder};
pub use schema::{
    AccessConfig, LogFormat, LogLevel, LoggingConfig, ProtectedRouteConfig, RoutesConfig,
    SessionConfig, StorageConfig,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// =============================================================================
// Prelude
// =============================================================================

/// Convenience re-exports for common use cases.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult};
    pub use crate::loader::{load_config, ConfigLoader};
    pub use crate::schema::AccessConfig;
}

// =============================================================================
// Tests
// =============================================================================
