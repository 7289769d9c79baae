// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # fedgate-bin
//!
//! CLI binary for fedgate.
//!
//! ## Usage
//!
//! ```bash
//! # Store a token pair issued by the backend
//! fedgate login <access-token> --refresh-token <refresh-token>
//!
//! # Inspect the session
//! fedgate whoami
//! fedgate menu
//! fedgate landing
//!
//! # Ask the guard about a route
//! fedgate guard /dashboard/roles --fail-on-redirect
//!
//! # Re-check the stored credential as at startup
//! fedgate probe
//!
//! # Validate configuration
//! fedgate -c /etc/fedgate/fedgate.yaml validate
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
