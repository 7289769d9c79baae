// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the fedgate binary.

use fedgate_core::{RouteDecision, StoreError};
use thiserror::Error;

/// Result type alias for fedgate-bin operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors that can occur in the fedgate binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid command input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Runtime error.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// No valid session.
    #[error("Not signed in")]
    NotAuthenticated,

    /// The guard redirected.
    #[error("Navigation to '{path}' redirected ({decision}) to '{target}'")]
    Redirected {
        /// Requested path.
        path: String,
        /// Guard decision.
        decision: RouteDecision,
        /// Redirect target.
        target: String,
    },

    /// Config parsing error.
    #[error("Config error: {0}")]
    Config(#[from] fedgate_config::ConfigError),

    /// Credential storage error.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        /// The context description.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<BinError>,
    },
}

impl BinError {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates a runtime error.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    /// Creates an I/O error.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Adds context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Config(_) => 1,
            Self::InvalidInput(_) => 2,
            Self::Runtime(_) => 3,
            Self::Io(_) | Self::Store(_) => 4,
            Self::NotAuthenticated => 5,
            Self::Redirected { .. } => 6,
            Self::WithContext { source, .. } => source.exit_code(),
        }
    }
}

impl From<std::io::Error> for BinError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<anyhow::Error> for BinError {
    fn from(err: anyhow::Error) -> Self {
        Self::Runtime(err.to_string())
    }
}

impl From<serde_json::Error> for BinError {
    fn from(err: serde_json::Error) -> Self {
        Self::Runtime(format!("failed to render output: {}", err))
    }
}

// =============================================================================
// Error Reporting
// =============================================================================

/// Reports an error with appropriate formatting.
pub fn report_error(error: &BinError) {
    eprintln!("Error: {}", error);

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  Caused by: {}", cause);
        source = cause.source();
    }
}

/// Reports an error and exits with the appropriate code.
pub fn report_error_and_exit(error: BinError) -> ! {
    report_error(&error);
    std::process::exit(error.exit_code())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = BinError::config("test error");
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_error_with_context() {
        let err = BinError::config("inner error").with_context("outer context");
        assert_eq!(err.to_string(), "outer context: Configuration error: inner error");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(BinError::config("test").exit_code(), 1);
        assert_eq!(BinError::invalid_input("test").exit_code(), 2);
        assert_eq!(BinError::runtime("test").exit_code(), 3);
        assert_eq!(BinError::io("test").exit_code(), 4);
        assert_eq!(BinError::NotAuthenticated.exit_code(), 5);
        assert_eq!(
            BinError::Redirected {
                path: "/dashboard/roles".to_string(),
                decision: RouteDecision::RedirectToUnauthorized,
                target: "/unauthorized".to_string(),
            }
            .exit_code(),
            6
        );
    }

    #[test]
    fn test_redirect_message() {
        let err = BinError::Redirected {
            path: "/dashboard".to_string(),
            decision: RouteDecision::RedirectToLogin,
            target: "/login".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Navigation to '/dashboard' redirected (redirect_to_login) to '/login'"
        );
    }
}
