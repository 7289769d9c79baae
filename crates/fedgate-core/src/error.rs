// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for session and access resolution.
//!
//! None of these errors is ever shown to an end user. Decode and store
//! failures are absorbed by [`SessionEvaluator`](crate::auth::SessionEvaluator)
//! and collapse into "no session"; menu errors only surface while a
//! [`RoleMenuMap`](crate::access::RoleMenuMap) is being built from
//! configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for token store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// DecodeError
// =============================================================================

/// A bearer token could not be turned into claims.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No token was supplied, or it was blank.
    #[error("No token present")]
    Missing,

    /// The token does not have the `header.payload.signature` shape.
    #[error("Expected 3 token segments, found {found}")]
    SegmentCount {
        /// Number of dot-separated segments found.
        found: usize,
    },

    /// Header or payload is not decodable base64url JSON.
    #[error("Malformed token: {message}")]
    Malformed {
        /// Error message.
        message: String,
    },
}

impl DecodeError {
    /// Creates a malformed token error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

// =============================================================================
// StoreError
// =============================================================================

/// Failure reading or writing the credential slot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O failed.
    #[error("Credential storage I/O failed at '{path}': {source}")]
    Io {
        /// Backing file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Stored content could not be (de)serialized.
    #[error("Credential storage is corrupt: {message}")]
    Corrupt {
        /// Error message.
        message: String,
    },
}

impl StoreError {
    /// Creates an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a corrupt storage error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }
}

// =============================================================================
// MenuError
// =============================================================================

/// A role menu table violates its structural rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// A path appears twice within one role's entries.
    #[error("Duplicate menu path '{path}' for role {role}")]
    DuplicatePath {
        /// Role whose table is invalid.
        role: String,
        /// The duplicated path.
        path: String,
    },

    /// An entry nests deeper than one level.
    #[error("Menu entry '{path}' for role {role} nests more than one level")]
    NestingTooDeep {
        /// Role whose table is invalid.
        role: String,
        /// Path of the offending child.
        path: String,
    },

    /// An entry has an empty path.
    #[error("Empty menu path for role {role}")]
    EmptyPath {
        /// Role whose table is invalid.
        role: String,
    },

    /// The role name is not a known role.
    #[error("Unknown role '{role}' in menu table")]
    UnknownRole {
        /// The unrecognized role name.
        role: String,
    },
}

// =============================================================================
// RefreshError
// =============================================================================

/// The startup refresh probe could not renew the credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// The issuer rejected the credential.
    #[error("Credential rejected: {message}")]
    Rejected {
        /// Error message.
        message: String,
    },

    /// The probe did not settle in time.
    #[error("Refresh probe timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// The refresher could not be reached.
    #[error("Refresh unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
    },
}

impl RefreshError {
    /// Creates a rejected error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        assert_eq!(DecodeError::Missing.to_string(), "No token present");
        assert_eq!(
            DecodeError::SegmentCount { found: 1 }.to_string(),
            "Expected 3 token segments, found 1"
        );
    }

    #[test]
    fn test_menu_error_display() {
        let err = MenuError::EmptyPath {
            role: "ATLETA".to_string(),
        };
        assert_eq!(err.to_string(), "Empty menu path for role ATLETA");
    }
}
