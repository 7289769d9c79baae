// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session evaluation.
//!
//! A [`Session`] is never stored. It is projected from the current credential
//! every time it is asked for, so a token that expires or is replaced between
//! two calls is picked up on the next one.
//!
//! Every failure on the way (storage unreadable, token malformed, token
//! expired, role unknown) is logged and collapses into "no value". Callers
//! branch on `Option`, never on errors.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Claims, Credential, Role, TokenDecoder, TokenStore};
use crate::error::StoreResult;

// =============================================================================
// Session
// =============================================================================

/// The authenticated user, as seen through the current access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Subject ID (`sub`).
    pub subject_id: String,
    /// Role.
    pub role: Role,
    /// Email, if the token carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name, if the token carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Expiration (Unix timestamp).
    pub expires_at: i64,
}

// =============================================================================
// SessionEvaluator
// =============================================================================

/// Reads the credential slot and answers questions about the current session.
#[derive(Debug, Clone)]
pub struct SessionEvaluator {
    store: Arc<dyn TokenStore>,
    decoder: TokenDecoder,
}

impl SessionEvaluator {
    /// Creates an evaluator over `store`.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            decoder: TokenDecoder::new(),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Stores a freshly issued credential.
    pub fn sign_in(&self, credential: Credential) -> StoreResult<()> {
        self.store.set(credential)
    }

    /// Clears the credential.
    pub fn sign_out(&self) -> StoreResult<()> {
        self.store.clear()
    }

    /// Returns the decoded claims of the stored access token, expired or not.
    ///
    /// `None` when no token is stored, storage fails, or the token is
    /// malformed.
    pub fn claims(&self) -> Option<Claims> {
        let token = match self.store.access_token() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Credential storage unreadable, treating as signed out");
                return None;
            }
        };

        let token = token?;
        match self.decoder.decode(Some(&token)) {
            Ok(claims) => Some(claims),
            Err(e) => {
                warn!(error = %e, "Stored access token is not decodable, treating as signed out");
                None
            }
        }
    }

    /// Returns the claims of the stored token if it is unexpired at `now`.
    pub fn live_claims_at(&self, now: i64) -> Option<Claims> {
        let claims = self.claims()?;
        if claims.is_expired_at(now) {
            debug!(exp = ?claims.exp, now, "Access token expired");
            return None;
        }
        Some(claims)
    }

    /// Returns `true` if a decodable token with `exp > now` is stored.
    pub fn is_authenticated_at(&self, now: i64) -> bool {
        self.live_claims_at(now).is_some()
    }

    /// Returns `true` if a decodable, unexpired token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(now())
    }

    /// Returns the current role at `now`.
    pub fn current_role_at(&self, now: i64) -> Option<Role> {
        let claims = self.live_claims_at(now)?;
        let role = claims.role();
        if role.is_none() {
            warn!(role = ?claims.role, "Token carries no recognized role");
        }
        role
    }

    /// Returns the current role.
    pub fn current_role(&self) -> Option<Role> {
        self.current_role_at(now())
    }

    /// Returns the current user's email.
    pub fn current_email(&self) -> Option<String> {
        self.live_claims_at(now())?.email
    }

    /// Returns the current user's display name.
    pub fn current_display_name(&self) -> Option<String> {
        self.live_claims_at(now())?.name
    }

    /// Returns the current subject ID.
    pub fn current_subject(&self) -> Option<String> {
        self.live_claims_at(now())?.sub
    }

    /// Projects the full session at `now`.
    ///
    /// Requires an unexpired token with a recognized role; `sub` falls back
    /// to an empty string when absent.
    pub fn current_session_at(&self, now: i64) -> Option<Session> {
        let claims = self.live_claims_at(now)?;
        let role = claims.role()?;

        Some(Session {
            subject_id: claims.sub.unwrap_or_default(),
            role,
            email: claims.email,
            display_name: claims.name,
            expires_at: claims.exp?,
        })
    }

    /// Projects the full session.
    pub fn current_session(&self) -> Option<Session> {
        self.current_session_at(now())
    }
}

fn now() -> i64 {
    Utc::now().timestamp()
}

// =============================================================================
// Tests
// =============================================================================
