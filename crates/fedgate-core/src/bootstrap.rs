// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Startup session refresh.
//!
//! When the console starts it renders immediately in a loading state and
//! probes the stored credential once in the background. Whatever the probe
//! returns, the UI then swaps to normal rendering:
//!
//! - no credential: ready, signed out, the refresher is never called
//! - refresh succeeds: the renewed credential replaces the stored one
//! - refresh fails or times out: the credential is cleared, signed out
//!
//! The probe never surfaces an error. Dropping the [`BootstrapHandle`]
//! before it settles discards the result.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::auth::{Credential, SessionEvaluator, TokenDecoder};
use crate::error::RefreshError;

/// Default probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// SessionRefresher
// =============================================================================

/// Renews a credential with its issuer.
#[async_trait]
pub trait SessionRefresher: Send + Sync {
    /// Exchanges `credential` for a renewed one.
    async fn refresh(&self, credential: &Credential) -> Result<Credential, RefreshError>;
}

/// Offline refresher: accepts the stored credential as-is if its access
/// token is decodable and unexpired.
#[derive(Debug, Clone, Default)]
pub struct LocalRefresher {
    decoder: TokenDecoder,
}

impl LocalRefresher {
    /// Creates a local refresher.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRefresher for LocalRefresher {
    async fn refresh(&self, credential: &Credential) -> Result<Credential, RefreshError> {
        let claims = self
            .decoder
            .decode(Some(&credential.access_token))
            .map_err(|e| RefreshError::rejected(e.to_string()))?;

        if claims.is_expired() {
            return Err(RefreshError::rejected("access token expired"));
        }

        Ok(credential.clone())
    }
}

// =============================================================================
// BootstrapState
// =============================================================================

/// Progress of the startup probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// Probe in flight; render the loading state.
    Loading,
    /// Probe settled.
    Ready {
        /// Whether a valid session exists after the probe.
        authenticated: bool,
    },
}

impl BootstrapState {
    /// Returns `true` once the probe has settled.
    pub fn is_ready(&self) -> bool {
        matches!(self, BootstrapState::Ready { .. })
    }
}

// =============================================================================
// SessionBootstrap
// =============================================================================

/// One-shot startup probe over a session.
pub struct SessionBootstrap {
    session: SessionEvaluator,
    refresher: Arc<dyn SessionRefresher>,
    timeout: Duration,
}

impl SessionBootstrap {
    /// Creates a probe with the default timeout.
    pub fn new(session: SessionEvaluator, refresher: Arc<dyn SessionRefresher>) -> Self {
        Self {
            session,
            refresher,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Sets the probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the probe to completion.
    pub async fn probe(&self) -> BootstrapState {
        let credential = match self.session.store().get() {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                debug!("No stored credential, skipping refresh probe");
                return BootstrapState::Ready {
                    authenticated: false,
                };
            }
            Err(e) => {
                warn!(error = %e, "Credential storage unreadable during startup");
                return BootstrapState::Ready {
                    authenticated: false,
                };
            }
        };

        let outcome = match tokio::time::timeout(self.timeout, self.refresher.refresh(&credential)).await {
            Ok(result) => result,
            Err(_) => Err(RefreshError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        };

        match outcome {
            Ok(renewed) => {
                if let Err(e) = self.session.sign_in(renewed) {
                    warn!(error = %e, "Failed to store refreshed credential");
                }
            }
            Err(e) => {
                info!(error = %e, "Startup refresh failed, clearing credential");
                if let Err(e) = self.session.sign_out() {
                    warn!(error = %e, "Failed to clear credential");
                }
            }
        }

        BootstrapState::Ready {
            authenticated: self.session.is_authenticated(),
        }
    }

    /// Runs the probe on the tokio runtime.
    pub fn spawn(self) -> BootstrapHandle {
        let (tx, rx) = watch::channel(BootstrapState::Loading);
        let task = tokio::spawn(async move {
            let state = self.probe().await;
            let _ = tx.send(state);
        });

        BootstrapHandle { state: rx, task }
    }
}

impl std::fmt::Debug for SessionBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionBootstrap")
            .field("timeout", &self.timeout)
            .finish()
    }
}

// =============================================================================
// BootstrapHandle
// =============================================================================

/// Handle on a spawned probe. Dropping it aborts the probe.
#[derive(Debug)]
pub struct BootstrapHandle {
    state: watch::Receiver<BootstrapState>,
    task: JoinHandle<()>,
}

impl BootstrapHandle {
    /// Returns the current state without waiting.
    pub fn state(&self) -> BootstrapState {
        *self.state.borrow()
    }

    /// Waits for the probe to settle.
    ///
    /// A probe that died without reporting counts as signed out.
    pub async fn ready(&mut self) -> BootstrapState {
        loop {
            let state = *self.state.borrow_and_update();
            if state.is_ready() {
                return state;
            }
            if self.state.changed().await.is_err() {
                let state = *self.state.borrow();
                return if state.is_ready() {
                    state
                } else {
                    BootstrapState::Ready {
                        authenticated: false,
                    }
                };
            }
        }
    }
}

impl Drop for BootstrapHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// =============================================================================
// Tests
// =============================================================================
