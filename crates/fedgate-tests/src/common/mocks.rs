// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! Mock refreshers and stores for exercising session components in
//! isolation. Every mock records its interactions for verification.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use fedgate_core::{Credential, RefreshError, SessionRefresher, StoreError, TokenStore};

// =============================================================================
// Mock Refresher
// =============================================================================

/// What a [`MockRefresher`] does when called.
#[derive(Debug, Clone)]
pub enum RefreshBehavior {
    /// Return this credential.
    Renew(Credential),
    /// Return the credential it was given.
    Echo,
    /// Fail with a rejection.
    Reject(String),
    /// Fail as unavailable.
    Unavailable(String),
    /// Sleep, then echo.
    Hang(Duration),
}

/// A configurable refresher that counts its calls.
#[derive(Debug)]
pub struct MockRefresher {
    behavior: Mutex<RefreshBehavior>,
    calls: AtomicU64,
    last_seen: Mutex<Option<Credential>>,
}

impl MockRefresher {
    /// Creates a refresher with the given behavior.
    pub fn new(behavior: RefreshBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            calls: AtomicU64::new(0),
            last_seen: Mutex::new(None),
        }
    }

    /// Always renews to `credential`.
    pub fn renewing(credential: Credential) -> Self {
        Self::new(RefreshBehavior::Renew(credential))
    }

    /// Always rejects.
    pub fn rejecting() -> Self {
        Self::new(RefreshBehavior::Reject("refresh token revoked".to_string()))
    }

    /// Never answers within `delay`.
    pub fn hanging(delay: Duration) -> Self {
        Self::new(RefreshBehavior::Hang(delay))
    }

    /// Changes the behavior for subsequent calls.
    pub fn set_behavior(&self, behavior: RefreshBehavior) {
        *self.behavior.lock() = behavior;
    }

    /// Number of calls so far.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// The credential passed to the most recent call.
    pub fn last_seen(&self) -> Option<Credential> {
        self.last_seen.lock().clone()
    }
}

#[async_trait]
impl SessionRefresher for MockRefresher {
    async fn refresh(&self, credential: &Credential) -> Result<Credential, RefreshError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_seen.lock() = Some(credential.clone());

        let behavior = self.behavior.lock().clone();
        match behavior {
            RefreshBehavior::Renew(renewed) => Ok(renewed),
            RefreshBehavior::Echo => Ok(credential.clone()),
            RefreshBehavior::Reject(message) => Err(RefreshError::rejected(message)),
            RefreshBehavior::Unavailable(message) => Err(RefreshError::unavailable(message)),
            RefreshBehavior::Hang(delay) => {
                tokio::time::sleep(delay).await;
                Ok(credential.clone())
            }
        }
    }
}

// =============================================================================
// Failing Token Store
// =============================================================================

/// A store whose every operation fails as corrupt storage.
#[derive(Debug, Default)]
pub struct FailingTokenStore {
    attempts: AtomicU64,
}

impl FailingTokenStore {
    /// Creates a failing store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations attempted.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::corrupt("simulated storage failure"))
    }
}

impl TokenStore for FailingTokenStore {
    fn get(&self) -> Result<Option<Credential>, StoreError> {
        self.fail()
    }

    fn set(&self, _credential: Credential) -> Result<(), StoreError> {
        self.fail()
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.fail()
    }
}

// =============================================================================
// Recording Token Store
// =============================================================================

/// Store operation recorded by [`RecordingTokenStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// `get`
    Get,
    /// `set` with the stored access token.
    Set(String),
    /// `clear`
    Clear,
}

/// An in-memory store that logs every operation.
#[derive(Debug, Default)]
pub struct RecordingTokenStore {
    slot: Mutex<Option<Credential>>,
    ops: Mutex<Vec<StoreOp>>,
}

impl RecordingTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `credential`.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Mutex::new(Some(credential)),
            ops: Mutex::new(Vec::new()),
        }
    }

    /// Operations so far, in order.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.lock().clone()
    }

    /// Number of writes (`set` and `clear`).
    pub fn write_count(&self) -> usize {
        self.ops
            .lock()
            .iter()
            .filter(|op| !matches!(op, StoreOp::Get))
            .count()
    }
}

impl TokenStore for RecordingTokenStore {
    fn get(&self) -> Result<Option<Credential>, StoreError> {
        self.ops.lock().push(StoreOp::Get);
        Ok(self.slot.lock().clone())
    }

    fn set(&self, credential: Credential) -> Result<(), StoreError> {
        self.ops
            .lock()
            .push(StoreOp::Set(credential.access_token.clone()));
        *self.slot.lock() = Some(credential);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.ops.lock().push(StoreOp::Clear);
        *self.slot.lock() = None;
        Ok(())
    }
}
