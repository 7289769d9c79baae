// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Credential storage.
//!
//! The credential is a single slot: at most one access/refresh pair is live
//! at a time. It is written at login, replaced at refresh, and cleared at
//! logout or when the startup probe fails.
//!
//! Two backends are provided:
//!
//! - [`MemoryTokenStore`] keeps the slot in memory (tests, short-lived tools)
//! - [`FileTokenStore`] persists both values in one JSON file under fixed keys
//!
//! Processes sharing one [`FileTokenStore`] file race; the last writer wins.

use std::ffi::OsString;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Default storage key for the access token.
pub const DEFAULT_ACCESS_TOKEN_KEY: &str = "access_token";

/// Default storage key for the refresh token.
pub const DEFAULT_REFRESH_TOKEN_KEY: &str = "refresh_token";

// =============================================================================
// Credential
// =============================================================================

/// A bearer token pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Signed access token.
    pub access_token: String,
    /// Signed refresh token.
    pub refresh_token: String,
}

impl Credential {
    /// Creates a credential from a token pair.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// TokenStore
// =============================================================================

/// Single-slot credential storage.
pub trait TokenStore: Send + Sync + Debug {
    /// Returns the stored credential, if any.
    fn get(&self) -> StoreResult<Option<Credential>>;

    /// Stores a credential, replacing any previous one.
    fn set(&self, credential: Credential) -> StoreResult<()>;

    /// Removes both tokens.
    fn clear(&self) -> StoreResult<()>;

    /// Returns the stored access token, if any.
    fn access_token(&self) -> StoreResult<Option<String>> {
        Ok(self.get()?.map(|c| c.access_token))
    }
}

// =============================================================================
// MemoryTokenStore
// =============================================================================

/// In-memory credential slot.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<Credential>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `credential`.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: RwLock::new(Some(credential)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> StoreResult<Option<Credential>> {
        Ok(self.slot.read().clone())
    }

    fn set(&self, credential: Credential) -> StoreResult<()> {
        *self.slot.write() = Some(credential);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.slot.write().take();
        Ok(())
    }
}

// =============================================================================
// StorageKeys
// =============================================================================

/// Keys under which the two tokens are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    /// Key for the access token.
    pub access_token: String,
    /// Key for the refresh token.
    pub refresh_token: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            access_token: DEFAULT_ACCESS_TOKEN_KEY.to_string(),
            refresh_token: DEFAULT_REFRESH_TOKEN_KEY.to_string(),
        }
    }
}

// =============================================================================
// FileTokenStore
// =============================================================================

/// Credential slot persisted as a JSON object in one file.
///
/// Unrelated keys already in the file are preserved on write. `clear()`
/// removes both token keys together and deletes the file once nothing else
/// is left in it.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    keys: StorageKeys,
    lock: RwLock<()>,
}

impl FileTokenStore {
    /// Creates a store backed by `path` using the default keys.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_keys(path, StorageKeys::default())
    }

    /// Creates a store backed by `path` using custom keys.
    pub fn with_keys(path: impl Into<PathBuf>, keys: StorageKeys) -> Self {
        Self {
            path: path.into(),
            keys,
            lock: RwLock::new(()),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the storage keys.
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    fn read_object(&self) -> StoreResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::corrupt("credential file is not a JSON object")),
            Err(e) => Err(StoreError::corrupt(e.to_string())),
        }
    }

    /// Like `read_object`, but a corrupt file is treated as empty so a write
    /// can replace it. I/O failures still propagate.
    fn read_object_for_write(&self) -> StoreResult<Map<String, Value>> {
        match self.read_object() {
            Ok(map) => Ok(map),
            Err(StoreError::Corrupt { message }) => {
                warn!(path = %self.path.display(), %message, "Overwriting corrupt credential file");
                Ok(Map::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Sibling path used for atomic writes: the file name with `.tmp` appended.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_object(&self, map: &Map<String, Value>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let content = serde_json::to_string_pretty(map)
            .map_err(|e| StoreError::corrupt(e.to_string()))?;

        let tmp = self.temp_path();
        fs::write(&tmp, content).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> StoreResult<Option<Credential>> {
        let _guard = self.lock.read();
        let map = self.read_object()?;

        let access = map.get(&self.keys.access_token).and_then(Value::as_str);
        let refresh = map.get(&self.keys.refresh_token).and_then(Value::as_str);

        match (access, refresh) {
            (Some(access), Some(refresh)) => Ok(Some(Credential::new(access, refresh))),
            (None, None) => Ok(None),
            _ => {
                warn!(path = %self.path.display(), "Incomplete credential in storage, ignoring");
                Ok(None)
            }
        }
    }

    fn set(&self, credential: Credential) -> StoreResult<()> {
        let _guard = self.lock.write();
        let mut map = self.read_object_for_write()?;

        map.insert(
            self.keys.access_token.clone(),
            Value::String(credential.access_token),
        );
        map.insert(
            self.keys.refresh_token.clone(),
            Value::String(credential.refresh_token),
        );

        self.write_object(&map)?;
        debug!(path = %self.path.display(), "Credential stored");
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        let _guard = self.lock.write();
        let mut map = self.read_object_for_write()?;

        map.remove(&self.keys.access_token);
        map.remove(&self.keys.refresh_token);

        if map.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
            }
        } else {
            self.write_object(&map)?;
        }

        debug!(path = %self.path.display(), "Credential cleared");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
