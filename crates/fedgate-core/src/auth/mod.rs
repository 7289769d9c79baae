// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication state.
//!
//! This module provides:
//! - Credential storage (single access/refresh slot)
//! - Token decoding into typed claims
//! - Session evaluation over the stored credential
//! - Role definitions

mod claims;
mod decoder;
mod role;
mod session;
pub mod store;

pub use claims::{Claims, ClaimsBuilder};
pub use decoder::TokenDecoder;
pub use role::Role;
pub use session::{Session, SessionEvaluator};
pub use store::{Credential, FileTokenStore, MemoryTokenStore, StorageKeys, TokenStore};
