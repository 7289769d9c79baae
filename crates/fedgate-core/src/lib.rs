// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # fedgate-core
//!
//! Session and access control for the federation admin console.
//!
//! This crate provides credential storage, bearer token decoding, session
//! evaluation, role menus, route guarding and landing route resolution.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fedgate_core::prelude::*;
//!
//! let access = AccessControl::builder(Arc::new(MemoryTokenStore::new()))
//!     .protected_routes(
//!         ProtectedRoutes::new()
//!             .protect("/dashboard", AccessRequirement::any_authenticated())
//!             .protect("/dashboard/roles", AccessRequirement::roles([Role::Administrador])),
//!     )
//!     .build();
//!
//! let (decision, target) = access.resolve("/dashboard/roles");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod access;
pub mod auth;
pub mod bootstrap;
pub mod error;

pub use access::{
    AccessControl, AccessControlBuilder, AccessRequirement, GuardState, NavigationResolver,
    ProtectedRoutes, RoleMenuEntry, RoleMenuMap, RouteDecision, RouteGuard, RoutePaths,
};
pub use auth::{
    Claims, ClaimsBuilder, Credential, FileTokenStore, MemoryTokenStore, Role, Session,
    SessionEvaluator, StorageKeys, TokenDecoder, TokenStore,
};
pub use bootstrap::{BootstrapHandle, BootstrapState, LocalRefresher, SessionBootstrap, SessionRefresher};
pub use error::{DecodeError, MenuError, RefreshError, StoreError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::access::{
        AccessControl, AccessRequirement, NavigationResolver, ProtectedRoutes, RoleMenuEntry,
        RoleMenuMap, RouteDecision, RouteGuard, RoutePaths,
    };
    pub use crate::auth::{
        Claims, Credential, FileTokenStore, MemoryTokenStore, Role, SessionEvaluator, TokenStore,
    };
    pub use crate::bootstrap::{BootstrapState, LocalRefresher, SessionBootstrap, SessionRefresher};
    pub use crate::error::{DecodeError, StoreError};
}
