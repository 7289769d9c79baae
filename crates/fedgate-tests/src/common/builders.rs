// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Builders
//!
//! Builders for tokens and fully wired access-control scenarios.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fedgate_core::{
    AccessControl, AccessRequirement, Claims, ClaimsBuilder, Credential, FileTokenStore,
    MemoryTokenStore, ProtectedRoutes, Role, RoleMenuMap, RoutePaths, TokenStore,
};
use jsonwebtoken::Algorithm;

use super::fixtures::{TokenFixtures, FIXTURE_REFRESH_TOKEN};

// =============================================================================
// Token Builder
// =============================================================================

/// Builder for signed bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    claims: ClaimsBuilder,
    alg: Algorithm,
}

impl TokenBuilder {
    /// Starts a token for `subject`, valid for an hour.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            claims: Claims::builder(subject),
            alg: Algorithm::HS256,
        }
    }

    /// Sets the role.
    pub fn role(mut self, role: Role) -> Self {
        self.claims = self.claims.role(role);
        self
    }

    /// Sets a role string verbatim.
    pub fn raw_role(mut self, role: impl Into<String>) -> Self {
        self.claims = self.claims.raw_role(role);
        self
    }

    /// Sets the email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.claims = self.claims.email(email);
        self
    }

    /// Sets the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.claims = self.claims.name(name);
        self
    }

    /// Expires `seconds` from now. Negative values are already expired.
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.claims = self.claims.expires_in(seconds);
        self
    }

    /// Drops the `exp` claim.
    pub fn without_expiry(mut self) -> Self {
        self.claims = self.claims.without_expiry();
        self
    }

    /// Signs with a different HMAC algorithm.
    pub fn algorithm(mut self, alg: Algorithm) -> Self {
        self.alg = alg;
        self
    }

    /// Returns the claims without signing.
    pub fn claims(&self) -> Claims {
        self.claims.clone().build()
    }

    /// Signs the token.
    pub fn build(self) -> String {
        TokenFixtures::sign_with(self.alg, &self.claims.build())
    }

    /// Signs the token and pairs it with the fixture refresh token.
    pub fn credential(self) -> Credential {
        Credential::new(self.build(), FIXTURE_REFRESH_TOKEN)
    }
}

// =============================================================================
// Scenario Builder
// =============================================================================

/// Where a scenario keeps its credential.
#[derive(Debug, Clone)]
enum StoreKind {
    Memory,
    File(PathBuf),
}

/// Builder for an [`AccessControl`] with a seeded session.
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    store: StoreKind,
    credential: Option<Credential>,
    menu: RoleMenuMap,
    paths: RoutePaths,
    routes: ProtectedRoutes,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Signed-out, in-memory, canonical menu, nothing protected.
    pub fn new() -> Self {
        Self {
            store: StoreKind::Memory,
            credential: None,
            menu: RoleMenuMap::canonical(),
            paths: RoutePaths::default(),
            routes: ProtectedRoutes::new(),
        }
    }

    /// Persists the credential to `path` instead of memory.
    pub fn file_store(mut self, path: impl AsRef<Path>) -> Self {
        self.store = StoreKind::File(path.as_ref().to_path_buf());
        self
    }

    /// Signs in as a fixture user with `role`.
    pub fn signed_in_as(self, role: Role) -> Self {
        self.with_token(TokenFixtures::for_role(role))
    }

    /// Seeds the store with `access_token`.
    pub fn with_token(mut self, access_token: String) -> Self {
        self.credential = Some(TokenFixtures::credential(access_token));
        self
    }

    /// Sets the menu table.
    pub fn menu(mut self, menu: RoleMenuMap) -> Self {
        self.menu = menu;
        self
    }

    /// Sets the well-known routes.
    pub fn paths(mut self, paths: RoutePaths) -> Self {
        self.paths = paths;
        self
    }

    /// Protects `prefix` for any authenticated user.
    pub fn protect(mut self, prefix: &str) -> Self {
        self.routes = self.routes.protect(prefix, AccessRequirement::any_authenticated());
        self
    }

    /// Protects `prefix` for `roles` only.
    pub fn protect_for(mut self, prefix: &str, roles: impl IntoIterator<Item = Role>) -> Self {
        self.routes = self.routes.protect(prefix, AccessRequirement::roles(roles));
        self
    }

    /// The dashboard layout the console ships with.
    pub fn console_routes(self) -> Self {
        self.protect("/dashboard")
            .protect_for("/dashboard/roles", [Role::Administrador])
            .protect_for("/dashboard/pruebas", [Role::Administrador, Role::Entrenador])
    }

    /// Builds the access control.
    pub fn build(self) -> AccessControl {
        let store: Arc<dyn TokenStore> = match self.store {
            StoreKind::Memory => Arc::new(MemoryTokenStore::new()),
            StoreKind::File(path) => Arc::new(FileTokenStore::new(path)),
        };
        if let Some(credential) = self.credential {
            store.set(credential).expect("scenario store accepts credential");
        }

        AccessControl::builder(store)
            .menu(self.menu)
            .paths(self.paths)
            .protected_routes(self.routes)
            .build()
    }
}
