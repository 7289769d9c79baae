// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Well-known routes and protected route subtrees.

use serde::{Deserialize, Serialize};

use super::AccessRequirement;

/// Default login route.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Default unauthorized route.
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Default profile route.
pub const DEFAULT_PROFILE_PATH: &str = "/dashboard/perfil";

/// Default dashboard root.
pub const DEFAULT_DASHBOARD_ROOT: &str = "/dashboard";

// =============================================================================
// RoutePaths
// =============================================================================

/// Routes the guard and resolver redirect to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePaths {
    /// Where unauthenticated users are sent.
    pub login: String,
    /// Where authenticated but unauthorized users are sent.
    pub unauthorized: String,
    /// Landing fallback when a role has nothing beyond the dashboard root.
    pub profile: String,
    /// The generic dashboard root, skipped when picking a landing route.
    pub dashboard_root: String,
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            login: DEFAULT_LOGIN_PATH.to_string(),
            unauthorized: DEFAULT_UNAUTHORIZED_PATH.to_string(),
            profile: DEFAULT_PROFILE_PATH.to_string(),
            dashboard_root: DEFAULT_DASHBOARD_ROOT.to_string(),
        }
    }
}

// =============================================================================
// ProtectedRoutes
// =============================================================================

/// Access requirements attached to route subtrees.
///
/// A requirement attached to `/dashboard/pruebas` covers every route below
/// it. When subtrees nest, the deepest one wins.
#[derive(Debug, Clone, Default)]
pub struct ProtectedRoutes {
    routes: Vec<(String, AccessRequirement)>,
}

impl ProtectedRoutes {
    /// Creates an empty table; every path is public.
    pub fn new() -> Self {
        Self::default()
    }

    /// Protects the subtree rooted at `prefix`.
    ///
    /// Protecting the same prefix twice replaces the earlier requirement.
    pub fn protect(mut self, prefix: impl AsRef<str>, requirement: AccessRequirement) -> Self {
        let prefix = normalize(prefix.as_ref());
        self.routes.retain(|(existing, _)| *existing != prefix);
        self.routes.push((prefix, requirement));
        self
    }

    /// Returns the requirement for `path`, or `None` if the path is public.
    pub fn requirement_for(&self, path: &str) -> Option<&AccessRequirement> {
        let path = normalize(path);

        self.routes
            .iter()
            .filter(|(prefix, _)| covers(prefix, &path))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, requirement)| requirement)
    }

    /// Returns the number of protected subtrees.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if nothing is protected.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterates over `(prefix, requirement)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AccessRequirement)> {
        self.routes.iter().map(|(p, r)| (p.as_str(), r))
    }
}

/// Strips the query/fragment and any trailing slash (except for `/`).
fn normalize(path: &str) -> String {
    let path = path
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default()
        .trim();

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// `prefix` covers `path` on a segment boundary.
fn covers(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

// =============================================================================
// Tests
// =============================================================================
