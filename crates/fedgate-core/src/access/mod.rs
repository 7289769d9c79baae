// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Access control: role menus, route guarding and navigation.
//!
//! [`AccessControl`] wires the pieces to one credential store so that every
//! component sees the same session.

mod guard;
mod menu;
mod navigation;
mod routes;

use std::sync::Arc;

pub use guard::{AccessRequirement, GuardState, RouteDecision, RouteGuard};
pub use menu::{RoleMenuEntry, RoleMenuMap, RoleMenuMapBuilder};
pub use navigation::NavigationResolver;
pub use routes::{
    ProtectedRoutes, RoutePaths, DEFAULT_DASHBOARD_ROOT, DEFAULT_LOGIN_PATH,
    DEFAULT_PROFILE_PATH, DEFAULT_UNAUTHORIZED_PATH,
};

use crate::auth::{SessionEvaluator, TokenStore};

// =============================================================================
// AccessControl
// =============================================================================

/// Session evaluator, route guard and navigation resolver over one store.
#[derive(Debug, Clone)]
pub struct AccessControl {
    session: SessionEvaluator,
    guard: RouteGuard,
    navigation: NavigationResolver,
    paths: RoutePaths,
}

impl AccessControl {
    /// Creates access control with the canonical menu and default routes.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self::builder(store).build()
    }

    /// Creates a builder.
    pub fn builder(store: Arc<dyn TokenStore>) -> AccessControlBuilder {
        AccessControlBuilder::new(store)
    }

    /// Returns the session evaluator.
    pub fn session(&self) -> &SessionEvaluator {
        &self.session
    }

    /// Returns the route guard.
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// Returns the navigation resolver.
    pub fn navigation(&self) -> &NavigationResolver {
        &self.navigation
    }

    /// Returns the well-known routes.
    pub fn paths(&self) -> &RoutePaths {
        &self.paths
    }

    /// Evaluates navigation to `path` and returns where the user ends up.
    pub fn resolve(&self, path: &str) -> (RouteDecision, String) {
        let decision = self.guard.evaluate_path(path);
        let target = decision
            .redirect_path(&self.paths)
            .unwrap_or(path)
            .to_string();
        (decision, target)
    }
}

/// Builder for [`AccessControl`].
#[derive(Debug)]
pub struct AccessControlBuilder {
    store: Arc<dyn TokenStore>,
    menu: RoleMenuMap,
    paths: RoutePaths,
    routes: ProtectedRoutes,
}

impl AccessControlBuilder {
    /// Creates a builder with the canonical menu, default routes and no
    /// protected subtrees.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            menu: RoleMenuMap::canonical(),
            paths: RoutePaths::default(),
            routes: ProtectedRoutes::new(),
        }
    }

    /// Sets the role menu table.
    pub fn menu(mut self, menu: RoleMenuMap) -> Self {
        self.menu = menu;
        self
    }

    /// Sets the well-known routes.
    pub fn paths(mut self, paths: RoutePaths) -> Self {
        self.paths = paths;
        self
    }

    /// Sets the protected route table.
    pub fn protected_routes(mut self, routes: ProtectedRoutes) -> Self {
        self.routes = routes;
        self
    }

    /// Builds the access control.
    pub fn build(self) -> AccessControl {
        let session = SessionEvaluator::new(self.store);
        let guard = RouteGuard::with_routes(session.clone(), self.routes);
        let navigation = NavigationResolver::new(session.clone(), self.menu, self.paths.clone());

        AccessControl {
            session,
            guard,
            navigation,
            paths: self.paths,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
