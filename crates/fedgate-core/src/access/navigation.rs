// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Menu and landing route resolution.

use tracing::debug;

use super::{RoleMenuEntry, RoleMenuMap, RoutePaths};
use crate::auth::{Role, SessionEvaluator};

/// Computes the menu and landing route for the current session.
#[derive(Debug, Clone)]
pub struct NavigationResolver {
    session: SessionEvaluator,
    menu: RoleMenuMap,
    paths: RoutePaths,
}

impl NavigationResolver {
    /// Creates a resolver.
    pub fn new(session: SessionEvaluator, menu: RoleMenuMap, paths: RoutePaths) -> Self {
        Self {
            session,
            menu,
            paths,
        }
    }

    /// Returns the role menu table.
    pub fn menu(&self) -> &RoleMenuMap {
        &self.menu
    }

    /// Returns the menu for the current session, empty when signed out or
    /// when the role has no table.
    pub fn menu_for_current_session(&self) -> Vec<RoleMenuEntry> {
        self.menu_for_role(self.session.current_role())
    }

    /// Returns the menu for `role`.
    pub fn menu_for_role(&self, role: Option<Role>) -> Vec<RoleMenuEntry> {
        self.menu.entries_for(role).to_vec()
    }

    /// Returns where the current session should land after login.
    pub fn default_landing_route(&self) -> String {
        self.landing_route_for(self.session.current_role())
    }

    /// Returns the landing route for `role`.
    ///
    /// The first entry that is not the dashboard root wins; if it has
    /// children, its first child does. Signed-out sessions go to login, and
    /// roles with nothing past the dashboard root go to their profile.
    pub fn landing_route_for(&self, role: Option<Role>) -> String {
        let Some(role) = role else {
            return self.paths.login.clone();
        };

        let landing = self
            .menu
            .entries_for(Some(role))
            .iter()
            .find(|entry| entry.path != self.paths.dashboard_root)
            .map(|entry| entry.first_child().unwrap_or(entry).path.clone())
            .unwrap_or_else(|| self.paths.profile.clone());

        debug!(%role, %landing, "Resolved landing route");
        landing
    }
}

// =============================================================================
// Tests
// =============================================================================
