// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Custom Test Assertions
//!
//! Assertion helpers with failure messages that name the session and route.

use fedgate_core::{AccessControl, RoleMenuEntry, RouteDecision};

// =============================================================================
// Access Assertions
// =============================================================================

/// Assertion extensions for [`AccessControl`].
pub trait AccessAssertions {
    /// Assert that navigating to `path` renders it.
    fn assert_renders(&self, path: &str);

    /// Assert that navigating to `path` lands on the login route.
    fn assert_redirects_to_login(&self, path: &str);

    /// Assert that navigating to `path` lands on the unauthorized route.
    fn assert_redirects_to_unauthorized(&self, path: &str);

    /// Assert that the session is signed out.
    fn assert_signed_out(&self);

    /// Assert the landing route of the current session.
    fn assert_lands_on(&self, expected: &str);
}

impl AccessAssertions for AccessControl {
    fn assert_renders(&self, path: &str) {
        let (decision, target) = self.resolve(path);
        assert_eq!(
            decision,
            RouteDecision::Render,
            "Expected {} to render for role {:?}, but got {} -> {}",
            path,
            self.session().current_role(),
            decision,
            target
        );
        assert_eq!(target, path);
    }

    fn assert_redirects_to_login(&self, path: &str) {
        let (decision, target) = self.resolve(path);
        assert_eq!(
            decision,
            RouteDecision::RedirectToLogin,
            "Expected {} to redirect to login, but got {}",
            path,
            decision
        );
        assert_eq!(target, self.paths().login);
    }

    fn assert_redirects_to_unauthorized(&self, path: &str) {
        let (decision, target) = self.resolve(path);
        assert_eq!(
            decision,
            RouteDecision::RedirectToUnauthorized,
            "Expected {} to redirect to unauthorized for role {:?}, but got {}",
            path,
            self.session().current_role(),
            decision
        );
        assert_eq!(target, self.paths().unauthorized);
    }

    fn assert_signed_out(&self) {
        assert!(
            !self.session().is_authenticated(),
            "Expected no session, but found {:?}",
            self.session().current_session()
        );
        assert!(self.session().current_role().is_none());
        assert!(self.navigation().menu_for_current_session().is_empty());
    }

    fn assert_lands_on(&self, expected: &str) {
        let landing = self.navigation().default_landing_route();
        assert_eq!(
            landing,
            expected,
            "Unexpected landing route for role {:?}",
            self.session().current_role()
        );
    }
}

// =============================================================================
// Menu Assertions
// =============================================================================

/// Assert that `entries` list exactly `expected` top-level paths, in order.
pub fn assert_menu_paths(entries: &[RoleMenuEntry], expected: &[&str]) {
    let actual: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(actual, expected, "Menu paths differ");
}

/// Assert that no path appears twice anywhere in `entries`.
pub fn assert_unique_paths(entries: &[RoleMenuEntry]) {
    fn collect<'a>(entries: &'a [RoleMenuEntry], out: &mut Vec<&'a str>) {
        for entry in entries {
            out.push(entry.path.as_str());
            collect(&entry.children, out);
        }
    }

    let mut paths = Vec::new();
    collect(entries, &mut paths);
    let mut sorted = paths.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), paths.len(), "Duplicate menu paths in {:?}", paths);
}
