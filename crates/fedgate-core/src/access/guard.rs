// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route guarding.
//!
//! The guard is a three-state decision, re-evaluated from scratch on every
//! navigation:
//!
//! ```text
//! is_authenticated()? ──no──▶ Unauthenticated       ─▶ RedirectToLogin
//!        │yes
//! allowed_roles empty or current_role() ∈ allowed_roles?
//!        │no ─────────────▶ AuthenticatedDenied   ─▶ RedirectToUnauthorized
//!        │yes
//!        ▼
//! AuthenticatedAllowed ────────────────────────────▶ Render
//! ```
//!
//! A denial is final for that navigation; there is nothing to retry.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ProtectedRoutes, RoutePaths};
use crate::auth::{Role, SessionEvaluator};

// =============================================================================
// AccessRequirement
// =============================================================================

/// Roles allowed into a protected route subtree.
///
/// An empty set means "any authenticated role".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequirement {
    allowed_roles: BTreeSet<Role>,
}

impl AccessRequirement {
    /// Any authenticated user may enter.
    pub fn any_authenticated() -> Self {
        Self::default()
    }

    /// Only the given roles may enter.
    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed_roles: roles.into_iter().collect(),
        }
    }

    /// Returns the allowed roles.
    pub fn allowed_roles(&self) -> &BTreeSet<Role> {
        &self.allowed_roles
    }

    /// Returns `true` if any authenticated role may enter.
    pub fn is_any_authenticated(&self) -> bool {
        self.allowed_roles.is_empty()
    }

    /// Returns `true` if `role` may enter.
    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.is_empty() || self.allowed_roles.contains(&role)
    }

    /// Returns `true` if a session with `role` (possibly unrecognized) may enter.
    pub fn admits(&self, role: Option<Role>) -> bool {
        match role {
            Some(role) => self.allows(role),
            None => self.allowed_roles.is_empty(),
        }
    }
}

// =============================================================================
// GuardState / RouteDecision
// =============================================================================

/// Guard state for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardState {
    /// No valid session.
    Unauthenticated,
    /// Valid session with an admitted role.
    AuthenticatedAllowed,
    /// Valid session whose role is not admitted.
    AuthenticatedDenied,
}

impl GuardState {
    /// Returns the navigation outcome for this state.
    pub fn decision(self) -> RouteDecision {
        match self {
            GuardState::Unauthenticated => RouteDecision::RedirectToLogin,
            GuardState::AuthenticatedAllowed => RouteDecision::Render,
            GuardState::AuthenticatedDenied => RouteDecision::RedirectToUnauthorized,
        }
    }
}

/// What the routing layer should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    /// Render the protected content.
    Render,
    /// Send the user to the login route.
    RedirectToLogin,
    /// Send the user to the unauthorized route.
    RedirectToUnauthorized,
}

impl RouteDecision {
    /// Returns the redirect target, or `None` for [`RouteDecision::Render`].
    pub fn redirect_path<'a>(&self, paths: &'a RoutePaths) -> Option<&'a str> {
        match self {
            RouteDecision::Render => None,
            RouteDecision::RedirectToLogin => Some(&paths.login),
            RouteDecision::RedirectToUnauthorized => Some(&paths.unauthorized),
        }
    }

    /// Returns `true` for [`RouteDecision::Render`].
    pub fn is_render(&self) -> bool {
        matches!(self, RouteDecision::Render)
    }
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RouteDecision::Render => "render",
            RouteDecision::RedirectToLogin => "redirect_to_login",
            RouteDecision::RedirectToUnauthorized => "redirect_to_unauthorized",
        };
        f.write_str(s)
    }
}

// =============================================================================
// RouteGuard
// =============================================================================

/// Decides whether the current session may enter a route.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: SessionEvaluator,
    routes: Arc<ProtectedRoutes>,
}

impl RouteGuard {
    /// Creates a guard with no protected subtrees.
    pub fn new(session: SessionEvaluator) -> Self {
        Self::with_routes(session, ProtectedRoutes::new())
    }

    /// Creates a guard over a protected route table.
    pub fn with_routes(session: SessionEvaluator, routes: ProtectedRoutes) -> Self {
        Self {
            session,
            routes: Arc::new(routes),
        }
    }

    /// Returns the protected route table.
    pub fn routes(&self) -> &ProtectedRoutes {
        &self.routes
    }

    /// Computes the guard state at `now`.
    pub fn state_at(&self, requirement: &AccessRequirement, now: i64) -> GuardState {
        // One snapshot of the credential per decision.
        let Some(claims) = self.session.live_claims_at(now) else {
            return GuardState::Unauthenticated;
        };

        if requirement.is_any_authenticated() {
            return GuardState::AuthenticatedAllowed;
        }

        let role = claims.role();
        if requirement.admits(role) {
            GuardState::AuthenticatedAllowed
        } else {
            warn!(
                role = ?role,
                allowed_roles = ?requirement.allowed_roles(),
                "Route access denied"
            );
            GuardState::AuthenticatedDenied
        }
    }

    /// Evaluates a requirement at `now`.
    pub fn evaluate_at(&self, requirement: &AccessRequirement, now: i64) -> RouteDecision {
        let decision = self.state_at(requirement, now).decision();
        debug!(%decision, "Route guard evaluated");
        decision
    }

    /// Evaluates a requirement against the current session.
    pub fn evaluate(&self, requirement: &AccessRequirement) -> RouteDecision {
        self.evaluate_at(requirement, Utc::now().timestamp())
    }

    /// Evaluates navigation to `path` against the protected route table.
    ///
    /// Paths outside every protected subtree render unconditionally.
    pub fn evaluate_path(&self, path: &str) -> RouteDecision {
        match self.routes.requirement_for(path) {
            Some(requirement) => self.evaluate(requirement),
            None => {
                debug!(path, "Public route");
                RouteDecision::Render
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
