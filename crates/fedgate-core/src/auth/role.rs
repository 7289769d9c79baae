// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Federation roles carried in the `role` claim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Roles recognized by the admin console.
///
/// The wire form is the upper-case Spanish name issued by the backend
/// (`ADMINISTRADOR`, `ENTRENADOR`, `ATLETA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Federation staff: manages athletes, competitions, tests and roles.
    Administrador,
    /// Coach: manages their own athletes and training plans.
    Entrenador,
    /// Athlete: sees their own profile and results.
    Atleta,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 3] = [Role::Administrador, Role::Entrenador, Role::Atleta];

    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrador => "ADMINISTRADOR",
            Role::Entrenador => "ENTRENADOR",
            Role::Atleta => "ATLETA",
        }
    }

    /// Parses a role from its wire name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ADMINISTRADOR" => Some(Role::Administrador),
            "ENTRENADOR" => Some(Role::Entrenador),
            "ATLETA" => Some(Role::Atleta),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("ADMINISTRADOR"), Some(Role::Administrador));
        assert_eq!(Role::parse("entrenador"), Some(Role::Entrenador));
        assert_eq!(Role::parse(" Atleta "), Some(Role::Atleta));
        assert_eq!(Role::parse("JUEZ"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_role_parse_rejects_abbreviations() {
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse("ADMIN"), None);
        assert_eq!(Role::parse("coach"), None);
    }

    #[test]
    fn test_role_serde_uses_wire_names() {
        let json = serde_json::to_string(&Role::Entrenador).unwrap();
        assert_eq!(json, "\"ENTRENADOR\"");

        let role: Role = serde_json::from_str("\"ATLETA\"").unwrap();
        assert_eq!(role, Role::Atleta);
    }

    #[test]
    fn test_role_display_round_trips_through_parse() {
        for role in Role::ALL {
            assert_eq!(Role::parse(&role.to_string()), Some(role));
        }
    }
}
