// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built tokens, menu tables and configuration documents.
//!
//! Tokens are signed with a throwaway secret. The decoder never verifies
//! signatures, so any key works.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use fedgate_core::{Claims, Credential, Role, RoleMenuEntry, RoleMenuMap};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

/// Secret used to sign fixture tokens.
pub const FIXTURE_SECRET: &[u8] = b"fixture-secret-not-verified";

/// Refresh token paired with fixture access tokens.
pub const FIXTURE_REFRESH_TOKEN: &str = "fixture-refresh-token";

// =============================================================================
// Token Fixtures
// =============================================================================

/// Fixture providing signed bearer tokens.
pub struct TokenFixtures;

impl TokenFixtures {
    /// Signs `claims` with HS256.
    pub fn sign(claims: &Claims) -> String {
        Self::sign_with(Algorithm::HS256, claims)
    }

    /// Signs `claims` with the given HMAC algorithm.
    pub fn sign_with(alg: Algorithm, claims: &Claims) -> String {
        encode(&Header::new(alg), claims, &EncodingKey::from_secret(FIXTURE_SECRET))
            .expect("fixture token encodes")
    }

    /// A token for `role` valid for an hour.
    pub fn for_role(role: Role) -> String {
        Self::sign(&Self::claims_for(role))
    }

    /// Claims for `role` valid for an hour.
    pub fn claims_for(role: Role) -> Claims {
        let subject = match role {
            Role::Administrador => "1",
            Role::Entrenador => "20",
            Role::Atleta => "300",
        };
        Claims::builder(subject)
            .role(role)
            .email(format!("{}@federacion.test", role.as_str().to_lowercase()))
            .name(format!("Usuario {}", role))
            .build()
    }

    /// An administrator token.
    pub fn admin() -> String {
        Self::for_role(Role::Administrador)
    }

    /// A coach token.
    pub fn coach() -> String {
        Self::for_role(Role::Entrenador)
    }

    /// An athlete token.
    pub fn athlete() -> String {
        Self::for_role(Role::Atleta)
    }

    /// A live token carrying a role the console does not know.
    pub fn unknown_role() -> String {
        Self::sign(&Claims::builder("99").raw_role("JUEZ").build())
    }

    /// A token for `role` that expired a minute ago.
    pub fn expired(role: Role) -> String {
        Self::sign(&Claims::builder("1").role(role).expires_in(-60).build())
    }

    /// A token for `role` expiring at `exp`.
    pub fn expiring_at(role: Role, exp: i64) -> String {
        Self::sign(&Claims::builder("1").role(role).expires_at(exp).build())
    }

    /// A token with no `exp` claim.
    pub fn without_expiry(role: Role) -> String {
        Self::sign(&Claims::builder("1").role(role).without_expiry().build())
    }

    /// A token whose payload is arbitrary JSON.
    pub fn raw_payload(payload: &serde_json::Value) -> String {
        Self::raw_token(&serde_json::json!({"alg": "HS256", "typ": "JWT"}), payload)
    }

    /// A token with an arbitrary JSON header and payload.
    pub fn raw_token(header: &serde_json::Value, payload: &serde_json::Value) -> String {
        format!(
            "{}.{}.c2lnbmF0dXJl",
            encode_segment(header.to_string().as_bytes()),
            encode_segment(payload.to_string().as_bytes())
        )
    }

    /// Strings that must never decode.
    pub fn malformed() -> Vec<String> {
        vec![
            String::new(),
            "   ".to_string(),
            "not-a-jwt".to_string(),
            "a.b".to_string(),
            "a.b.c.d".to_string(),
            "!!!.@@@.###".to_string(),
            format!("{}.{}.sig", encode_segment(b"{}"), encode_segment(b"not json")),
        ]
    }

    /// A credential pairing `access_token` with the fixture refresh token.
    pub fn credential(access_token: String) -> Credential {
        Credential::new(access_token, FIXTURE_REFRESH_TOKEN)
    }

    /// Current Unix time.
    pub fn now() -> i64 {
        Utc::now().timestamp()
    }
}

// =============================================================================
// Menu Fixtures
// =============================================================================

/// Fixture providing role menu tables.
pub struct MenuFixtures;

impl MenuFixtures {
    /// The nested administrator table used to check landing resolution.
    pub fn admin_with_nested_tests() -> RoleMenuMap {
        RoleMenuMap::builder()
            .role(
                Role::Administrador,
                vec![
                    RoleMenuEntry::new("/dashboard", "Inicio"),
                    RoleMenuEntry::new("/dashboard/pruebas", "Pruebas").with_children(vec![
                        RoleMenuEntry::new("/dashboard/pruebas/baremos", "Baremos"),
                        RoleMenuEntry::new("/dashboard/pruebas/disciplinas", "Disciplinas"),
                    ]),
                ],
            )
            .build()
            .expect("fixture menu is valid")
    }

    /// Every role sees only the dashboard root.
    pub fn dashboard_only() -> RoleMenuMap {
        Role::ALL
            .into_iter()
            .fold(RoleMenuMap::builder(), |builder, role| {
                builder.role(role, vec![RoleMenuEntry::new("/dashboard", "Inicio")])
            })
            .build()
            .expect("fixture menu is valid")
    }

    /// No role has any entry.
    pub fn empty() -> RoleMenuMap {
        RoleMenuMap::builder().build().expect("empty menu is valid")
    }
}

// =============================================================================
// Config Fixtures
// =============================================================================

/// Fixture providing configuration documents.
pub struct ConfigFixtures;

impl ConfigFixtures {
    /// A YAML document protecting the dashboard with an admin-only subtree.
    ///
    /// The storage path is relative, so it lands next to the config file.
    pub fn protected_dashboard_yaml() -> &'static str {
        r#"
routes:
  login: /login
  unauthorized: /unauthorized

storage:
  path: session.json

session:
  probe_timeout_ms: 500

protected_routes:
  - prefix: /dashboard
  - prefix: /dashboard/roles
    allowed_roles: [ADMINISTRADOR]
  - prefix: /dashboard/pruebas
    allowed_roles: [ADMINISTRADOR, ENTRENADOR]
"#
    }

    /// A TOML document that replaces the menu for coaches only.
    pub fn coach_menu_override_toml() -> &'static str {
        r#"
[[menu.ENTRENADOR]]
path = "/dashboard"
label = "Inicio"

[[menu.ENTRENADOR]]
path = "/dashboard/entrenamientos"
label = "Entrenamientos"
"#
    }
}

fn encode_segment(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}
