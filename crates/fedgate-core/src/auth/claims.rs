// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Bearer token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Role;

/// Claims read from the payload of a bearer token.
///
/// Every field is optional at the decode boundary: the issuing backend owns
/// the token format, and a missing or mistyped claim must degrade to
/// "no value" rather than fail the decode. A numeric `sub` is read as its
/// decimal string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the user ID.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub sub: Option<String>,

    /// Role wire name (see [`Role`]).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_text"
    )]
    pub role: Option<String>,

    /// User's email.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_text"
    )]
    pub email: Option<String>,

    /// User's display name.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_text"
    )]
    pub name: Option<String>,

    /// Expiration time (Unix timestamp).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub exp: Option<i64>,

    /// Issued at time (Unix timestamp).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_timestamp"
    )]
    pub iat: Option<i64>,
}

impl Claims {
    /// Creates a builder for constructing claims.
    pub fn builder(subject: impl Into<String>) -> ClaimsBuilder {
        ClaimsBuilder::new(subject)
    }

    /// Returns the parsed role, or `None` when absent or unrecognized.
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::parse)
    }

    /// Returns `true` if the token is expired at `now`.
    ///
    /// A token without `exp` counts as expired.
    pub fn is_expired_at(&self, now: i64) -> bool {
        match self.exp {
            Some(exp) => exp <= now,
            None => true,
        }
    }

    /// Returns `true` if the token is expired now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Returns the expiration time as a DateTime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

// =============================================================================
// Claims Builder
// =============================================================================

/// Builder for constructing claims.
#[derive(Debug, Clone)]
pub struct ClaimsBuilder {
    subject: String,
    role: Option<String>,
    email: Option<String>,
    name: Option<String>,
    exp: Option<i64>,
}

impl ClaimsBuilder {
    /// Creates a new builder that expires one hour from now.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            role: None,
            email: None,
            name: None,
            exp: Some(Utc::now().timestamp() + 3600),
        }
    }

    /// Sets the role.
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role.as_str().to_string());
        self
    }

    /// Sets a raw role string, which need not be a known role.
    pub fn raw_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Sets the user's email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the user's display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Expires `seconds` from now. Negative values yield an expired token.
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = Some(Utc::now().timestamp() + seconds);
        self
    }

    /// Sets an absolute expiration timestamp.
    pub fn expires_at(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Omits the `exp` claim.
    pub fn without_expiry(mut self) -> Self {
        self.exp = None;
        self
    }

    /// Builds the claims.
    pub fn build(self) -> Claims {
        Claims {
            sub: Some(self.subject),
            role: self.role,
            email: self.email,
            name: self.name,
            exp: self.exp,
            iat: Some(Utc::now().timestamp()),
        }
    }
}

// =============================================================================
// Lenient claim readers
// =============================================================================

// A claim of an unexpected type reads as absent instead of failing the
// whole payload.

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_builder() {
        let claims = Claims::builder("42")
            .role(Role::Entrenador)
            .email("coach@fed.example")
            .name("Ana Coach")
            .build();

        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.role(), Some(Role::Entrenador));
        assert_eq!(claims.email.as_deref(), Some("coach@fed.example"));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_expiry_boundary() {
        let claims = Claims::builder("1").expires_at(1_000).build();

        assert!(!claims.is_expired_at(999));
        assert!(claims.is_expired_at(1_000));
        assert!(claims.is_expired_at(1_001));
    }

    #[test]
    fn test_claims_without_exp_are_expired() {
        let claims = Claims::builder("1").without_expiry().build();
        assert!(claims.is_expired_at(0));
        assert!(claims.expires_at().is_none());
    }

    #[test]
    fn test_unknown_role_parses_to_none() {
        let claims = Claims::builder("1").raw_role("JUEZ").build();
        assert_eq!(claims.role.as_deref(), Some("JUEZ"));
        assert_eq!(claims.role(), None);
    }

    #[test]
    fn test_claims_deserialize_sparse_payload() {
        let claims: Claims = serde_json::from_str(r#"{"role":"ATLETA"}"#).unwrap();
        assert_eq!(claims.role(), Some(Role::Atleta));
        assert!(claims.sub.is_none());
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_claims_deserialize_numeric_subject() {
        let claims: Claims =
            serde_json::from_str(r#"{"sub":42,"role":"ATLETA","exp":1700000000}"#).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.role(), Some(Role::Atleta));
        assert_eq!(claims.exp, Some(1_700_000_000));
    }

    #[test]
    fn test_claims_deserialize_wrong_types_as_absent() {
        let claims: Claims = serde_json::from_str(
            r#"{"sub":{"id":1},"role":["ATLETA"],"email":false,"name":null,"exp":"1700000000","iat":"soon"}"#,
        )
        .unwrap();
        assert!(claims.sub.is_none());
        assert!(claims.role.is_none());
        assert!(claims.email.is_none());
        assert!(claims.name.is_none());
        assert_eq!(claims.exp, Some(1_700_000_000));
        assert!(claims.iat.is_none());
    }
}
