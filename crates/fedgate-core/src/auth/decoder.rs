// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Bearer token decoding.
//!
//! The decoder reads claims out of a JWT without checking its signature,
//! issuer or expiry. Verification belongs to the backend that issued the
//! token and re-checks it on every request; the console only needs the
//! claims to decide what to show.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

use super::Claims;
use crate::error::DecodeError;

// =============================================================================
// TokenDecoder
// =============================================================================

/// Decodes bearer tokens into [`Claims`].
///
/// The header must be a base64url JSON object, but its `alg` is never
/// interpreted; `none` and unregistered algorithms decode like any other.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenDecoder;

impl TokenDecoder {
    /// Creates a decoder. It never checks signatures.
    pub fn new() -> Self {
        Self
    }

    /// Decodes a token into claims.
    ///
    /// `None`, an empty string, or whitespace is [`DecodeError::Missing`].
    pub fn decode(&self, raw_token: Option<&str>) -> Result<Claims, DecodeError> {
        let token = raw_token.map(str::trim).unwrap_or_default();
        if token.is_empty() {
            return Err(DecodeError::Missing);
        }

        let segments: Vec<&str> = token.split('.').collect();
        let [header, payload, _signature] = segments.as_slice() else {
            return Err(DecodeError::SegmentCount {
                found: segments.len(),
            });
        };

        match decode_segment(header, "header")? {
            Value::Object(_) => {}
            _ => return Err(DecodeError::malformed("header is not a JSON object")),
        }

        match decode_segment(payload, "payload")? {
            value @ Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| DecodeError::malformed(format!("payload: {}", e))),
            _ => Err(DecodeError::malformed("payload is not a JSON object")),
        }
    }
}

/// Base64url-decodes one segment and parses it as JSON. Trailing `=`
/// padding is tolerated.
fn decode_segment(segment: &str, name: &str) -> Result<Value, DecodeError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| DecodeError::malformed(format!("{}: {}", name, e)))?;

    serde_json::from_slice(&bytes).map_err(|e| DecodeError::malformed(format!("{}: {}", name, e)))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    fn raw_token(header: &str, payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    fn sign(claims: &Claims, algorithm: Algorithm) -> String {
        encode(
            &Header::new(algorithm),
            claims,
            &EncodingKey::from_secret(b"issuer-secret-unknown-to-the-console"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_valid_token() {
        let claims = Claims::builder("7")
            .role(Role::Administrador)
            .email("admin@fed.example")
            .name("Admin")
            .build();
        let token = sign(&claims, Algorithm::HS256);

        let decoded = TokenDecoder::new().decode(Some(&token)).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_ignores_signature_and_algorithm() {
        let claims = Claims::builder("7").role(Role::Atleta).build();
        let token = sign(&claims, Algorithm::HS512);

        let (head, _) = token.rsplit_once('.').unwrap();
        let forged = format!("{}.not-the-signature", head);

        let decoded = TokenDecoder::new().decode(Some(&forged)).unwrap();
        assert_eq!(decoded.role(), Some(Role::Atleta));
    }

    #[test]
    fn test_decode_expired_token_still_yields_claims() {
        let claims = Claims::builder("7").expires_in(-3600).build();
        let token = sign(&claims, Algorithm::HS256);

        let decoded = TokenDecoder::new().decode(Some(&token)).unwrap();
        assert!(decoded.is_expired());
    }

    #[test]
    fn test_decode_missing() {
        let decoder = TokenDecoder::new();
        assert_eq!(decoder.decode(None), Err(DecodeError::Missing));
        assert_eq!(decoder.decode(Some("")), Err(DecodeError::Missing));
        assert_eq!(decoder.decode(Some("   ")), Err(DecodeError::Missing));
    }

    #[test]
    fn test_decode_wrong_segment_count() {
        let decoder = TokenDecoder::new();
        assert_eq!(
            decoder.decode(Some("not-a-jwt")),
            Err(DecodeError::SegmentCount { found: 1 })
        );
        assert_eq!(
            decoder.decode(Some("a.b.c.d")),
            Err(DecodeError::SegmentCount { found: 4 })
        );
    }

    #[test]
    fn test_decode_undecodable_payload() {
        let decoder = TokenDecoder::new();
        let result = decoder.decode(Some("invalid.token.here"));
        assert!(matches!(result, Err(DecodeError::Malformed { .. })));
    }

    #[test]
    fn test_decode_ignores_header_algorithm() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        for alg in ["none", "EdDSA", "XYZ999"] {
            let token = raw_token(
                &format!(r#"{{"alg":"{}","typ":"JWT"}}"#, alg),
                &format!(r#"{{"role":"ENTRENADOR","exp":{}}}"#, exp),
            );
            let decoded = TokenDecoder::new().decode(Some(&token)).unwrap();
            assert_eq!(decoded.role(), Some(Role::Entrenador), "alg {}", alg);
        }
    }

    #[test]
    fn test_decode_unsigned_token_with_empty_signature() {
        let token = format!(
            "{}.{}.",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#),
            URL_SAFE_NO_PAD.encode(r#"{"sub":"9","role":"ATLETA"}"#)
        );
        let decoded = TokenDecoder::new().decode(Some(&token)).unwrap();
        assert_eq!(decoded.sub.as_deref(), Some("9"));
    }

    #[test]
    fn test_decode_numeric_subject_keeps_other_claims() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = raw_token(
            r#"{"alg":"HS256"}"#,
            &format!(r#"{{"sub":42,"role":"ATLETA","exp":{}}}"#, exp),
        );

        let decoded = TokenDecoder::new().decode(Some(&token)).unwrap();
        assert_eq!(decoded.sub.as_deref(), Some("42"));
        assert_eq!(decoded.role(), Some(Role::Atleta));
        assert_eq!(decoded.exp, Some(exp));
    }

    #[test]
    fn test_decode_non_object_segments() {
        let decoder = TokenDecoder::new();
        assert!(matches!(
            decoder.decode(Some(&raw_token("[1,2]", "{}"))),
            Err(DecodeError::Malformed { .. })
        ));
        assert!(matches!(
            decoder.decode(Some(&raw_token(r#"{"alg":"HS256"}"#, r#""just a string""#))),
            Err(DecodeError::Malformed { .. })
        ));
    }
}
