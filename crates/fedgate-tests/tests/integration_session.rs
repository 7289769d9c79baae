// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Session Integration Tests
//!
//! Token decoding, credential storage and session evaluation working
//! together.
//!
//! ## Test Categories
//!
//! - `test_decoder_*`: Token decoding
//! - `test_store_*`: Credential storage backends
//! - `test_session_*`: Session evaluation

use std::sync::Arc;

use fedgate_core::{
    Credential, DecodeError, FileTokenStore, MemoryTokenStore, Role, SessionEvaluator,
    StorageKeys, TokenDecoder, TokenStore,
};
use fedgate_tests::prelude::*;
use jsonwebtoken::Algorithm;
use serde_json::json;

fn session_over(store: Arc<dyn TokenStore>) -> SessionEvaluator {
    init_test_logging();
    SessionEvaluator::new(store)
}

// =============================================================================
// Decoder Tests
// =============================================================================

#[test]
fn test_decoder_reads_every_role() {
    let decoder = TokenDecoder::new();

    for role in Role::ALL {
        let claims = decoder.decode(Some(&TokenFixtures::for_role(role))).unwrap();
        assert_eq!(claims.role(), Some(role));
        let expected = TokenFixtures::claims_for(role);
        assert_eq!(claims.sub, expected.sub);
        assert_eq!(claims.email, expected.email);
        assert_eq!(claims.name, expected.name);
    }
}

#[test]
fn test_decoder_ignores_algorithm_and_signature() {
    let decoder = TokenDecoder::new();

    for alg in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
        let token = TokenBuilder::new("7").role(Role::Atleta).algorithm(alg).build();
        let claims = decoder.decode(Some(&token)).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("7"));
    }
}

#[test]
fn test_decoder_rejects_malformed_tokens() {
    let decoder = TokenDecoder::new();

    for token in TokenFixtures::malformed() {
        assert!(
            decoder.decode(Some(&token)).is_err(),
            "token {:?} should not decode",
            token
        );
    }
    assert_eq!(decoder.decode(None), Err(DecodeError::Missing));
    assert_eq!(
        decoder.decode(Some("a.b")),
        Err(DecodeError::SegmentCount { found: 2 })
    );
}

#[test]
fn test_decoder_tolerates_missing_and_extra_claims() {
    let decoder = TokenDecoder::new();

    let token = TokenFixtures::raw_payload(&json!({
        "role": "ENTRENADOR",
        "tenant": "federacion",
        "exp": TokenFixtures::now() + 60,
    }));
    let claims = decoder.decode(Some(&token)).unwrap();
    assert_eq!(claims.role(), Some(Role::Entrenador));
    assert!(claims.sub.is_none());
    assert!(claims.email.is_none());
}

#[test]
fn test_decoder_accepts_unsigned_tokens() {
    let token = TokenFixtures::raw_token(
        &json!({"alg": "none", "typ": "JWT"}),
        &json!({"sub": "5", "role": "ATLETA", "exp": TokenFixtures::now() + 60}),
    );

    let claims = TokenDecoder::new().decode(Some(&token)).unwrap();
    assert_eq!(claims.role(), Some(Role::Atleta));

    let session = session_over(Arc::new(MemoryTokenStore::with_credential(
        TokenFixtures::credential(token),
    )));
    assert!(session.is_authenticated());
}

#[test]
fn test_decoder_numeric_subject_stays_signed_in() {
    let token = TokenFixtures::raw_payload(&json!({
        "sub": 42,
        "role": "ENTRENADOR",
        "email": null,
        "exp": TokenFixtures::now() + 60,
    }));

    let session = session_over(Arc::new(MemoryTokenStore::with_credential(
        TokenFixtures::credential(token),
    )));
    assert!(session.is_authenticated());
    assert_eq!(session.current_role(), Some(Role::Entrenador));
    assert_eq!(session.current_subject().as_deref(), Some("42"));
    assert!(session.current_email().is_none());
}

// =============================================================================
// Store Tests
// =============================================================================

#[test]
fn test_store_file_survives_reopen() {
    let dir = temp_test_dir("fedgate-store");
    let path = dir.path().join(format!("{}.json", unique_test_id()));

    FileTokenStore::new(&path)
        .set(TokenFixtures::credential(TokenFixtures::admin()))
        .unwrap();

    let reopened = FileTokenStore::new(&path);
    let stored = reopened.get().unwrap().unwrap();
    assert_eq!(stored.refresh_token, FIXTURE_REFRESH_TOKEN);

    let session = session_over(Arc::new(reopened));
    assert_eq!(session.current_role(), Some(Role::Administrador));
}

#[test]
fn test_store_file_custom_keys_preserve_other_entries() {
    let dir = temp_test_dir("fedgate-store");
    let path = dir.path().join("shared.json");
    std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

    let store = FileTokenStore::with_keys(
        &path,
        StorageKeys {
            access_token: "fed_access".to_string(),
            refresh_token: "fed_refresh".to_string(),
        },
    );
    store.set(Credential::new("a.b.c", "r")).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["theme"], "dark");
    assert_eq!(raw["fed_access"], "a.b.c");
    assert_eq!(raw["fed_refresh"], "r");

    store.clear().unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw, json!({"theme": "dark"}));
}

#[test]
fn test_store_corrupt_file_reads_as_signed_out() {
    let dir = temp_test_dir("fedgate-store");
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileTokenStore::new(&path);
    assert!(store.get().is_err());

    let session = session_over(Arc::new(FileTokenStore::new(&path)));
    assert!(!session.is_authenticated());

    // Writing over a corrupt file starts fresh.
    session
        .sign_in(TokenFixtures::credential(TokenFixtures::coach()))
        .unwrap();
    assert_eq!(session.current_role(), Some(Role::Entrenador));
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
fn test_session_sign_in_and_out() {
    let store = Arc::new(RecordingTokenStore::new());
    let session = session_over(store.clone());

    assert!(!session.is_authenticated());

    session
        .sign_in(TokenFixtures::credential(TokenFixtures::athlete()))
        .unwrap();
    assert!(session.is_authenticated());
    assert_eq!(session.current_role(), Some(Role::Atleta));
    assert_eq!(session.current_email().as_deref(), Some("atleta@federacion.test"));
    assert_eq!(session.current_subject().as_deref(), Some("300"));

    session.sign_out().unwrap();
    assert!(!session.is_authenticated());
    assert!(session.current_role().is_none());
    assert_eq!(store.write_count(), 2);
    assert_eq!(store.ops().last(), Some(&StoreOp::Get));
}

#[test]
fn test_session_expired_token_is_signed_out_but_stays_stored() {
    let store = Arc::new(MemoryTokenStore::with_credential(TokenFixtures::credential(
        TokenFixtures::expired(Role::Administrador),
    )));
    let session = session_over(store.clone());

    assert!(!session.is_authenticated());
    assert!(session.current_role().is_none());
    assert!(session.current_session().is_none());

    // The raw claims are still readable.
    assert_eq!(session.claims().unwrap().role(), Some(Role::Administrador));
    assert!(store.get().unwrap().is_some());
}

#[test]
fn test_session_expiry_boundary() {
    let exp = TokenFixtures::now() + 600;
    let session = session_over(Arc::new(MemoryTokenStore::with_credential(
        TokenFixtures::credential(TokenFixtures::expiring_at(Role::Entrenador, exp)),
    )));

    assert!(session.is_authenticated_at(exp - 1));
    assert!(!session.is_authenticated_at(exp));
    assert!(!session.is_authenticated_at(exp + 1));
}

#[test]
fn test_session_token_without_expiry_is_signed_out() {
    let session = session_over(Arc::new(MemoryTokenStore::with_credential(
        TokenFixtures::credential(TokenFixtures::without_expiry(Role::Administrador)),
    )));

    assert!(!session.is_authenticated());
}

#[test]
fn test_session_unknown_role_is_authenticated_without_role() {
    let session = session_over(Arc::new(MemoryTokenStore::with_credential(
        TokenFixtures::credential(TokenFixtures::unknown_role()),
    )));

    assert!(session.is_authenticated());
    assert!(session.current_role().is_none());
    assert!(session.current_session().is_none());
    assert_eq!(session.current_subject().as_deref(), Some("99"));
}

#[test]
fn test_session_projection() {
    let credential = TokenBuilder::new("42")
        .role(Role::Entrenador)
        .email("coach@federacion.test")
        .name("Ana")
        .expires_in(120)
        .credential();
    let session = session_over(Arc::new(MemoryTokenStore::with_credential(credential)));

    let current = session.current_session().unwrap();
    assert_eq!(current.subject_id, "42");
    assert_eq!(current.role, Role::Entrenador);
    assert_eq!(current.email.as_deref(), Some("coach@federacion.test"));
    assert_eq!(current.display_name.as_deref(), Some("Ana"));
    assert!(current.expires_at > TokenFixtures::now());
}

#[test]
fn test_session_failing_store_reads_as_signed_out() {
    let store = Arc::new(FailingTokenStore::new());
    let session = session_over(store.clone());

    assert!(!session.is_authenticated());
    assert!(session.current_role().is_none());
    assert!(session
        .sign_in(TokenFixtures::credential(TokenFixtures::admin()))
        .is_err());
    assert!(store.attempts() >= 2);
}

#[test]
fn test_session_replacing_credential_changes_role() {
    let session = session_over(Arc::new(MemoryTokenStore::new()));

    session
        .sign_in(TokenFixtures::credential(TokenFixtures::coach()))
        .unwrap();
    assert_eq!(session.current_role(), Some(Role::Entrenador));

    session
        .sign_in(TokenFixtures::credential(TokenFixtures::admin()))
        .unwrap();
    assert_eq!(session.current_role(), Some(Role::Administrador));
}
