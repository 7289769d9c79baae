// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Bootstrap Integration Tests
//!
//! The startup refresh probe against mock refreshers and real stores.

use std::sync::Arc;
use std::time::Duration;

use fedgate_core::{
    BootstrapState, LocalRefresher, MemoryTokenStore, Role, SessionBootstrap, SessionEvaluator,
    TokenStore,
};
use fedgate_tests::prelude::*;

fn seeded_session(access_token: String) -> (Arc<MemoryTokenStore>, SessionEvaluator) {
    init_test_logging();
    let store = Arc::new(MemoryTokenStore::with_credential(TokenFixtures::credential(
        access_token,
    )));
    let session = SessionEvaluator::new(store.clone());
    (store, session)
}

#[tokio::test]
async fn test_bootstrap_without_credential_skips_refresh() {
    let session = SessionEvaluator::new(Arc::new(MemoryTokenStore::new()));
    let refresher = Arc::new(MockRefresher::new(RefreshBehavior::Echo));

    let state = SessionBootstrap::new(session, refresher.clone()).probe().await;

    assert_eq!(state, BootstrapState::Ready { authenticated: false });
    assert_eq!(refresher.call_count(), 0);
}

#[tokio::test]
async fn test_bootstrap_renewal_replaces_credential() {
    let (store, session) = seeded_session(TokenFixtures::expired(Role::Entrenador));
    let renewed = TokenFixtures::credential(TokenFixtures::coach());
    let refresher = Arc::new(MockRefresher::renewing(renewed.clone()));

    let state = SessionBootstrap::new(session.clone(), refresher.clone())
        .probe()
        .await;

    assert_eq!(state, BootstrapState::Ready { authenticated: true });
    assert_eq!(refresher.call_count(), 1);
    assert_eq!(
        refresher.last_seen().map(|c| c.refresh_token),
        Some(FIXTURE_REFRESH_TOKEN.to_string())
    );
    assert_eq!(store.get().unwrap(), Some(renewed));
    assert_eq!(session.current_role(), Some(Role::Entrenador));
}

#[tokio::test]
async fn test_bootstrap_rejection_clears_credential() {
    let (store, session) = seeded_session(TokenFixtures::admin());
    let refresher = Arc::new(MockRefresher::rejecting());

    let state = SessionBootstrap::new(session.clone(), refresher).probe().await;

    assert_eq!(state, BootstrapState::Ready { authenticated: false });
    assert!(store.get().unwrap().is_none());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_bootstrap_unavailable_backend_clears_credential() {
    let (store, session) = seeded_session(TokenFixtures::admin());
    let refresher = Arc::new(MockRefresher::new(RefreshBehavior::Unavailable(
        "connection refused".to_string(),
    )));

    let state = SessionBootstrap::new(session, refresher).probe().await;

    assert_eq!(state, BootstrapState::Ready { authenticated: false });
    assert!(store.get().unwrap().is_none());
}

#[tokio::test]
async fn test_bootstrap_timeout_clears_credential() {
    let (store, session) = seeded_session(TokenFixtures::admin());
    let refresher = Arc::new(MockRefresher::hanging(Duration::from_secs(60)));

    let state = SessionBootstrap::new(session, refresher.clone())
        .with_timeout(Duration::from_millis(200))
        .probe()
        .await;

    assert_eq!(state, BootstrapState::Ready { authenticated: false });
    assert_eq!(refresher.call_count(), 1);
    assert!(store.get().unwrap().is_none());
}

#[tokio::test]
async fn test_bootstrap_storage_failure_reads_as_signed_out() {
    let store = Arc::new(FailingTokenStore::new());
    let session = SessionEvaluator::new(store.clone());
    let refresher = Arc::new(MockRefresher::new(RefreshBehavior::Echo));

    let state = SessionBootstrap::new(session, refresher.clone()).probe().await;

    assert_eq!(state, BootstrapState::Ready { authenticated: false });
    assert_eq!(refresher.call_count(), 0);
    assert_eq!(store.attempts(), 1);
}

#[tokio::test]
async fn test_bootstrap_spawned_probe_reports_loading_then_ready() {
    let (_store, session) = seeded_session(TokenFixtures::athlete());
    let refresher = Arc::new(MockRefresher::hanging(Duration::from_millis(50)));

    let mut handle = SessionBootstrap::new(session, refresher).spawn();
    assert_eq!(handle.state(), BootstrapState::Loading);

    let state = handle.ready().await;
    assert_eq!(state, BootstrapState::Ready { authenticated: true });
    assert_eq!(handle.state(), state);
}

#[tokio::test]
async fn test_bootstrap_local_refresher() {
    let (_store, session) = seeded_session(TokenFixtures::coach());
    let state = SessionBootstrap::new(session, Arc::new(LocalRefresher::new()))
        .probe()
        .await;
    assert_eq!(state, BootstrapState::Ready { authenticated: true });

    let (store, session) = seeded_session(TokenFixtures::expired(Role::Entrenador));
    let state = SessionBootstrap::new(session, Arc::new(LocalRefresher::new()))
        .probe()
        .await;
    assert_eq!(state, BootstrapState::Ready { authenticated: false });
    assert!(store.get().unwrap().is_none());
}

#[tokio::test]
async fn test_bootstrap_gates_guard_decisions() {
    let store = Arc::new(MemoryTokenStore::with_credential(TokenFixtures::credential(
        TokenFixtures::admin(),
    )));
    let access = fedgate_core::AccessControl::builder(store)
        .protected_routes(
            fedgate_core::ProtectedRoutes::new()
                .protect("/dashboard", fedgate_core::AccessRequirement::any_authenticated()),
        )
        .build();

    let mut handle = SessionBootstrap::new(
        access.session().clone(),
        Arc::new(MockRefresher::rejecting()),
    )
    .spawn();

    assert_eq!(handle.ready().await, BootstrapState::Ready { authenticated: false });
    access.assert_redirects_to_login("/dashboard");
}
