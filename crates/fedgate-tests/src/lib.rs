// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # fedgate Integration Tests
//!
//! Test utilities and cross-crate integration suites for fedgate.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `fixtures`: Signed tokens, menus and config documents
//!   - `builders`: Token and scenario builders
//!   - `assertions`: Route and menu assertions
//!   - `mocks`: Mock refreshers and token stores
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fedgate-tests
//! cargo test -p fedgate-tests --test integration_session
//! cargo test -p fedgate-tests --test integration_access
//! cargo test -p fedgate-tests --test integration_bootstrap
//! cargo test -p fedgate-tests --test integration_config
//! ```
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use fedgate_core::Role;
//! use fedgate_tests::prelude::*;
//!
//! #[test]
//! fn test_coach_cannot_manage_roles() {
//!     let access = ScenarioBuilder::new()
//!         .console_routes()
//!         .signed_in_as(Role::Entrenador)
//!         .build();
//!
//!     access.assert_redirects_to_unauthorized("/dashboard/roles");
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::fixtures::*;
    pub use crate::common::builders::*;
    pub use crate::common::assertions::*;
    pub use crate::common::mocks::*;
    pub use crate::common::{init_test_logging, temp_test_dir, unique_test_id};
}
