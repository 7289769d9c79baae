// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! fedgate - session and access control for the federation admin console
//!
//! Main binary entry point.

use fedgate_bin::error::report_error_and_exit;
use fedgate_bin::{commands, init_logging, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Commands load the configuration again and report its errors.
    let config = commands::load_config(&cli).ok();
    let logging = config.as_ref().map(|c| &c.logging);
    init_logging(
        cli.effective_log_level(logging),
        cli.effective_log_format(logging),
    );

    if let Err(e) = commands::execute(cli).await {
        report_error_and_exit(e);
    }
}
