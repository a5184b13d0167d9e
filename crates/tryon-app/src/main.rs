// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Try-on shell: desktop host for the embedded try-on widget.
//
// Entry point. Initialises logging, loads the screen configuration, and runs
// the web view event loop.

mod dialog;
mod host;
mod pdp;
mod services;
mod shell;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("try-on shell starting");

    let config = services::config::load_config();

    if let Err(e) = shell::run(config) {
        tracing::error!(error = %e, "failed to start web view shell");
        std::process::exit(1);
    }
}
