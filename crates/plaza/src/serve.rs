// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plaza serve` command implementation.
//!
//! Wires the provider, stores, orchestrator and marketplace assistant into
//! the HTTP gateway and serves until SIGINT or SIGTERM.

use std::sync::Arc;

use plaza_agent::{build_marketplace, build_orchestrator};
use plaza_catalog::{demo_catalog, demo_events};
use plaza_config::PlazaConfig;
use plaza_core::{PlazaError, PluginAdapter};
use plaza_gateway::{GatewayState, HealthState, start_server};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::wiring::{build_provider, build_stores};

/// Runs the `plaza serve` command.
pub async fn run_serve(config: PlazaConfig) -> Result<(), PlazaError> {
    init_tracing(&config.agent.log_level);
    info!(agent = %config.agent.name, "starting plaza serve");

    let provider = build_provider(&config);
    let stores = build_stores(&config).await;

    let orchestrator = Arc::new(build_orchestrator(
        &config,
        provider.provider.clone(),
        stores.personality.clone(),
        stores.memories.clone(),
    ));
    let marketplace = Arc::new(build_marketplace(&config, provider.provider.clone()));

    let adapters: Vec<Arc<dyn PluginAdapter + Send + Sync>> =
        vec![provider.adapter.clone(), stores.adapter.clone()];
    let state = GatewayState {
        orchestrator,
        marketplace,
        catalog: Arc::new(demo_catalog()),
        events: Arc::new(demo_events(chrono::Utc::now())),
        health: HealthState {
            start_time: std::time::Instant::now(),
            adapters: adapters.clone(),
        },
    };

    let cancel = install_signal_handler();
    let served = start_server(&config.gateway, state, cancel).await;

    for adapter in &adapters {
        if let Err(e) = adapter.shutdown().await {
            warn!(adapter = adapter.name(), error = %e, "adapter shutdown failed");
        }
    }
    info!("plaza serve stopped");
    served
}

/// Cancels the returned token on SIGINT (Ctrl+C) or SIGTERM.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
                        _ = sigterm.recv() => info!("received SIGTERM, initiating shutdown"),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler, listening for Ctrl+C only");
                    let _ = ctrl_c.await;
                    info!("received SIGINT (Ctrl+C), initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

/// Installs the fmt subscriber. `RUST_LOG` wins over the configured level.
pub(crate) fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plaza={log_level},warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init();
}
