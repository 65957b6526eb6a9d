use crate::clients::{RendererClient, SearchClient};
use crate::config::Config;
use crate::health::{HealthCheck, VersionInfo};
use crate::prelude::*;
use crate::routes::{router, AppState};

pub async fn run(config: Config) -> Result<()> {
    log::info!(
        "got service configuration: {}",
        serde_json::to_string(&config).unwrap_or_else(|_| f!("{config:?}"))
    );

    let search = SearchClient::new(&config.search_api_url);
    let renderer = RendererClient::new(&config.renderer_url);

    let mut health = HealthCheck::new(
        VersionInfo::from_build_env(),
        config.health_interval(),
        config.health_critical_timeout(),
    );
    register_checkers(&mut health, &search, &renderer);
    let health_task = health.start();

    let app = router(
        AppState {
            search,
            renderer,
            health,
        },
        config.request_timeout(),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", config.bind_addr, e))?;

    log::info!("starting server on {}", config.bind_addr);

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            health_task.abort();
            result
                .context("HTTP server task failed")?
                .map_err(|e| eyre!("Server error: {e}"))?;
            log::warn!("HTTP server stopped");
            return Ok(());
        }
        _ = shutdown_signal() => {
            log::info!("shutdown signal received");
        }
    }

    log::info!("shutting service down gracefully");
    let _ = stop_tx.send(());
    health_task.abort();

    match tokio::time::timeout(config.shutdown_timeout(), &mut server).await {
        Ok(result) => {
            result
                .context("HTTP server task failed")?
                .map_err(|e| eyre!("Failed to shutdown http server: {e}"))?;
            log::info!("shutdown complete");
        }
        Err(_) => {
            server.abort();
            log::warn!(
                "graceful shutdown timed out after {}s, dropping in-flight requests",
                config.graceful_shutdown_timeout
            );
        }
    }

    Ok(())
}

/// Failures are logged and the service keeps running without that check
fn register_checkers(health: &mut HealthCheck, search: &SearchClient, renderer: &RendererClient) {
    let checks = [
        ("frontend renderer", renderer.checker()),
        ("Search API", search.checker()),
    ];

    for (name, checker) in checks {
        log::info!("registering {} health check at {}", name, checker.url());
        if let Err(e) = health.add_check(name, checker) {
            log::error!("failed to add {} checker: {}", name, e);
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
