//! # Server
//!
//! Process wiring: storage selection, both listeners and graceful shutdown.
//!
//! REST and gRPC run as two tasks sharing one [`AdsService`]. Whichever
//! stops first (signal, error or external shutdown future) flips a shared
//! watch channel, and the other drains its connections and exits.

use crate::api::grpc::AdServiceImpl;
use crate::api::grpc::proto::AdServiceServer;
use crate::api::rest::{AppState, create_router};
use crate::application::AdsService;
use crate::infrastructure::config::{AppConfig, StorageKind};
use crate::infrastructure::persistence::{InMemoryRepository, PostgresRepository, Repository};
use anyhow::Context;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinError;
use tokio_stream::wrappers::TcpListenerStream;

/// Builds the repository selected by `config`.
///
/// # Errors
///
/// Fails if the PostgreSQL pool cannot connect or migrations fail.
pub async fn build_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn Repository>> {
    match config.storage() {
        StorageKind::Memory => {
            tracing::info!("using in-memory storage");
            Ok(Arc::new(InMemoryRepository::new()))
        }
        StorageKind::Postgres => {
            let repo = PostgresRepository::connect(config.postgres())
                .await
                .context("failed to initialise postgres storage")?;
            tracing::info!("using postgres storage");
            Ok(Arc::new(repo))
        }
    }
}

/// Runs the service until SIGINT or SIGTERM.
///
/// # Errors
///
/// Fails if storage cannot be initialised, a listener cannot bind, or a
/// listener stops with an error.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let repo = build_repository(&config).await?;
    let service = AdsService::new(repo);

    let rest_addr = config.rest_addr()?;
    let grpc_addr = config.grpc_addr()?;
    let rest_listener = TcpListener::bind(rest_addr)
        .await
        .with_context(|| format!("failed to bind rest listener on {rest_addr}"))?;
    let grpc_listener = TcpListener::bind(grpc_addr)
        .await
        .with_context(|| format!("failed to bind grpc listener on {grpc_addr}"))?;

    serve(service, rest_listener, grpc_listener, shutdown_signal()).await
}

/// Serves REST and gRPC on already-bound listeners until `shutdown`
/// completes or either listener fails.
///
/// # Errors
///
/// Returns the first listener failure.
pub async fn serve<F>(
    service: AdsService,
    rest_listener: TcpListener,
    grpc_listener: TcpListener,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (stop_tx, stop_rx) = watch::channel(false);
    let stop_tx = Arc::new(stop_tx);

    tracing::info!(addr = ?rest_listener.local_addr().ok(), "rest listener started");
    tracing::info!(addr = ?grpc_listener.local_addr().ok(), "grpc listener started");

    let signal_task = {
        let stop_tx = Arc::clone(&stop_tx);
        tokio::spawn(async move {
            shutdown.await;
            stop_tx.send_replace(true);
        })
    };

    let rest_task = {
        let stop_tx = Arc::clone(&stop_tx);
        let stopped = stopped(stop_rx.clone());
        let router = create_router(Arc::new(AppState::new(service.clone())));
        tokio::spawn(async move {
            let result = axum::serve(rest_listener, router)
                .with_graceful_shutdown(stopped)
                .await
                .context("rest listener failed");
            stop_tx.send_replace(true);
            result
        })
    };

    let grpc_task = {
        let stop_tx = Arc::clone(&stop_tx);
        let stopped = stopped(stop_rx);
        tokio::spawn(async move {
            let result = tonic::transport::Server::builder()
                .add_service(AdServiceServer::new(AdServiceImpl::new(service)))
                .serve_with_incoming_shutdown(TcpListenerStream::new(grpc_listener), stopped)
                .await
                .context("grpc listener failed");
            stop_tx.send_replace(true);
            result
        })
    };

    let (rest, grpc) = tokio::join!(rest_task, grpc_task);
    signal_task.abort();

    let rest = settle("rest", rest);
    let grpc = settle("grpc", grpc);
    tracing::info!("listeners stopped");
    rest.and(grpc)
}

async fn stopped(mut stop_rx: watch::Receiver<bool>) {
    // A dropped sender also ends the wait.
    let _ = stop_rx.wait_for(|stop| *stop).await;
}

fn settle(name: &str, joined: Result<anyhow::Result<()>, JoinError>) -> anyhow::Result<()> {
    let result = joined.with_context(|| format!("{name} task aborted"))?;
    if let Err(e) = &result {
        tracing::error!(error = ?e, listener = name, "listener stopped with error");
    }
    result
}

/// Completes on SIGINT, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("captured shutdown signal");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::AdFilter;
    use crate::infrastructure::persistence::AdRepository;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn memory_storage_needs_no_database() {
        let repo = build_repository(&AppConfig::default()).await.unwrap();
        assert!(repo.list_ads(&AdFilter::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn serve_stops_on_shutdown() {
        let service = AdsService::new(Arc::new(InMemoryRepository::new()));
        let rest = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let grpc = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(serve(service, rest, grpc, async move {
            let _ = rx.await;
        }));
        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
