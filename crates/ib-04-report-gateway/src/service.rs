//! Report gateway service - binds the HTTP listener and serves the router.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::router::{build_router, SharedStore};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::info;

/// Report gateway service state
pub struct ReportGatewayService {
    config: GatewayConfig,
    store: SharedStore,
    shutdown_tx: Option<oneshot::Sender<()>>,
    shutdown_rx: Option<oneshot::Receiver<()>>,
}

impl ReportGatewayService {
    /// Create a new gateway service
    pub fn new(config: GatewayConfig, store: SharedStore) -> Result<Self, GatewayError> {
        config.validate()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        Ok(Self {
            config,
            store,
            shutdown_tx: Some(shutdown_tx),
            shutdown_rx: Some(shutdown_rx),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Handle for stopping the server from another task. Only one exists;
    /// later calls return `None`.
    pub fn shutdown_handle(&mut self) -> Option<ShutdownHandle> {
        self.shutdown_tx.take().map(|tx| ShutdownHandle { tx })
    }

    /// Bind the configured address and serve until shut down.
    pub async fn start(&mut self) -> Result<(), GatewayError> {
        if !self.config.http.enabled {
            return Err(GatewayError::Disabled);
        }

        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener until the shutdown handle fires or
    /// the process receives Ctrl-C.
    pub async fn serve(&mut self, listener: TcpListener) -> Result<(), GatewayError> {
        let shutdown_rx = self
            .shutdown_rx
            .take()
            .ok_or_else(|| GatewayError::Server("gateway already served".into()))?;

        let router = build_router(self.store.clone(), &self.config);

        info!(
            addr = ?listener.local_addr().ok(),
            route = %self.config.report.route,
            page_size = self.config.report.page_size,
            sort_scope = ?self.config.report.sort_scope,
            "Report gateway listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_rx => info!("Received shutdown signal"),
                    _ = tokio::signal::ctrl_c() => info!("Received Ctrl-C"),
                }
            })
            .await
            .map_err(|e| GatewayError::Server(e.to_string()))?;

        info!("Report gateway stopped");
        Ok(())
    }
}

/// Stops a running `ReportGatewayService`.
pub struct ShutdownHandle {
    tx: oneshot::Sender<()>,
}

impl ShutdownHandle {
    /// Trigger graceful shutdown
    pub fn shutdown(self) {
        let _ = self.tx.send(());
    }
}
