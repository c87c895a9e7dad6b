//! HTTP server lifecycle: bind, serve, shut down on Ctrl-C.

use std::sync::Arc;

use liftboard_core::error::Result;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::{AppState, DashboardRoutes};

/// Owns the shared state and runs the axum server.
pub struct DashboardServer {
    state: Arc<AppState>,
}

impl DashboardServer {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Bind `bind_addr` and serve until the process receives Ctrl-C.
    pub async fn run(self, bind_addr: &str) -> Result<()> {
        let listener = TcpListener::bind(bind_addr).await?;
        info!("Dashboard available at http://{}", listener.local_addr()?);

        let router = DashboardRoutes::router(self.state);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::PageTheme;
    use std::path::PathBuf;

    fn state() -> AppState {
        AppState {
            data_file: PathBuf::from("workouts.csv"),
            theme: PageTheme::Auto,
            timezone: chrono_tz::UTC,
        }
    }

    #[tokio::test]
    async fn test_run_rejects_unresolvable_address() {
        let server = DashboardServer::new(state());
        let result = server.run("999.999.999.999:0").await;
        assert!(result.is_err());
    }
}
