//! HTTP routes for the dashboard server.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono_tz::Tz;
use liftboard_core::time_utils;
use liftboard_data::analysis::build_dashboard;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::page;
use crate::theme::PageTheme;

/// Shared state for all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// CSV export the dashboard is built from, resolved at startup.
    pub data_file: PathBuf,
    /// Default page theme; a `?theme=` query overrides it per request.
    pub theme: PageTheme,
    /// Timezone used to anchor "today" for the stat cards.
    pub timezone: Tz,
}

/// Query parameters accepted by the dashboard page.
#[derive(Deserialize)]
struct PageQuery {
    theme: Option<String>,
}

/// Dashboard routes.
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create the full application router.
    pub fn router(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/", get(Self::handle_dashboard))
            .route("/health", get(Self::handle_health))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Serve the dashboard page.
    ///
    /// The page is rebuilt from the CSV on every request, so replacing the
    /// export and refreshing the browser is all it takes to update.
    async fn handle_dashboard(
        State(state): State<Arc<AppState>>,
        Query(params): Query<PageQuery>,
    ) -> Response {
        let theme = params
            .theme
            .as_deref()
            .map(PageTheme::from_name)
            .unwrap_or(state.theme);
        let today = time_utils::today_in(state.timezone);

        match build_dashboard(&state.data_file, today) {
            Ok(data) => Html(page::render_dashboard(&data, theme)).into_response(),
            Err(err) => {
                error!(
                    "Failed to build dashboard from {}: {}",
                    state.data_file.display(),
                    err
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(page::render_error(&err.to_string())),
                )
                    .into_response()
            }
        }
    }

    async fn handle_health() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
