mod bootstrap;

use anyhow::Result;
use liftboard_core::settings::Settings;
use liftboard_core::time_utils;
use liftboard_data::reader;
use liftboard_web::routes::AppState;
use liftboard_web::server::DashboardServer;
use liftboard_web::theme::PageTheme;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Liftboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Theme: {}, Timezone: {}, Bind: {}",
        settings.theme,
        settings.timezone,
        settings.bind_addr()
    );

    // Resolve the export up front so a missing data directory fails fast
    // with a readable error instead of a 500 on first request.
    let data_file = reader::resolve_data_file(settings.data_file.as_deref())?;
    tracing::info!("Serving workout data from {}", data_file.display());

    let state = AppState {
        data_file,
        theme: PageTheme::from_name(&settings.theme),
        timezone: time_utils::resolve_timezone(&settings.timezone),
    };

    DashboardServer::new(state).run(&settings.bind_addr()).await?;
    Ok(())
}
