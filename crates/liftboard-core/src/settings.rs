use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ────────────────────────────────────────────────────────────

/// Workout log dashboard served from a local CSV export
#[derive(Parser, Debug, Clone)]
#[command(
    name = "liftboard",
    about = "Workout log dashboard served from a local CSV export",
    version
)]
pub struct Settings {
    /// Path to the workout CSV export (auto-discovered if not specified)
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Address to bind the HTTP server on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the HTTP server on
    #[arg(long, default_value = "8080", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Page theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "auto"])]
    pub theme: String,

    /// Timezone for the activity counters (auto-detected if not specified)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ─────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments and resolve `"auto"` sentinel values.
    pub fn load() -> Self {
        Self::resolve_auto_values(Self::parse())
    }

    /// Same as [`Settings::load`] but with an explicit argument list, enabling
    /// unit tests without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve_auto_values(Self::parse_from(args))
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolve `"auto"` sentinel values and apply the `--debug` flag.
    ///
    /// The `"auto"` theme is deliberately left unresolved: the page maps it to
    /// the browser's `prefers-color-scheme` at render time.
    fn resolve_auto_values(mut settings: Settings) -> Settings {
        if settings.timezone == "auto" {
            settings.timezone = crate::time_utils::get_system_timezone();
        }

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
