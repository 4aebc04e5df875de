//! CLI Configuration

use clap::Args;
use visitor_app::crypto::CodecKey;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Database settings.
#[derive(Debug, Args)]
pub(crate) struct DatabaseConfig {
    /// `SQLite` connection string
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://visitor.db?mode=rwc",
        hide_env_values = true
    )]
    pub database_url: String,
}

/// Field codec settings.
#[derive(Debug, Args)]
pub(crate) struct CodecConfig {
    /// Field encryption key, 64 hex characters
    #[arg(long, env = "VISITOR_ENCRYPTION_KEY", hide_env_values = true)]
    encryption_key: String,
}

impl CodecConfig {
    pub(crate) fn key(&self) -> Result<CodecKey, String> {
        self.encryption_key
            .parse()
            .map_err(|error| format!("invalid encryption key: {error}"))
    }
}
