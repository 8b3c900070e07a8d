pub mod config;
pub mod error;

pub use config::{Config, DatabaseConfig, LoggingConfig, ServerConfig, ValidationResult};
pub use error::{AppError, ConfigError, DatabaseError, RusqliteErrorExt};

/// Initialize logging.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (usually
/// `logging.filter` from the config file) is used.
pub fn init(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    // A subscriber may already be installed (tests, embedding); keep that one.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    tracing::info!("SurfsUp core initialized");
}
