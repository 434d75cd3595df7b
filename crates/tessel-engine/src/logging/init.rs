use std::sync::Once;

use log::LevelFilter;

/// Logger configuration for binaries and test harnesses.
///
/// Filter precedence when the logger is installed:
/// 1. `env_filter` (`env_logger` syntax, e.g. `"tessel_grid=debug"`)
/// 2. the `RUST_LOG` environment variable
/// 3. `default_level`
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: LevelFilter,
    /// Prefix lines with a timestamp. Replay output reads better without.
    pub timestamps: bool,
    pub write_style: env_logger::WriteStyle,
}

impl LoggingConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub fn with_default_level(mut self, level: LevelFilter) -> Self {
        self.default_level = level;
        self
    }

    pub fn with_timestamps(mut self, on: bool) -> Self {
        self.timestamps = on;
        self
    }

    fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        match (&self.env_filter, std::env::var("RUST_LOG")) {
            (Some(filter), _) => builder.parse_filters(filter),
            (None, Ok(filter)) => builder.parse_filters(&filter),
            (None, Err(_)) => builder.filter_level(self.default_level),
        };
        if !self.timestamps {
            builder.format_timestamp(None);
        }
        builder.write_style(self.write_style);
        builder
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            timestamps: true,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger once; later calls are ignored.
///
/// A logger installed by someone else (a test harness, say) is left alone.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if config.builder().try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
