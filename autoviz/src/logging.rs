//! Logging utilities and configuration for autoviz.
//!
//! The engine only emits `tracing` events and spans. Installing a subscriber is
//! left to the embedding application; [`setup::init_logging`] is a convenience
//! for binaries and tests that want the usual `tracing-subscriber` stack.

use tracing::Level;

/// Logging configuration for the profiling and planning engine.
///
/// Controls how chatty the engine is about per-field and per-rule decisions,
/// which matters when the same dataset is analyzed on every screen refresh.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level for autoviz components
    pub base_level: Level,
    /// Whether to log each profiled field
    pub log_field_details: bool,
    /// Whether to log each planning rule that fires or is skipped
    pub log_rule_details: bool,
    /// Maximum length for logged field values (to prevent huge logs)
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_field_details: false,
            log_rule_details: true,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_field_details: true,
            log_rule_details: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration for production with lowest overhead.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_field_details: false,
            log_rule_details: false,
            max_field_length: 128,
        }
    }

    /// Creates a balanced configuration suitable for most use cases.
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Level the `autoviz` target needs for the enabled detail events.
    ///
    /// Detail events are emitted at debug, so enabling them raises the level.
    pub fn effective_level(&self) -> Level {
        if self.log_field_details || self.log_rule_details {
            self.base_level.max(Level::DEBUG)
        } else {
            self.base_level
        }
    }

    /// Directive for the `autoviz` target derived from this configuration.
    pub fn directive(&self) -> String {
        format!("autoviz={}", self.effective_level().as_str().to_lowercase())
    }
}

/// Truncates a string to the maximum field length if needed.
///
/// Cuts on a character boundary so multi-byte labels never split.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    match value.char_indices().nth(max_length) {
        None => value.to_string(),
        Some((cut, _)) => format!("{}...(truncated)", &value[..cut]),
    }
}

/// Utilities for setting up structured logging.
pub mod setup {
    use tracing::Level;

    use super::LogConfig;

    /// Configuration for the logging setup.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for the application
        pub level: Level,
        /// Log level for autoviz components specifically
        pub autoviz_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                autoviz_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl From<&LogConfig> for LoggingConfig {
        /// Subscriber settings that let through every event `log_config` enables.
        fn from(log_config: &LogConfig) -> Self {
            Self {
                autoviz_level: log_config.effective_level(),
                json_format: log_config.base_level <= Level::WARN,
                ..Self::default()
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for production use.
        pub fn production() -> Self {
            Self {
                level: Level::WARN,
                autoviz_level: Level::INFO,
                json_format: true,
                env_filter: None,
            }
        }

        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                autoviz_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        /// Sets the log level for the application.
        pub fn with_level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        /// Sets the log level for autoviz components.
        pub fn with_autoviz_level(mut self, level: Level) -> Self {
            self.autoviz_level = level;
            self
        }

        /// Sets whether to use JSON output format.
        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            if let Some(ref filter) = self.env_filter {
                filter.clone()
            } else {
                format!(
                    "{},autoviz={}",
                    self.level.as_str().to_lowercase(),
                    self.autoviz_level.as_str().to_lowercase()
                )
            }
        }
    }

    /// Initializes logging with an env filter and plain or JSON output.
    ///
    /// `RUST_LOG` takes precedence over the configured filter. Fails if a
    /// global subscriber is already installed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use autoviz::engine::AutoVisualizer;
    /// use autoviz::logging::setup::{init_logging, LoggingConfig};
    /// use autoviz::logging::LogConfig;
    ///
    /// let visualizer = AutoVisualizer::builder()
    ///     .log_config(LogConfig::verbose())
    ///     .build();
    /// init_logging(LoggingConfig::from(visualizer.log_config())).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer().json().boxed()
        } else {
            tracing_subscriber::fmt::layer().boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::setup::LoggingConfig;
    use super::*;

    #[test]
    fn test_log_config_presets() {
        let config = LogConfig::default();
        assert_eq!(config.base_level, Level::INFO);
        assert!(!config.log_field_details);
        assert!(config.log_rule_details);
        assert_eq!(config.max_field_length, 256);

        let verbose = LogConfig::verbose();
        assert_eq!(verbose.base_level, Level::DEBUG);
        assert!(verbose.log_field_details);

        let production = LogConfig::production();
        assert_eq!(production.base_level, Level::WARN);
        assert!(!production.log_rule_details);
        assert_eq!(production.max_field_length, 128);
    }

    #[test]
    fn test_directive() {
        assert_eq!(LogConfig::production().directive(), "autoviz=warn");
        assert_eq!(LogConfig::balanced().directive(), "autoviz=debug");
        assert_eq!(LogConfig::verbose().directive(), "autoviz=debug");
    }

    #[test]
    fn test_truncate_field() {
        assert_eq!(truncate_field("hello", 10), "hello");
        assert_eq!(
            truncate_field("this is a very long text that should be truncated", 10),
            "this is a ...(truncated)"
        );
        assert_eq!(truncate_field("Zürich-Ost", 2), "Zü...(truncated)");
    }

    #[test]
    fn test_env_filter_string() {
        assert_eq!(LoggingConfig::default().env_filter(), "info,autoviz=debug");
        assert_eq!(LoggingConfig::production().env_filter(), "warn,autoviz=info");
        assert_eq!(
            LoggingConfig::default()
                .with_env_filter("autoviz=trace")
                .env_filter(),
            "autoviz=trace"
        );
    }

    #[test]
    fn test_logging_config_from_log_config() {
        let production = LogConfig::production();
        let setup = LoggingConfig::from(&production);
        assert_eq!(setup.autoviz_level, Level::WARN);
        assert!(setup.json_format);
        assert_eq!(setup.env_filter(), "info,autoviz=warn");
        assert!(setup.env_filter().ends_with(&production.directive()));

        let balanced = LoggingConfig::from(&LogConfig::balanced());
        assert_eq!(balanced.env_filter(), "info,autoviz=debug");
        assert!(!balanced.json_format);
    }
}
