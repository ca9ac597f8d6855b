use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: Environment,
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn new(settings: &LoggingSettings, environment: Environment) -> Self {
        Self {
            environment,
            level: settings.level.clone(),
            json_format: settings.json,
        }
    }

    /// Directive used when `RUST_LOG` is not set.
    pub fn default_directive(&self) -> String {
        format!("{},docsum=debug,tower_http=debug", self.level)
    }
}
