use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "skink_engine=debug,wgpu=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Resolves the filter string in precedence order: explicit filter, `RUST_LOG`, none.
    pub fn resolved_filter(&self) -> Option<String> {
        self.env_filter
            .clone()
            .filter(|f| !f.trim().is_empty())
            .or_else(|| std::env::var("RUST_LOG").ok().filter(|f| !f.trim().is_empty()))
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`, before the window opens,
/// so platform and GPU initialization failures are visible.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.resolved_filter() {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                // wgpu is chatty at info; keep it at warn unless asked otherwise.
                builder
                    .filter_level(log::LevelFilter::Info)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn)
                    .filter_module("naga", log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let cfg = LoggingConfig {
            env_filter: Some("debug".into()),
            ..Default::default()
        };
        assert_eq!(cfg.resolved_filter().as_deref(), Some("debug"));
    }

    #[test]
    fn blank_filter_falls_through_to_rust_log() {
        let cfg = LoggingConfig {
            env_filter: Some("   ".into()),
            ..Default::default()
        };
        let from_env = std::env::var("RUST_LOG").ok().filter(|f| !f.trim().is_empty());
        assert_eq!(cfg.resolved_filter(), from_env);
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}
