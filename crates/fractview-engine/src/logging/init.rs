use std::sync::Once;

use env_logger::{Builder, Env, WriteStyle};

/// Filter used when neither `LoggingConfig::env_filter` nor `RUST_LOG` is set.
///
/// wgpu and naga log every pipeline and resource at `info`.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger setup for the viewer binary.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives; overrides `RUST_LOG` when set.
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
    /// Prefix lines with millisecond timestamps (handy next to FPS samples).
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: WriteStyle::Auto,
            timestamps: true,
        }
    }
}

impl LoggingConfig {
    fn builder(&self) -> Builder {
        let mut builder = match &self.env_filter {
            Some(filter) => {
                let mut b = Builder::new();
                b.parse_filters(filter);
                b
            }
            None => Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER)),
        };

        builder.write_style(self.write_style);
        if self.timestamps {
            builder.format_timestamp_millis();
        } else {
            builder.format_timestamp(None);
        }
        builder
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        // Test harnesses may have installed a logger already.
        if config.builder().try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig {
            env_filter: Some("debug".to_string()),
            ..LoggingConfig::default()
        });
        log::info!("still logging");
    }

    #[test]
    fn explicit_filter_builds() {
        let config = LoggingConfig {
            env_filter: Some("fractview_engine=trace,wgpu_core=error".to_string()),
            write_style: WriteStyle::Never,
            timestamps: false,
        };
        let _ = config.builder().build();
    }
}
