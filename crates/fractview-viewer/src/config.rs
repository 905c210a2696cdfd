use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use fractview_engine::core::{ColorChannel, ParamSliders};
use fractview_engine::logging::LoggingConfig;
use fractview_engine::window::RuntimeConfig;

pub const ENV_CONTINUOUS: &str = "FRACTVIEW_CONTINUOUS";
pub const ENV_ITERATIONS: &str = "FRACTVIEW_ITERATIONS";

/// Startup configuration for the viewer.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub width: f64,
    pub height: f64,
    /// Redraw continuously instead of only on invalidation.
    pub continuous: bool,
    pub iterations: i32,
    pub rgb: [i32; 3],
    pub logging: LoggingConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let sliders = ParamSliders::default();
        Self {
            title: "fractview".to_string(),
            width: 800.0,
            height: 600.0,
            continuous: true,
            iterations: sliders.iterations(),
            rgb: ColorChannel::ALL.map(|c| sliders.channel(c)),
            logging: LoggingConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Defaults overlaid with `FRACTVIEW_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(ENV_CONTINUOUS) {
            self.continuous = parse_flag(&raw)
                .with_context(|| format!("invalid {ENV_CONTINUOUS}={raw:?}"))?;
        }
        if let Some(raw) = lookup(ENV_ITERATIONS) {
            self.iterations = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {ENV_ITERATIONS}={raw:?}"))?;
        }
        Ok(self)
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        }
    }

    /// Initial slider positions, clamped to the slider ranges.
    pub fn sliders(&self) -> ParamSliders {
        let mut sliders = ParamSliders::default();
        sliders.set_iterations(self.iterations);
        for (channel, value) in ColorChannel::ALL.into_iter().zip(self.rgb) {
            sliders.set_channel(channel, value);
        }
        sliders
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => anyhow::bail!("expected 0 or 1"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_match_initial_sliders() {
        let config = ViewerConfig::default();
        assert!(config.continuous);
        assert_eq!(config.iterations, 30);
        assert_eq!(config.rgb, [22, 30, 90]);
        assert_eq!(config.sliders(), ParamSliders::default());
    }

    #[test]
    fn env_overrides_continuous_and_iterations() {
        let config = ViewerConfig::default()
            .with_overrides(env(&[(ENV_CONTINUOUS, "0"), (ENV_ITERATIONS, " 12 ")]))
            .unwrap();
        assert!(!config.continuous);
        assert_eq!(config.sliders().iterations(), 12);
    }

    #[test]
    fn out_of_range_iterations_are_clamped() {
        let config = ViewerConfig::default()
            .with_overrides(env(&[(ENV_ITERATIONS, "500")]))
            .unwrap();
        assert_eq!(config.sliders().iterations(), 60);
    }

    #[test]
    fn garbage_values_are_errors() {
        let err = ViewerConfig::default()
            .with_overrides(env(&[(ENV_CONTINUOUS, "maybe")]))
            .unwrap_err();
        assert!(format!("{err:#}").contains(ENV_CONTINUOUS));

        assert!(
            ViewerConfig::default()
                .with_overrides(env(&[(ENV_ITERATIONS, "lots")]))
                .is_err()
        );
    }

    #[test]
    fn runtime_config_uses_title_and_size() {
        let rc = ViewerConfig::default().runtime_config();
        assert_eq!(rc.title, "fractview");
        assert_eq!(rc.initial_size, LogicalSize::new(800.0, 600.0));
    }
}
