use anyhow::Result;

use fractview_engine::device::GpuInit;
use fractview_engine::logging;
use fractview_engine::window::Runtime;

mod config;
mod controls;
mod viewer;

use config::ViewerConfig;
use viewer::Viewer;

fn main() -> Result<()> {
    let config = ViewerConfig::from_env()?;
    logging::init_logging(config.logging.clone());

    log::info!(
        "starting {} ({}x{}, continuous: {})",
        config.title,
        config.width,
        config.height,
        config.continuous
    );

    let viewer = Viewer::new(&config);
    Runtime::run(config.runtime_config(), GpuInit::default(), viewer)
}
