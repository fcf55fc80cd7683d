mod app;

use std::path::PathBuf;

use anyhow::Result;
use skink_engine::device::GpuInit;
use skink_engine::logging::{init_logging, LoggingConfig};
use skink_engine::window::{Runtime, RuntimeConfig};

use crate::app::SkinkApp;

/// Overrides the window icon path.
const ICON_ENV: &str = "SKINK_ICON";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut config = RuntimeConfig::default();
    if let Some(path) = std::env::var_os(ICON_ENV) {
        config.icon = Some(PathBuf::from(path));
    }

    // Colors are authored as display values; keep the surface linear so they
    // are not re-encoded.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    log::info!(
        "starting {} ({}x{})",
        config.title,
        config.initial_size.width,
        config.initial_size.height
    );

    Runtime::run(config, gpu_init, SkinkApp::new())
}
