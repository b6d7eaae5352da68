use anyhow::Context;

use seesaw_engine::device::GpuInit;
use seesaw_engine::logging::{init_logging, LoggingConfig};
use seesaw_engine::motion::MotionConfig;
use seesaw_engine::quad::QuadApp;
use seesaw_engine::window::{Runtime, RuntimeConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let motion = MotionConfig::default();
    let app = QuadApp::new(motion).context("failed to build the quad pipeline")?;

    log::info!("click to pause or resume; hold {} to pause", motion.hold_key);

    Runtime::run(RuntimeConfig::default(), GpuInit::default(), app)
}
