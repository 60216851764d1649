use quadpass_engine::device::GpuInit;
use quadpass_engine::logging::{init_logging, LoggingConfig};
use quadpass_engine::window::{Runtime, RuntimeConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    log::info!("starting quadpass");

    Runtime::run(RuntimeConfig::default(), GpuInit::default())
}
