use anyhow::{Context, Result};
use clap::Parser;
use qtour::config::{CliArgs, DemoConfig};
use qtour::driver::Driver;
use qtour::{Simulator, logger};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    logger::init_cli_logger(args.verbose);

    let config = DemoConfig::from_args(&args).context("Failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    // the simulator lives for the whole tour and is released when this scope ends
    let mut sim = Simulator::with_config(config.simulator_config());
    let mut driver = Driver::new(config, stdin.lock(), stdout.lock());
    let report = driver.run(&mut sim).context("Demonstration aborted")?;

    tracing::info!(sections = report.sections().len(), "tour finished");
    Ok(())
}
