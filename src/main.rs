use clap::Parser;
use log::{error, info};

use crate::core::{
    cli::{Cli, Command},
    configuration::get_configuration,
    core::{provision, validate},
    logger,
};

mod association;
mod core;
mod inventory;
mod provisioning;
mod reporting;
mod rf;
mod validation;
mod wlc;

const DEFAULT_CONFIGURATION_FILE: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Decode { value } => return decode(value),
        Command::Encode {
            band,
            channel,
            width,
        } => return encode(band, *channel, *width),
        _ => {}
    }

    let configuration_file = cli
        .configuration_file
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIGURATION_FILE.to_string());

    let conf = get_configuration(configuration_file).await?;
    let _logger = logger::init(&conf.log, cli.verbosity)?;

    info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let (report, report_path) = match cli.command {
        Command::Provision { dry_run, report } => (provision(&conf, dry_run).await, report),
        Command::Validate { report } => (validate(&conf).await, report),
        Command::Decode { .. } | Command::Encode { .. } => return Ok(()),
    };

    let report = match report {
        Ok(r) => r,
        Err(e) => {
            error!("run aborted: {e}");
            return Err(e);
        }
    };

    report.print_summary();

    if let Some(path) = report_path {
        report.write_json(&path)?;
    }

    if !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

fn decode(value: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let params = rf::decode(&rf::RfChannel::new(value))?;

    println!(
        "band: {}, channel: {}, channel width: {}",
        params.band, params.channel, params.channel_width
    );

    Ok(())
}

fn encode(
    band: &str,
    channel: u16,
    width: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let band = rf::Band::from_inventory_prefix(band)
        .ok_or_else(|| rf::InvalidChannelError::Unrecognized(band.to_string()))?;

    println!("{}", rf::encode(&rf::RadioParameters::new(band, channel, width))?);

    Ok(())
}
