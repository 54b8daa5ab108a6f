use std::{
    fs::{self, File},
    io::BufReader,
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use geoscout_core::usecases::{ConversionSettings, Geocoder};

use crate::{
    config::{raw, Config},
    convert::convert,
    gateways,
};

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Configuration file [default: geoscout.toml]
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// CSV file with the addresses
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// JSON file for the geocoded records
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Geocoding provider
    #[arg(long, value_enum)]
    gateway: Option<raw::GeocodingGateway>,

    /// Pause between two requests, e.g. "100ms"
    #[arg(long, value_parser = parse_duration)]
    delay: Option<Duration>,

    /// Only process the first N records
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
}

fn parse_duration(arg: &str) -> Result<Duration, String> {
    duration_str::parse(arg).map_err(|err| err.to_string())
}

impl Args {
    fn override_config(self, cfg: &mut raw::Config) {
        let Self {
            input,
            output,
            gateway,
            delay,
            limit,
            ..
        } = self;
        if let Some(path) = input {
            cfg.input.path = path;
        }
        if let Some(path) = output {
            cfg.output.path = path;
        }
        if let Some(gateway) = gateway {
            cfg.geocoding.gateway = gateway;
        }
        if let Some(delay) = delay {
            cfg.geocoding.delay = delay;
        }
        if limit.is_some() {
            cfg.geocoding.limit = limit;
        }
    }
}

fn load_config(args: Args) -> Result<Config> {
    let mut raw_cfg = raw::Config::try_load_from_file_or_default(args.config.as_deref())?;
    raw_cfg.override_api_keys_from_env();
    args.override_config(&mut raw_cfg);
    Config::try_from(raw_cfg)
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let cfg = load_config(args)?;
    log::debug!("{cfg:?}");

    let Config {
        input,
        output,
        geocoding,
    } = cfg;

    let geocoder = Geocoder::new(gateways::geocoding_gateway(&geocoding.gateway)?);
    let settings = ConversionSettings {
        address_column: input.address_column,
        delay: geocoding.delay,
    };

    let reader = File::open(&input.path)
        .map(BufReader::new)
        .with_context(|| format!("Unable to open {}", input.path.display()))?;
    log::info!(
        "Start geocoding the addresses of {} ({})",
        input.path.display(),
        geocoding.gateway
    );

    // Nothing is written before all records have been processed
    let mut json = Vec::new();
    let stats = convert(reader, &mut json, &geocoder, &settings, geocoding.limit)
        .with_context(|| format!("Unable to convert {}", input.path.display()))?;
    fs::write(&output.path, json)
        .with_context(|| format!("Unable to write {}", output.path.display()))?;

    log::info!(
        "Unresolved: {} not found, {} failed, {} without address",
        stats.not_found,
        stats.failed,
        stats.skipped
    );
    log::info!("Finished: {} has been created", output.path.display());
    Ok(())
}
