use std::io;

use anyhow::Result;
use geoscout_core::{
    gateways::geocode::GeoCodingGateway,
    usecases::{self, Conversion, ConversionSettings, ConversionStats, Geocoder},
};

use crate::adapters::{csv, json};

/// Reads the CSV table, geocodes every row and writes
/// the resolved rows as JSON.
pub fn convert<R, W, G>(
    input: R,
    output: W,
    geocoder: &Geocoder<G>,
    settings: &ConversionSettings,
    limit: Option<usize>,
) -> Result<ConversionStats>
where
    R: io::Read,
    W: io::Write,
    G: GeoCodingGateway,
{
    let mut records = csv::read_records(input, &settings.address_column)?;
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    let Conversion { records, stats } = usecases::geocode_records(geocoder, records, settings);
    json::write_records(output, &records)?;
    Ok(stats)
}
