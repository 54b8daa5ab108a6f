use std::{
    collections::{HashMap, HashSet},
    io,
};

use anyhow::{bail, Result};
use csv::{ReaderBuilder, StringRecord};
use geoscout_entities::record::{AddressRecord, Field};

/// Reads all rows of a CSV table with a header line.
///
/// Empty cells and missing trailing cells are treated as missing values.
/// A repeated column name gets a numeric suffix (`Name`, `Name.1`, ...).
pub fn read_records<R: io::Read>(reader: R, address_column: &str) -> Result<Vec<AddressRecord>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = unique_column_names(rdr.headers()?);
    if !headers.iter().any(|name| name == address_column) {
        bail!("The input has no column '{address_column}'");
    }
    let mut records = vec![];
    for row in rdr.records() {
        let row = row?;
        if row.len() > headers.len() {
            let line = row.position().map(|pos| pos.line()).unwrap_or_default();
            bail!(
                "Line {line} has {} fields, but the header only has {}",
                row.len(),
                headers.len()
            );
        }
        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, name)| Field::new(name.as_str(), row.get(i).filter(|v| !v.is_empty())))
            .collect();
        records.push(AddressRecord::new(fields));
    }
    log::debug!("Read {} records with {} columns", records.len(), headers.len());
    Ok(records)
}

fn unique_column_names(headers: &StringRecord) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut suffixes: HashMap<&str, usize> = HashMap::new();
    headers
        .iter()
        .map(|name| {
            let mut unique = name.to_owned();
            while !taken.insert(unique.clone()) {
                let n = suffixes.entry(name).or_default();
                *n += 1;
                unique = format!("{name}.{n}");
            }
            if unique != name {
                log::warn!("Duplicate column '{name}' renamed to '{unique}'");
            }
            unique
        })
        .collect()
}
