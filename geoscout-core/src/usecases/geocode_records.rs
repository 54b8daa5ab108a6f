use std::{thread, time::Duration};

use super::{prelude::*, Geocoder, Resolution};
use crate::address::clean_address;

pub const DEFAULT_ADDRESS_COLUMN: &str = "Address";
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct ConversionSettings {
    /// Name of the column that holds the free-text address.
    pub address_column: String,
    /// Pause between two consecutive records to respect the rate limit of the provider.
    pub delay: Duration,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            address_column: DEFAULT_ADDRESS_COLUMN.to_owned(),
            delay: DEFAULT_DELAY,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConversionStats {
    pub total: usize,
    pub resolved: usize,
    pub not_found: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ConversionStats {
    fn count(&mut self, res: &Resolution) {
        match res {
            Resolution::Resolved(_) => self.resolved += 1,
            Resolution::NotFound => self.not_found += 1,
            Resolution::Skipped => self.skipped += 1,
            Resolution::Failed(_) => self.failed += 1,
        }
    }
}

#[derive(Debug)]
pub struct Conversion {
    /// Only records with a resolved position, in input order.
    pub records: Vec<EnrichedRecord>,
    pub stats: ConversionStats,
}

/// Geocodes all records one after another.
///
/// Blocks for `settings.delay` between two records.
pub fn geocode_records<G>(
    geocoder: &Geocoder<G>,
    records: Vec<AddressRecord>,
    settings: &ConversionSettings,
) -> Conversion
where
    G: GeoCodingGateway,
{
    let total = records.len();
    let mut stats = ConversionStats {
        total,
        ..Default::default()
    };
    let mut enriched = Vec::with_capacity(total);

    for (i, record) in records.into_iter().enumerate() {
        if i > 0 && !settings.delay.is_zero() {
            thread::sleep(settings.delay);
        }
        let original = record.get(&settings.address_column);
        let address = clean_address(original);
        log::info!(
            "Processing {}/{}: {} -> {}",
            i + 1,
            total,
            original.unwrap_or_default(),
            address
        );
        let res = geocoder.resolve(&address);
        stats.count(&res);
        enriched.push(EnrichedRecord {
            record,
            pos: res.coordinate(),
        });
    }

    enriched.retain(EnrichedRecord::is_resolved);
    log::info!("Geocoded {} / {} records", stats.resolved, stats.total);

    Conversion {
        records: enriched,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::{super::tests::MockGateway, *};

    fn record(name: &str, address: Option<&str>) -> AddressRecord {
        AddressRecord::new(vec![
            Field::new("Name", Some(name)),
            Field::new("Address", address),
        ])
    }

    fn no_delay() -> ConversionSettings {
        ConversionSettings {
            delay: Duration::ZERO,
            ..Default::default()
        }
    }

    #[test]
    fn resolve_cleaned_addresses() {
        let gw = MockGateway::default().with_position("東京都渋谷区1-1-1", 35.66, 139.70);
        let geocoder = Geocoder::new(&gw);
        let records = vec![record("Shop", Some("（駐車場有） 東京都渋谷区1-1-1"))];

        let Conversion { records, stats } = geocode_records(&geocoder, records, &no_delay());

        assert_eq!(vec!["東京都渋谷区1-1-1"], *gw.requests.borrow());
        assert_eq!(1, records.len());
        let pos = records[0].pos.unwrap();
        assert_eq!(35.66, pos.lat());
        assert_eq!(139.70, pos.lng());
        assert_eq!(Some("Shop"), records[0].record.get("Name"));
        assert_eq!(1, stats.resolved);
    }

    #[test]
    fn drop_unresolved_records_and_keep_order() {
        let gw = MockGateway::default()
            .with_position("A", 1.0, 1.0)
            .with_position("C", 3.0, 3.0)
            .with_failure("D", "OVER_QUERY_LIMIT");
        let geocoder = Geocoder::new(&gw);
        let records = vec![
            record("a", Some("〒100-0001 A")),
            record("b", Some("B")),
            record("c", Some("C")),
            record("d", Some("D")),
            record("e", None),
        ];

        let Conversion { records, stats } = geocode_records(&geocoder, records, &no_delay());

        let names: Vec<_> = records.iter().filter_map(|r| r.record.get("Name")).collect();
        assert_eq!(vec!["a", "c"], names);
        assert_eq!(
            ConversionStats {
                total: 5,
                resolved: 2,
                not_found: 1,
                skipped: 1,
                failed: 1,
            },
            stats
        );
        // The empty address is never sent
        assert_eq!(4, gw.requests.borrow().len());
    }

    #[test]
    fn missing_address_column() {
        let gw = MockGateway::default();
        let geocoder = Geocoder::new(&gw);
        let records = vec![AddressRecord::new(vec![Field::new("Name", Some("x"))])];

        let Conversion { records, stats } = geocode_records(&geocoder, records, &no_delay());

        assert!(records.is_empty());
        assert_eq!(1, stats.skipped);
        assert!(gw.requests.borrow().is_empty());
    }

    #[test]
    fn custom_address_column() {
        let gw = MockGateway::default().with_position("X", 10.0, 20.0);
        let geocoder = Geocoder::new(&gw);
        let records = vec![AddressRecord::new(vec![Field::new("住所", Some("X"))])];
        let settings = ConversionSettings {
            address_column: "住所".into(),
            ..no_delay()
        };

        let Conversion { records, .. } = geocode_records(&geocoder, records, &settings);

        assert_eq!(1, records.len());
    }

    #[test]
    fn pause_between_records() {
        let gw = MockGateway::default();
        let geocoder = Geocoder::new(&gw);
        let records = vec![record("a", None), record("b", None), record("c", None)];
        let settings = ConversionSettings {
            delay: Duration::from_millis(20),
            ..Default::default()
        };

        let started = Instant::now();
        geocode_records(&geocoder, records, &settings);

        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn empty_input() {
        let gw = MockGateway::default();
        let geocoder = Geocoder::new(&gw);

        let Conversion { records, stats } = geocode_records(&geocoder, vec![], &no_delay());

        assert!(records.is_empty());
        assert_eq!(ConversionStats::default(), stats);
    }
}
