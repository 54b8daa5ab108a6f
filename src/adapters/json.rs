use std::io;

use anyhow::Result;
use geoscout_entities::record::{EnrichedRecord, Field};
use serde::ser::{Serialize, SerializeMap, Serializer};

const LAT: &str = "lat";
const LNG: &str = "lng";

/// All input columns in their original order followed by `lat` and `lng`.
struct JsonRecord<'a>(&'a EnrichedRecord);

impl Serialize for JsonRecord<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let EnrichedRecord { record, pos } = self.0;
        let mut map = serializer.serialize_map(None)?;
        for Field { name, value } in &record.fields {
            if name == LAT || name == LNG {
                continue;
            }
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(LAT, &pos.map(|pos| pos.lat()))?;
        map.serialize_entry(LNG, &pos.map(|pos| pos.lng()))?;
        map.end()
    }
}

/// Writes the records as a JSON array.
///
/// Non-ASCII characters are written as is.
pub fn write_records<W: io::Write>(writer: W, records: &[EnrichedRecord]) -> Result<()> {
    let records: Vec<_> = records.iter().map(JsonRecord).collect();
    serde_json::to_writer(writer, &records)?;
    Ok(())
}
