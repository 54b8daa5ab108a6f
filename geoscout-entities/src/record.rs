use crate::geo::Coordinate;

/// A named cell of an input row.
///
/// Empty cells carry no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            value: value.map(Into::into),
        }
    }
}

/// One input row with all of its columns in their original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressRecord {
    pub fields: Vec<Field>,
}

impl AddressRecord {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// The value of the first column with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.value.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: AddressRecord,
    pub pos: Option<Coordinate>,
}

impl EnrichedRecord {
    pub fn is_resolved(&self) -> bool {
        self.pos.is_some()
    }
}
