//! Display-ready listing records.

use serde::Serialize;
use serde::Serializer;

/// Stable identity of a record within one fetched collection.
///
/// `Position` is the fallback used when the backend row carries no usable
/// identifier; it holds the row's index in the payload. It serializes as
/// `null` so it is never mistaken for a backend id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Int(i64),
    Text(String),
    Position(usize),
}

impl RecordId {
    /// Row key used for selection tracking and diffing.
    pub fn key(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Position(index) => index.to_string(),
        }
    }

    /// Where the id came from, for machine-readable output.
    pub fn source(&self) -> &'static str {
        match self {
            Self::Int(_) | Self::Text(_) => "backend",
            Self::Position(_) => "position",
        }
    }

    /// Text for the ID column. Positional ids have nothing to show.
    pub fn display(&self) -> String {
        match self {
            Self::Position(_) => String::new(),
            other => other.key(),
        }
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Position(_) => serializer.serialize_none(),
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

/// One listing, with every field defaulted so rendering never has to guess.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Finite and non-negative.
    pub price: f64,
    /// Absolute `http`/`https` URL, when the backend sent a usable one.
    pub image_url: Option<String>,
}

impl ListingRecord {
    /// A record with only its identity set.
    pub fn empty(id: RecordId) -> Self {
        Self {
            id,
            name: String::new(),
            category: String::new(),
            description: String::new(),
            price: 0.0,
            image_url: None,
        }
    }
}

/// Key for the row at `index`, falling back to the index when the row is
/// missing.
pub fn row_key(index: usize, record: Option<&ListingRecord>) -> String {
    record.map_or_else(|| index.to_string(), |r| r.id.key())
}
