//! The decoded record and its JSON shape.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The query component of the request url, per the configured mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// The literal query substring, undecoded.
    Raw(String),
    /// Form-decoded pairs in first-insertion order, last value winning.
    Pairs(Vec<(String, String)>),
}

impl Serialize for Query {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Query::Raw(query) => serializer.serialize_str(query),
            // A plain map would lose insertion order, so the pair list is
            // written out as a JSON object by hand.
            Query::Pairs(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, value) in pairs {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// One fully decoded access-log line.
///
/// `host` is present exactly when the raw field was not the dash
/// placeholder; `referer` and `user_agent` exactly when the combined layout
/// was selected. Absent options are omitted from the serialized object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRecord {
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub ts: i64,
    pub method: String,
    pub path: String,
    pub query: Query,
    pub status: u64,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}
