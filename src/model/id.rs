use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier assigned by the store.
///
/// Stores disagree on whether ids are numbers (`1`) or strings (`"a1b2"`), so both are accepted
/// and written back in the same form they were read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(u64),
    Text(String),
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Numeric(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}
