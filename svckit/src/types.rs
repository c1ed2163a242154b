use scylla::{DeserializeRow, SerializeRow};
use serde::{Deserialize, Serialize};

/// Replica acknowledgments required before a statement succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyLevel {
    Any,
    One,
    Two,
    Three,
    Quorum,
    #[default]
    All,
    LocalQuorum,
    EachQuorum,
    LocalOne,
}

impl From<ConsistencyLevel> for scylla::statement::Consistency {
    fn from(level: ConsistencyLevel) -> Self {
        use scylla::statement::Consistency;

        match level {
            ConsistencyLevel::Any => Consistency::Any,
            ConsistencyLevel::One => Consistency::One,
            ConsistencyLevel::Two => Consistency::Two,
            ConsistencyLevel::Three => Consistency::Three,
            ConsistencyLevel::Quorum => Consistency::Quorum,
            ConsistencyLevel::All => Consistency::All,
            ConsistencyLevel::LocalQuorum => Consistency::LocalQuorum,
            ConsistencyLevel::EachQuorum => Consistency::EachQuorum,
            ConsistencyLevel::LocalOne => Consistency::LocalOne,
        }
    }
}

/// One row of the `mutant_data` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, DeserializeRow, SerializeRow)]
pub struct MutantRecord {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub picture_location: String,
}

impl MutantRecord {
    pub const COLUMNS: [&'static str; 4] =
        ["first_name", "last_name", "address", "picture_location"];

    /// Columns the delete statement matches on.
    pub const KEY_COLUMNS: [&'static str; 2] = ["first_name", "last_name"];
}

impl Default for MutantRecord {
    fn default() -> Self {
        Self {
            first_name: "Mike".to_string(),
            last_name: "Tyson".to_string(),
            address: "1515 Main St".to_string(),
            picture_location: "http://www.facebook.com/mtyson".to_string(),
        }
    }
}

impl std::fmt::Display for MutantRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}, {}, {}",
            self.first_name, self.last_name, self.address, self.picture_location
        )
    }
}

/// A key written with an expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyValueEntry {
    pub key: String,
    pub value: String,
    pub ttl_secs: u64,
}

impl Default for KeyValueEntry {
    fn default() -> Self {
        Self {
            key: "key".to_string(),
            value: "value111".to_string(),
            ttl_secs: 500,
        }
    }
}

impl KeyValueEntry {
    pub fn ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ttl_secs)
    }
}
