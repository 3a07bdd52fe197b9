//! Raw tabular records as they come out of a `RecordSource`.
//!
//! A `Record` is one row: a mapping from column name to value. Local CSV rows
//! only ever carry strings; remote rows carry whatever JSON the records API
//! returns (strings, numbers, multi-select arrays, attachment objects).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod normalize;

pub use normalize::ImageSource;

/// The named tables the site reads from (and, for `Contacts`, writes to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Profile,
    Skills,
    Projects,
    Education,
    Stem,
    Contacts,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::Profile,
        Table::Skills,
        Table::Projects,
        Table::Education,
        Table::Stem,
        Table::Contacts,
    ];

    /// Wire name: CSV file stem and records API table name.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Profile => "profile",
            Table::Skills => "skills",
            Table::Projects => "projects",
            Table::Education => "education",
            Table::Stem => "STEM",
            Table::Contacts => "contacts",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[cfg(test)]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builds a record from string pairs. Mostly useful for CSV rows and tests.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Record(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }

    /// True when no field carries a non-empty value.
    pub fn is_blank(&self) -> bool {
        self.0.values().all(normalize::is_empty_value)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_names_match_backend() {
        assert_eq!(Table::Stem.name(), "STEM");
        assert_eq!(Table::Contacts.to_string(), "contacts");
    }

    #[test]
    fn test_table_names_are_unique() {
        let mut names: Vec<_> = Table::ALL.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Table::ALL.len());
    }

    #[test]
    fn test_blank_record() {
        let mut record = Record::from_pairs([("Name", " "), ("Notes", "")]);
        assert!(record.is_blank());
        record.insert("Tags", json!(["rust"]));
        assert!(!record.is_blank());
    }
}
