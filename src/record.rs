//! Input records: one badge's worth of named field values.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// A raw cell value as it arrives from JSON (or any other serde source).
/// Spreadsheet exports routinely put numbers and booleans where text is expected,
/// so those are rendered with their display form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// A named set of optional field values, e.g. `Full Name`, `Position`, `Company`.
///
/// Values are stored exactly as given; whether a value counts as present is decided
/// by [`Record::text`] at layout time.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<CellValue>>")]
pub struct Record {
    fields: BTreeMap<String, Option<String>>,
}

impl From<BTreeMap<String, Option<CellValue>>> for Record {
    fn from(raw: BTreeMap<String, Option<CellValue>>) -> Self {
        Record {
            fields: raw
                .into_iter()
                .map(|(name, value)| (name, value.map(|v| v.to_string())))
                .collect(),
        }
    }
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    /// Set a field's value, consuming and returning `self`
    pub fn with<K: ToString, V: ToString>(mut self, field: K, value: V) -> Record {
        self.fields.insert(field.to_string(), Some(value.to_string()));
        self
    }

    /// Set a field's value, modifying `self`
    pub fn set<K: ToString>(&mut self, field: K, value: Option<String>) -> &mut Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    /// The raw value of a field, exactly as it was given
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_deref())
    }

    /// The trimmed text of a field, or [None] if the field is absent: missing, blank,
    /// or equal (ignoring case) to one of the `null_markers`
    pub fn text<S: AsRef<str>>(&self, field: &str, null_markers: &[S]) -> Option<&str> {
        let value = self.get(field)?.trim();
        if value.is_empty()
            || null_markers
                .iter()
                .any(|marker| value.eq_ignore_ascii_case(marker.as_ref()))
        {
            return None;
        }
        Some(value)
    }
}

/// Parse a JSON array of objects into records
pub fn records_from_json(json: &str) -> Result<Vec<Record>, crate::GridError> {
    Ok(serde_json::from_str(json)?)
}
