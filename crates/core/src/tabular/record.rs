//! A single row of a delimited table, keyed by header name.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::utils::number_utils::coerce_number;

/// An ordered field-name to raw-text mapping for one data row.
///
/// Values are kept exactly as read; coercion happens in the accessors so a bad
/// cell only affects the caller that reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Zips a header row with one data row.
    ///
    /// Missing trailing cells become empty strings and surplus cells are
    /// dropped, so every record of a table has exactly the header's fields.
    pub fn from_row(headers: &[String], mut values: Vec<String>) -> Self {
        values.resize(headers.len(), String::new());
        Self {
            fields: headers.iter().cloned().zip(values).collect(),
        }
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Raw value of `name`, or `None` when the header has no such column.
    /// With duplicate header names the first column wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Raw value of `name`, or `fallback` when the column is unknown.
    pub fn text_or<'a>(&'a self, name: &str, fallback: &'a str) -> &'a str {
        self.get(name).unwrap_or(fallback)
    }

    /// Numeric value of `name`; `None` when unknown, empty or malformed.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(coerce_number)
    }

    pub fn number_or(&self, name: &str, fallback: f64) -> f64 {
        self.number(name).unwrap_or(fallback)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(field, _)| field.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}
