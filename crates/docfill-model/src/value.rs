use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A scalar value carried by a dataset field.
///
/// The untagged layout lets a plain JSON dataset
/// (`[{"Name": "A", "Count": 10}, ...]`) decode directly into records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Absent / null value. Renders as an empty cell or cache point.
    Null,
    /// Boolean.
    Bool(bool),
    /// IEEE-754 double precision number.
    Number(f64),
    /// Plain string.
    Text(String),
}

impl Scalar {
    /// External text form of the value as written into cells and series
    /// caches; `None` for null (an empty cell / empty cache point).
    pub fn to_cell_text(&self) -> Option<String> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Number(n) => Some(n.to_string()),
            Scalar::Text(s) => Some(s.clone()),
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Null
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

/// One dataset record: a mapping from field name to scalar value.
///
/// The dataset itself is an ordered `Vec<Record>`; record order determines
/// worksheet row order and chart point order. A field absent from a record is
/// indistinguishable from an explicit null.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Scalar>,
}

const NULL: Scalar = Scalar::Null;

impl Record {
    /// Construct an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Scalar>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Look up a field; missing fields read as [`Scalar::Null`].
    pub fn get(&self, field: &str) -> &Scalar {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// External text form of a field (see [`Scalar::to_cell_text`]).
    pub fn cell_text(&self, field: &str) -> Option<String> {
        self.get(field).to_cell_text()
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
