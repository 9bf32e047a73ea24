use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the field the database uses to report a record's distance to the query.
pub const DISTANCE_FIELD: &str = "@distance";

/// A single field value as returned by the query capability.
///
/// Mirrors the JSON shapes a record can carry: scalars, arrays (e.g. embeddings or tags)
/// and nested objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    String(String),
    List(Vec<DataValue>),
    Object(BTreeMap<String, DataValue>),
}

impl DataValue {
    /// Returns the string value if this is a String variant.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value if this is an Int64 variant.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DataValue::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float for any numeric variant.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float64(f) => Some(*f),
            DataValue::Int64(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the boolean value if this is a Bool variant.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the elements if this is a List variant.
    pub fn as_list(&self) -> Option<&[DataValue]> {
        match self {
            DataValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }
}

// --- Conversions ---

impl From<String> for DataValue {
    fn from(v: String) -> Self {
        DataValue::String(v)
    }
}

impl From<&str> for DataValue {
    fn from(v: &str) -> Self {
        DataValue::String(v.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(v: i64) -> Self {
        DataValue::Int64(v)
    }
}

impl From<i32> for DataValue {
    fn from(v: i32) -> Self {
        DataValue::Int64(v as i64)
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Float64(v)
    }
}

impl From<f32> for DataValue {
    fn from(v: f32) -> Self {
        DataValue::Float64(v as f64)
    }
}

impl From<bool> for DataValue {
    fn from(v: bool) -> Self {
        DataValue::Bool(v)
    }
}

impl From<Vec<f32>> for DataValue {
    fn from(v: Vec<f32>) -> Self {
        DataValue::List(v.into_iter().map(DataValue::from).collect())
    }
}

impl From<Vec<String>> for DataValue {
    fn from(v: Vec<String>) -> Self {
        DataValue::List(v.into_iter().map(DataValue::String).collect())
    }
}

/// A raw record as returned by the query capability: field name to value.
pub type Record = HashMap<String, DataValue>;

/// Identity of a candidate, copied from the record's primary-key field.
///
/// Integer and string keys are distinct identities: `1` and `"1"` never merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateId {
    Int(i64),
    Text(String),
}

impl CandidateId {
    /// Extract an identity from a primary-key value.
    ///
    /// Only strings and integers are valid keys.
    pub fn from_value(value: &DataValue) -> Option<Self> {
        match value {
            DataValue::Int64(i) => Some(CandidateId::Int(*i)),
            DataValue::String(s) => Some(CandidateId::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateId::Int(i) => write!(f, "{i}"),
            CandidateId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CandidateId {
    fn from(v: i64) -> Self {
        CandidateId::Int(v)
    }
}

impl From<i32> for CandidateId {
    fn from(v: i32) -> Self {
        CandidateId::Int(v as i64)
    }
}

impl From<&str> for CandidateId {
    fn from(v: &str) -> Self {
        CandidateId::Text(v.to_string())
    }
}

impl From<String> for CandidateId {
    fn from(v: String) -> Self {
        CandidateId::Text(v)
    }
}

/// A single search hit.
///
/// The record's own fields are kept as returned (the primary-key field included); `id` and
/// `distance` are the reserved annotations fusion works on. Serializes to the flat shape
/// `{"@id": .., "@distance": .., <fields>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Identity of the record.
    #[serde(rename = "@id")]
    pub id: CandidateId,

    /// Distance to the query; absent for keyword-only matches.
    #[serde(rename = "@distance", default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Record payload.
    #[serde(flatten)]
    pub fields: Record,
}

impl Candidate {
    /// Create a candidate with no distance and no fields.
    pub fn new(id: impl Into<CandidateId>) -> Self {
        Self {
            id: id.into(),
            distance: None,
            fields: HashMap::new(),
        }
    }

    /// Set the distance.
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Add a field to the payload.
    pub fn add_field(mut self, name: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a reference to a field's value.
    pub fn get(&self, name: &str) -> Option<&DataValue> {
        self.fields.get(name)
    }

    /// Check if the candidate has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}
