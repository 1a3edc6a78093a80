//! Captured form values at submission time

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One captured value: text/select contents or a checkbox state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    Text(String),
    Flag(bool),
}

/// Field name -> value, plus whether the whole form validated
///
/// Serializes as a flat JSON object of the values only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    values: BTreeMap<String, SnapshotValue>,

    #[serde(skip)]
    valid: bool,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_text(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(field.into(), SnapshotValue::Text(value.into()));
    }

    pub fn insert_flag(&mut self, field: impl Into<String>, checked: bool) {
        self.values.insert(field.into(), SnapshotValue::Flag(checked));
    }

    pub(crate) fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    /// Overall validity at capture time
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn get(&self, field: &str) -> Option<&SnapshotValue> {
        self.values.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(SnapshotValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn flag(&self, field: &str) -> Option<bool> {
        match self.values.get(field) {
            Some(SnapshotValue::Flag(checked)) => Some(*checked),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SnapshotValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON body for the registration endpoint
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
