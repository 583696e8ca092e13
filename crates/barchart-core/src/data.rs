// File: crates/barchart-core/src/data.rs
// Summary: Data model (DataPoint, Dataset) and ingestion normalization.
// Notes:
// - Normalization happens exactly once here. Geometry code downstream only
//   ever sees keyed `DataPoint`s; it never branches on the input shape.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Stable bar identity, matched across redraws.
pub type Key = String;

/// One labeled value. `key` is the identity used for enter/exit/retain
/// matching; `description` is opaque text for tooltips and labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub key: Key,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DataPoint {
    pub fn new(key: impl Into<Key>, value: f64) -> Self {
        Self { key: key.into(), value, description: None }
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// Ordered sequence of data points. The order is the single source of truth
/// for left-to-right bar placement on the next redraw.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub points: Vec<DataPoint>,
}

impl Dataset {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    /// Normalize a bare-number slice by auto-assigning ordinal keys
    /// ("0", "1", ...) at ingestion time.
    ///
    /// Caveat, kept from the original behavior: ordinal identity means that
    /// inserting or removing a middle value shifts the key of every later
    /// value, so unrelated bars will exit and re-enter on the next redraw.
    pub fn from_values(values: &[f64]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| DataPoint::new(i.to_string(), v))
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize { self.points.len() }

    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.points.iter().map(|p| &p.key)
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn get(&self, key: &str) -> Option<&DataPoint> {
        self.points.iter().find(|p| p.key == key)
    }

    /// Reject datasets where two points share a key. Keys must be unique
    /// within one dataset; the reconciler assumes it.
    pub fn validate_keys(&self) -> Result<(), ChartError> {
        let mut seen = std::collections::HashSet::with_capacity(self.points.len());
        for p in &self.points {
            if !seen.insert(p.key.as_str()) {
                return Err(ChartError::DuplicateKey(p.key.clone()));
            }
        }
        Ok(())
    }
}

impl From<Vec<DataPoint>> for Dataset {
    fn from(points: Vec<DataPoint>) -> Self {
        Self::new(points)
    }
}
