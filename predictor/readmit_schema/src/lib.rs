//! Feature schema types shared by the encoder and the scorer.
//!
//! A [`FeatureSchema`] is the fixed, ordered list of column names a
//! trained scorer expects as input; an [`EncodedRow`] is one dense row
//! aligned positionally to it. Keeping both here lets the encoder and
//! the scoring backend agree on row shape without depending on each
//! other.

use std::collections::HashSet;

use thiserror::Error;

/// Failures while constructing a [`FeatureSchema`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("feature name at position {0} is empty")]
    EmptyName(usize),
    #[error("duplicate feature name '{0}'")]
    DuplicateName(String),
}

/// A row of the wrong width was offered to a consumer expecting the
/// schema's width.
///
/// Raised by the encoder's final projection guard and by scorers when a
/// row does not line up with their weight vector.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("row has {actual} values but the schema expects {expected}")]
pub struct SchemaMismatch {
    pub expected: usize,
    pub actual: usize,
}

/// Ordered list of feature column names a scorer was trained against.
///
/// Order is significant: it must match the column order used when the
/// scorer was created. Construction rejects empty and duplicate names,
/// and the list cannot be mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(SchemaError::EmptyName(position));
            }
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateName(name.clone()));
            }
        }
        Ok(Self { names })
    }

    /// Column names in scoring order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `name` is one of the schema's columns.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Position of `name` in the scoring order, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// Dense feature vector aligned positionally to a [`FeatureSchema`].
///
/// Produced by the encoder, consumed by a scorer, and discarded; it
/// carries no name information of its own, so alignment is the encoder's
/// responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRow {
    values: Vec<f64>,
}

impl EncodedRow {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}
