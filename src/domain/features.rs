//! Feature alignment onto the trained column schema.
//!
//! The classifier was trained on a fixed, ordered set of columns mixing raw
//! numeric fields and one-hot indicators. Every observation is reshaped to
//! exactly that set before scaling.

use std::collections::HashMap;

use super::observation::ClinicalObservation;

/// Ordered column names the classifier was trained against.
///
/// Immutable once built. Column names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl ExpectedSchema {
    /// Build a schema from an ordered list of column names.
    ///
    /// # Errors
    /// Returns an error if the list is empty or contains a duplicate name.
    pub fn new(columns: Vec<String>) -> Result<Self, String> {
        if columns.is_empty() {
            return Err("schema contains no columns".to_string());
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(format!("duplicate column {name:?}"));
            }
        }

        Ok(Self { columns, index })
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column, if the schema has it.
    #[must_use]
    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }
}

/// A single feature row whose columns are exactly the schema, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedFeatureRow {
    values: Vec<f64>,
}

impl AlignedFeatureRow {
    /// Values in schema order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named column.
    #[must_use]
    pub fn get(&self, schema: &ExpectedSchema, column: &str) -> Option<f64> {
        schema.position(column).map(|i| self.values[i])
    }
}

/// Map an observation onto the schema.
///
/// Numeric fields are copied verbatim. Each categorical field contributes a
/// single `"<Field>_<Category>"` indicator set to 1. Schema columns not
/// produced by the observation are 0. Produced columns the schema does not
/// know are dropped without error.
#[must_use]
pub fn align_features(observation: &ClinicalObservation, schema: &ExpectedSchema) -> AlignedFeatureRow {
    let mut values = vec![0.0; schema.len()];

    for (column, value) in observation.numeric_entries() {
        match schema.position(column) {
            Some(i) => values[i] = value,
            None => tracing::debug!(field = column, "numeric field not in schema, dropped"),
        }
    }

    for (field, column) in observation.indicator_columns() {
        match schema.position(&column) {
            Some(i) => values[i] = 1.0,
            None => tracing::debug!(field, "category indicator not in schema, dropped"),
        }
    }

    AlignedFeatureRow { values }
}
