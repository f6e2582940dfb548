//! The feature reconciler: sparse form answers to a dense,
//! schema-ordered numeric row.

use std::collections::HashMap;

use log::warn;
use readmit_schema::{EncodedRow, FeatureSchema, SchemaMismatch};
use thiserror::Error;

use crate::codebook::{CategoryMap, Codebook};
use crate::input::EncounterInput;

/// Per-request encoding failures. None of these are fatal to the
/// process; the next request proceeds independently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A categorical value fell outside its declared domain.
    #[error("unknown category '{value}' for field '{field}'")]
    UnknownCategory { field: &'static str, value: String },
    /// The projected row did not line up with the schema.
    #[error(transparent)]
    SchemaMismatch(#[from] SchemaMismatch),
}

fn coded(map: &CategoryMap, value: &str) -> Result<f64, EncodeError> {
    map.code(value).ok_or_else(|| EncodeError::UnknownCategory {
        field: map.feature(),
        value: value.to_string(),
    })
}

/// Encode one encounter against `schema`.
///
/// Stages the directly-measured numerics, the category codes, and the
/// selected age bracket's one-hot column under their feature names;
/// fills every remaining schema column with zero; then projects the
/// staged values in schema order. Staged names the schema does not know
/// are dropped during projection (and logged), never written to the row,
/// so a stray name cannot shift column alignment.
///
/// Categorical values outside their declared domains are rejected with
/// [`EncodeError::UnknownCategory`] rather than trusted. A selected age
/// bracket whose column is missing from the schema is not an error: its
/// one-hot block simply stays all zero.
pub fn encode(
    input: &EncounterInput,
    schema: &FeatureSchema,
    codebook: &Codebook,
) -> Result<EncodedRow, EncodeError> {
    let mut staged: HashMap<String, f64> = HashMap::with_capacity(schema.len());

    // Directly-measured numerics keep their raw values under their exact
    // feature names. Widget bounds are taken as given; no clamping here.
    staged.insert(
        "time_in_hospital".to_string(),
        f64::from(input.time_in_hospital),
    );
    staged.insert(
        "num_medications".to_string(),
        f64::from(input.num_medications),
    );
    staged.insert(
        "num_lab_procedures".to_string(),
        f64::from(input.num_lab_procedures),
    );

    // Finite-domain categoricals go through their code tables.
    staged.insert(
        codebook.a1c().feature().to_string(),
        coded(codebook.a1c(), &input.a1c_result)?,
    );
    staged.insert(
        codebook.glucose().feature().to_string(),
        coded(codebook.glucose(), &input.max_glu_serum)?,
    );
    staged.insert(
        codebook.diabetes_med().feature().to_string(),
        coded(codebook.diabetes_med(), &input.diabetes_med)?,
    );
    staged.insert(
        codebook.med_change().feature().to_string(),
        coded(codebook.med_change(), &input.med_change)?,
    );

    // The selected age bracket stages its one-hot column; the rest of
    // the group is left unset. Whether the schema actually carries the
    // column is settled during projection.
    let age_column = codebook
        .age()
        .column_for(&input.age_bracket)
        .ok_or_else(|| EncodeError::UnknownCategory {
            field: "age",
            value: input.age_bracket.clone(),
        })?;
    staged.insert(age_column, 1.0);

    // Reconciliation: every schema column not staged so far becomes 0.
    for name in schema.names() {
        staged.entry(name.clone()).or_insert(0.0);
    }

    // Projection in schema order. Staged names the schema does not know
    // remain in the map and are reported, not written.
    let mut values = Vec::with_capacity(schema.len());
    for name in schema.names() {
        if let Some(value) = staged.remove(name.as_str()) {
            values.push(value);
        }
    }
    if !staged.is_empty() {
        let mut dropped: Vec<&str> = staged.keys().map(String::as_str).collect();
        dropped.sort_unstable();
        warn!("dropping staged features absent from the schema: {dropped:?}");
    }

    if values.len() != schema.len() {
        return Err(SchemaMismatch {
            expected: schema.len(),
            actual: values.len(),
        }
        .into());
    }
    Ok(EncodedRow::new(values))
}
