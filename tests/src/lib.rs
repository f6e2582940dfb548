//! Shared fixtures for the integration tests.
//!
//! The reference artifact here is the worked example the crates are
//! documented around: an eight-column schema where every column is fed
//! by the encounter form.

use readmit_encode::EncounterInput;

/// Column names of the reference schema, in scoring order.
pub fn reference_schema_names() -> Vec<String> {
    [
        "time_in_hospital",
        "num_medications",
        "num_lab_procedures",
        "A1Cresult",
        "max_glu_serum",
        "diabetesMed",
        "change",
        "age_[50-60)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// The reference encounter, which encodes against
/// [`reference_schema_names`] as `[5, 10, 40, 3, 0, 1, 0, 1]`.
pub fn reference_input() -> EncounterInput {
    EncounterInput {
        age_bracket: "[50-60)".to_string(),
        time_in_hospital: 5,
        num_medications: 10,
        num_lab_procedures: 40,
        a1c_result: ">8".to_string(),
        max_glu_serum: "None".to_string(),
        diabetes_med: "Yes".to_string(),
        med_change: "No".to_string(),
    }
}

/// A bundle document over the reference schema with the given model.
pub fn bundle_json(weights: &[f64], intercept: f64) -> String {
    serde_json::json!({
        "schema_version": 1,
        "model_name": "readmit-logreg-demo",
        "feature_names": reference_schema_names(),
        "model": { "weights": weights, "intercept": intercept }
    })
    .to_string()
}
