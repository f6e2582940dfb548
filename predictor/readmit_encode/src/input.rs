//! Raw form input for one encounter.

use serde::{Deserialize, Serialize};

use crate::codebook::{A1C_LEVELS, AGE_BRACKETS, GLUCOSE_LEVELS, YES_NO};

/// One encounter's worth of form answers, prior to encoding.
///
/// Numeric fields carry the bounds the form widgets enforce; the encoder
/// takes them as given and performs no clamping of its own. Categorical
/// fields are free-form strings here and validated against the codebook
/// during encoding.
///
/// Deserializes with per-field defaults, so a sparse JSON object (one
/// line of batch input, say) only needs the fields that differ from the
/// form's initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterInput {
    /// Age bracket label, one of [`AGE_BRACKETS`].
    pub age_bracket: String,
    /// Days in hospital, 1 to 20.
    pub time_in_hospital: u32,
    /// Number of medications, 1 to 50.
    pub num_medications: u32,
    /// Number of lab procedures, 1 to 100.
    pub num_lab_procedures: u32,
    /// A1C result, one of [`A1C_LEVELS`].
    pub a1c_result: String,
    /// Max glucose serum, one of [`GLUCOSE_LEVELS`].
    pub max_glu_serum: String,
    /// Whether any diabetes medication is prescribed, `Yes` or `No`.
    pub diabetes_med: String,
    /// Whether the medication regimen changed, `Yes` or `No`.
    pub med_change: String,
}

impl Default for EncounterInput {
    /// The intake form's initial widget state.
    fn default() -> Self {
        Self {
            age_bracket: AGE_BRACKETS[0].to_string(),
            time_in_hospital: 5,
            num_medications: 10,
            num_lab_procedures: 40,
            a1c_result: A1C_LEVELS[0].to_string(),
            max_glu_serum: GLUCOSE_LEVELS[0].to_string(),
            diabetes_med: YES_NO[0].to_string(),
            med_change: YES_NO[0].to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_matches_the_form_initial_state() {
        let input = EncounterInput::default();
        assert_eq!(input.age_bracket, "[0-10)");
        assert_eq!(input.time_in_hospital, 5);
        assert_eq!(input.num_medications, 10);
        assert_eq!(input.num_lab_procedures, 40);
        assert_eq!(input.a1c_result, "None");
        assert_eq!(input.max_glu_serum, "None");
        assert_eq!(input.diabetes_med, "Yes");
        assert_eq!(input.med_change, "Yes");
    }

    #[test]
    fn sparse_json_falls_back_to_defaults() {
        let input: EncounterInput =
            serde_json::from_str(r#"{"time_in_hospital": 12, "a1c_result": ">7"}"#).unwrap();
        assert_eq!(
            input,
            EncounterInput {
                time_in_hospital: 12,
                a1c_result: ">7".to_string(),
                ..EncounterInput::default()
            }
        );
    }

    #[test]
    fn empty_json_object_is_the_default_input() {
        let input: EncounterInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, EncounterInput::default());
    }
}
