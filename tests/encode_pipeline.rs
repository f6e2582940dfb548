use pretty_assertions::assert_eq;
use readmit_encode::{encode, Codebook, EncounterInput};
use readmit_schema::FeatureSchema;
use tests::{reference_input, reference_schema_names};

#[test]
fn reference_encounter_maps_to_the_documented_row() {
    let schema = FeatureSchema::new(reference_schema_names()).unwrap();
    let row = encode(&reference_input(), &schema, &Codebook::standard()).unwrap();
    assert_eq!(row.values(), vec![5.0, 10.0, 40.0, 3.0, 0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn column_order_is_dictated_by_the_schema_alone() {
    let mut names = reference_schema_names();
    names.reverse();
    let schema = FeatureSchema::new(names).unwrap();
    let row = encode(&reference_input(), &schema, &Codebook::standard()).unwrap();
    assert_eq!(row.values(), vec![1.0, 0.0, 1.0, 0.0, 3.0, 40.0, 10.0, 5.0]);
}

#[test]
fn training_only_columns_default_to_zero() {
    // A production schema carries columns the form never collects.
    let mut names = reference_schema_names();
    names.insert(3, "number_inpatient".to_string());
    names.push("number_emergency".to_string());
    let schema = FeatureSchema::new(names).unwrap();

    let row = encode(&reference_input(), &schema, &Codebook::standard()).unwrap();
    assert_eq!(
        row.values(),
        vec![5.0, 10.0, 40.0, 0.0, 3.0, 0.0, 1.0, 0.0, 1.0, 0.0]
    );
}

#[test]
fn selecting_a_bracket_the_schema_lacks_keeps_the_block_zero() {
    let schema = FeatureSchema::new(reference_schema_names()).unwrap();
    let input = EncounterInput {
        age_bracket: "[80-90)".to_string(),
        ..reference_input()
    };
    let row = encode(&input, &schema, &Codebook::standard()).unwrap();
    // Identical to the reference row except the one-hot column is 0.
    assert_eq!(row.values(), vec![5.0, 10.0, 40.0, 3.0, 0.0, 1.0, 0.0, 0.0]);
}
