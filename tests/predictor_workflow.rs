use std::fs;

use pretty_assertions::assert_eq;
use readmit::Predictor;
use readmit_encode::EncounterInput;
use readmit_model::{BundleError, ModelBundle, RiskTier};
use tests::{bundle_json, reference_input};

fn predictor_with(weights: &[f64], intercept: f64, dir: &tempfile::TempDir) -> Predictor {
    let path = dir.path().join("bundle.json");
    fs::write(&path, bundle_json(weights, intercept)).expect("write bundle");
    Predictor::from_bundle(ModelBundle::load(&path).expect("load bundle"))
}

#[test]
fn assessment_round_trips_from_a_disk_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let predictor = predictor_with(&[0.0; 8], 0.0, &tmp);
    assert_eq!(predictor.model_name(), "readmit-logreg-demo");
    assert_eq!(predictor.schema().len(), 8);

    // Zero weights make the logit the intercept alone, so the
    // probability is exactly one half.
    let assessment = predictor.assess(&reference_input()).unwrap();
    assert_eq!(assessment.probability, 0.5);
    assert_eq!(assessment.tier, RiskTier::High);
}

#[test]
fn intercept_shifts_the_assessment_tier() {
    let tmp = tempfile::tempdir().unwrap();
    let cases = [
        (-4.0, RiskTier::Low),
        (-2.0, RiskTier::Moderate),
        (0.0, RiskTier::High),
    ];
    for (intercept, tier) in cases {
        let predictor = predictor_with(&[0.0; 8], intercept, &tmp);
        let assessment = predictor.assess(&reference_input()).unwrap();
        assert_eq!(assessment.tier, tier, "intercept {intercept}");
    }
}

#[test]
fn sparse_input_takes_the_form_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let weights = [0.05, 0.01, 0.005, 0.3, 0.2, 0.4, 0.1, 0.6];
    let predictor = predictor_with(&weights, -3.0, &tmp);

    // One field given, the rest defaulted by serde, exactly as a batch
    // line would arrive.
    let sparse: EncounterInput = serde_json::from_str(r#"{"age_bracket":"[50-60)"}"#).unwrap();
    let full = EncounterInput {
        age_bracket: "[50-60)".to_string(),
        ..EncounterInput::default()
    };

    let from_sparse = predictor.assess(&sparse).unwrap();
    let from_full = predictor.assess(&full).unwrap();
    assert_eq!(from_sparse.probability, from_full.probability);
}

#[test]
fn a_predictor_is_never_built_from_a_corrupt_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("bundle.json");
    let doc = bundle_json(&[0.0; 8], 0.0).replace("\"schema_version\":1", "\"schema_version\":9");
    fs::write(&path, doc).unwrap();

    let err = ModelBundle::load(&path).unwrap_err();
    assert!(matches!(err, BundleError::ArtifactCorrupt { .. }));
}
