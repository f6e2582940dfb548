//! Library surface of the readmission predictor.
//!
//! [`Predictor`] ties the loaded artifacts together: it owns the
//! feature schema, the category codebook, and a boxed [`Scorer`], and
//! turns one [`EncounterInput`] into an [`Assessment`]. Binaries build
//! one at startup and pass it by reference; nothing here is global.

use readmit_encode::{encode, Codebook, EncodeError, EncounterInput};
use readmit_model::{classify, ModelBundle, RiskTier, Scorer};
use readmit_schema::FeatureSchema;
use serde::Serialize;

/// Outcome of assessing one encounter.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    /// Predicted probability of readmission within 30 days.
    pub probability: f64,
    /// Advisory band the probability falls in.
    pub tier: RiskTier,
}

impl Assessment {
    /// One-sentence advisory matching the tier.
    pub fn advice(&self) -> &'static str {
        self.tier.advice()
    }
}

/// A loaded model with everything needed to assess encounters.
pub struct Predictor {
    model_name: String,
    schema: FeatureSchema,
    codebook: Codebook,
    scorer: Box<dyn Scorer>,
}

impl Predictor {
    /// Assemble a predictor from parts.
    ///
    /// The scorer's width should equal the schema width;
    /// [`Predictor::from_bundle`] guarantees that for artifacts loaded
    /// from disk, and [`Predictor::assess`] surfaces any disagreement
    /// as an error rather than scoring a misaligned row.
    pub fn new(model_name: String, schema: FeatureSchema, scorer: Box<dyn Scorer>) -> Self {
        Self {
            model_name,
            schema,
            codebook: Codebook::standard(),
            scorer,
        }
    }

    pub fn from_bundle(bundle: ModelBundle) -> Self {
        let (model_name, schema, model) = bundle.into_parts();
        Self::new(model_name, schema, Box::new(model))
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Assess one encounter: encode it against the schema, score the
    /// row, and stratify the probability.
    pub fn assess(&self, input: &EncounterInput) -> Result<Assessment, EncodeError> {
        let row = encode(input, &self.schema, &self.codebook)?;
        let probability = self.scorer.predict_probability(&row)?;
        Ok(Assessment {
            probability,
            tier: classify(probability),
        })
    }
}
