//! Scoring abstraction and the logistic model that implements it.

use readmit_schema::{EncodedRow, SchemaMismatch};
use serde::{Deserialize, Serialize};

/// Anything that turns an encoded row into a readmission probability.
///
/// The predictor only ever talks to this trait, so tests can slot in a
/// scorer with a canned answer and exercise the plumbing around it.
/// `Send + Sync` so a loaded scorer can be shared across threads.
pub trait Scorer: Send + Sync {
    /// Positive-class probability in `[0, 1]` for one encoded row.
    ///
    /// Implementations must reject rows whose width differs from
    /// [`Scorer::width`] instead of silently truncating or padding.
    fn predict_probability(&self, row: &EncodedRow) -> Result<f64, SchemaMismatch>;

    /// Number of values a row must carry to be scoreable.
    fn width(&self) -> usize;
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Logistic regression over a dense feature row.
///
/// Weight order is positional: weight `i` multiplies row value `i`, so
/// a model is only meaningful next to the schema it was fitted against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    pub fn new(weights: Vec<f64>, intercept: f64) -> Self {
        Self { weights, intercept }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Scorer for LogisticModel {
    fn predict_probability(&self, row: &EncodedRow) -> Result<f64, SchemaMismatch> {
        if row.len() != self.weights.len() {
            return Err(SchemaMismatch {
                expected: self.weights.len(),
                actual: row.len(),
            });
        }
        let z = self
            .weights
            .iter()
            .zip(row.values())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        Ok(sigmoid(z))
    }

    fn width(&self) -> usize {
        self.weights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(values: &[f64]) -> EncodedRow {
        EncodedRow::new(values.to_vec())
    }

    #[test]
    fn probability_matches_hand_computed_logit() {
        let model = LogisticModel::new(vec![0.1, -0.2], 0.3);
        let p = model.predict_probability(&row(&[2.0, 1.0])).unwrap();
        // z = 0.1 * 2 - 0.2 * 1 + 0.3 = 0.3
        let expected = 1.0 / (1.0 + (-0.3f64).exp());
        assert!((p - expected).abs() < 1e-12, "p = {p}");
    }

    #[test]
    fn zero_weights_and_intercept_give_one_half() {
        let model = LogisticModel::new(vec![0.0; 4], 0.0);
        let p = model.predict_probability(&row(&[7.0, 1.0, 0.0, 3.5])).unwrap();
        assert_eq!(p, 0.5);
    }

    #[test]
    fn intercept_drives_the_extremes() {
        let confident_yes = LogisticModel::new(vec![0.0], 20.0);
        let confident_no = LogisticModel::new(vec![0.0], -20.0);
        let input = row(&[1.0]);
        assert!(confident_yes.predict_probability(&input).unwrap() > 0.999_999);
        assert!(confident_no.predict_probability(&input).unwrap() < 0.000_001);
    }

    #[test]
    fn probability_stays_in_the_unit_interval() {
        let model = LogisticModel::new(vec![5.0, -3.0, 0.7], 1.2);
        for values in [[0.0, 0.0, 0.0], [100.0, 0.0, 0.0], [0.0, 100.0, 0.0]] {
            let p = model.predict_probability(&row(&values)).unwrap();
            assert!((0.0..=1.0).contains(&p), "p = {p} for {values:?}");
        }
    }

    #[test]
    fn wrong_width_row_is_rejected() {
        let model = LogisticModel::new(vec![0.5, 0.5, 0.5], 0.0);
        let err = model.predict_probability(&row(&[1.0, 2.0])).unwrap_err();
        assert_eq!(err, SchemaMismatch { expected: 3, actual: 2 });
        assert_eq!(model.width(), 3);
    }
}
