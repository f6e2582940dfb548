//! Model side of the readmission predictor: the scorer abstraction,
//! the logistic regression behind it, risk tiers over probabilities,
//! and the JSON bundle the trained artifacts travel in.

pub mod bundle;
pub mod scorer;
pub mod tier;

pub use bundle::{BundleError, ModelBundle, BUNDLE_SCHEMA_VERSION, DEFAULT_BUNDLE_FILE};
pub use scorer::{LogisticModel, Scorer};
pub use tier::{classify, RiskTier, HIGH_RISK_FLOOR, LOW_RISK_CEILING};
