//! Feature reconciliation for the readmission risk predictor.
//!
//! The intake form collects eight human-readable answers; the trained
//! scorer expects a much wider, fixed-order numeric row. [`encode`] maps
//! the former onto the latter: direct numerics keep their values,
//! categorical answers go through the [`Codebook`]'s lookup tables, the
//! age bracket becomes a one-hot column, and every schema column the
//! input never touched is filled with zero.

pub mod codebook;
pub mod input;
pub mod reconcile;

pub use codebook::{
    CategoryMap, Codebook, OneHotGroup, A1C_LEVELS, AGE_BRACKETS, GLUCOSE_LEVELS, YES_NO,
};
pub use input::EncounterInput;
pub use reconcile::{encode, EncodeError};
