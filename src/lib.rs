//! Univariate linear regression fitted by gradient descent.
//!
//! The crate exposes a mean-squared-error cost, two optimizers (batch and
//! stochastic gradient descent) driven by a common training loop, and a
//! predictor. Around them sit a CSV data source, a seeded train/test split and a
//! plotting sink used by the `rlinreg` binary.

#[macro_use]
extern crate serde_derive;

mod batch;
mod cost;
mod data;
mod error;
mod math;
mod matrix;
mod optimizer;
mod pipeline;
mod plot;
mod predict;
mod sgd;
mod strategy;

pub use crate::batch::*;
pub use crate::cost::*;
pub use crate::data::*;
pub use crate::error::*;
pub use crate::math::*;
pub use crate::matrix::*;
pub use crate::optimizer::*;
pub use crate::pipeline::*;
pub use crate::plot::*;
pub use crate::predict::*;
pub use crate::sgd::*;
pub use crate::strategy::*;

pub static DEFAULT_LEARNING_RATE: f64 = 0.01;
pub static DEFAULT_MAX_ITERATIONS: usize = 1000;
pub static DEFAULT_TOLERANCE: f64 = 0.0001;
pub static DEFAULT_SGD_ITERATIONS: usize = 1000;
pub static DEFAULT_TEST_FRACTION: f64 = 0.2;
pub static DEFAULT_SEED: u64 = 42;
pub static DEFAULT_FEATURE_COLUMN: &str = "MedInc";
pub static DEFAULT_TARGET_COLUMN: &str = "MedHouseVal";
