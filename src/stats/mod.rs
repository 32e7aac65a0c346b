//! Stats module - derived indicators

mod calculator;

pub use calculator::{IndicatorCalculator, ELASTICITY_BASE, ELASTICITY_SPAN};
