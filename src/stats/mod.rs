//! Stats module - Axis derivation and non-inferiority summary

mod axis;
mod calculator;

pub use axis::{absolute_risk_range, difference_range, AxisError, AxisRange, AXIS_PADDING};
pub use calculator::{NonInferiorityCalculator, NonInferiorityReport, Verdict, CONFIDENCE_LEVEL};
