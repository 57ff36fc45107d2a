//! Axis Range Module
//! Derives padded horizontal display ranges from interval bounds.

use crate::data::RiskEstimate;
use serde::Serialize;
use thiserror::Error;

/// Padding added beyond the outermost interval bound.
pub const AXIS_PADDING: f64 = 1.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AxisError {
    #[error("No bounds to derive a range from")]
    NoBounds,
    #[error("Non-finite bound: {0}")]
    NonFinite(f64),
    #[error("Degenerate range: min {min} >= max {max}")]
    Degenerate { min: f64, max: f64 },
}

/// A validated display range with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Result<Self, AxisError> {
        for v in [min, max] {
            if !v.is_finite() {
                return Err(AxisError::NonFinite(v));
            }
        }
        if min >= max {
            return Err(AxisError::Degenerate { min, max });
        }
        Ok(Self { min, max })
    }

    /// Smallest lower bound minus `pad` to largest upper bound plus `pad`.
    pub fn padded(bounds: &[(f64, f64)], pad: f64) -> Result<Self, AxisError> {
        if bounds.is_empty() {
            return Err(AxisError::NoBounds);
        }
        let lo = bounds.iter().map(|b| b.0).fold(f64::INFINITY, f64::min);
        let hi = bounds
            .iter()
            .map(|b| b.1)
            .fold(f64::NEG_INFINITY, f64::max);
        // fold skips NaN, so check the inputs themselves
        if let Some(bad) = bounds
            .iter()
            .flat_map(|b| [b.0, b.1])
            .find(|v| !v.is_finite())
        {
            return Err(AxisError::NonFinite(bad));
        }
        Self::new(lo - pad, hi + pad)
    }

    /// Lower the minimum so the range reaches `value`.
    pub fn reach_down_to(self, value: f64) -> Result<Self, AxisError> {
        Self::new(self.min.min(value), self.max)
    }

    /// Raise the maximum so the range reaches `value`.
    pub fn reach_up_to(self, value: f64) -> Result<Self, AxisError> {
        Self::new(self.min, self.max.max(value))
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Range for the absolute-risk panel.
pub fn absolute_risk_range(
    a: &RiskEstimate,
    b: &RiskEstimate,
    pad: f64,
) -> Result<AxisRange, AxisError> {
    AxisRange::padded(&[a.bounds(), b.bounds()], pad)
}

/// Range for the difference panel: padded interval, always showing zero and
/// the margin plus padding.
pub fn difference_range(
    difference: &RiskEstimate,
    margin: f64,
    pad: f64,
) -> Result<AxisRange, AxisError> {
    if !margin.is_finite() {
        return Err(AxisError::NonFinite(margin));
    }
    AxisRange::padded(&[difference.bounds()], pad)?
        .reach_down_to(0.0)?
        .reach_up_to(margin + pad)
}
