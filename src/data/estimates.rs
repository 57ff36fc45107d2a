//! Study Estimates Module
//! Point estimates, confidence intervals and the built-in study constants.

use serde::{Deserialize, Serialize};

/// Default non-inferiority margin, in percentage points.
pub const DEFAULT_MARGIN: f64 = 3.0;

/// A point estimate with its 95% confidence interval (percentages).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskEstimate {
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
}

impl RiskEstimate {
    pub const fn new(estimate: f64, lower: f64, upper: f64) -> Self {
        Self {
            estimate,
            lower,
            upper,
        }
    }

    /// Length of the error bar left of the estimate.
    pub fn lower_error(&self) -> f64 {
        self.estimate - self.lower
    }

    /// Length of the error bar right of the estimate.
    pub fn upper_error(&self) -> f64 {
        self.upper - self.estimate
    }

    /// True when `lower <= estimate <= upper`.
    pub fn is_ordered(&self) -> bool {
        self.lower <= self.estimate && self.estimate <= self.upper
    }

    /// Mirror the interval about zero.
    pub fn negated(&self) -> Self {
        Self {
            estimate: -self.estimate,
            lower: -self.upper,
            upper: -self.lower,
        }
    }

    /// Interval bounds as a `(lower, upper)` pair.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }
}

/// One intervention arm of the study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arm {
    pub name: String,
    pub risk: RiskEstimate,
}

impl Arm {
    pub fn new(name: impl Into<String>, risk: RiskEstimate) -> Self {
        Self {
            name: name.into(),
            risk,
        }
    }

    /// Series label used in legends, e.g. "Suture (95% CI)".
    pub fn series_label(&self) -> String {
        format!("{} (95% CI)", self.name)
    }

    pub fn suture() -> Self {
        Self::new("Suture", RiskEstimate::new(1.644, 0.215, 3.0745))
    }

    pub fn adhesive() -> Self {
        Self::new("Adhesive", RiskEstimate::new(1.9737, 0.4101, 3.5373))
    }
}

/// Figure-level presentation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for FigureOptions {
    fn default() -> Self {
        // 7 x 3 inches at 150 DPI
        Self {
            title: "Non-inferiority analysis: Adhesive vs Suture".to_string(),
            width: 1050,
            height: 450,
        }
    }
}

/// Everything needed to draw the figure.
///
/// `difference` is treatment minus control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyInput {
    pub control: Arm,
    pub treatment: Arm,
    pub difference: RiskEstimate,
    pub margin: f64,
    pub figure: FigureOptions,
}

impl Default for StudyInput {
    fn default() -> Self {
        Self {
            control: Arm::suture(),
            treatment: Arm::adhesive(),
            difference: RiskEstimate::new(0.33, -1.79, 2.45),
            margin: DEFAULT_MARGIN,
            figure: FigureOptions::default(),
        }
    }
}

impl StudyInput {
    /// Axis label for the difference panel, e.g. "(Adhesive − Suture) [%]".
    pub fn difference_label(&self) -> String {
        format!("({} − {}) [%]", self.treatment.name, self.control.name)
    }

    /// Named estimates in display order, for checks and logging.
    pub fn named_estimates(&self) -> [(&str, &RiskEstimate); 3] {
        [
            (self.control.name.as_str(), &self.control.risk),
            (self.treatment.name.as_str(), &self.treatment.risk),
            ("Difference", &self.difference),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants_are_ordered() {
        let study = StudyInput::default();
        for (name, est) in study.named_estimates() {
            assert!(est.is_ordered(), "{} interval is not ordered", name);
        }
        assert_eq!(study.margin, 3.0);
    }

    #[test]
    fn test_error_bar_lengths() {
        let suture = Arm::suture().risk;
        assert!((suture.lower_error() - 1.429).abs() < 1e-9);
        assert!((suture.upper_error() - 1.4305).abs() < 1e-9);
    }

    #[test]
    fn test_negated_mirrors_interval() {
        let diff = StudyInput::default().difference;
        let neg = diff.negated();
        assert_eq!(neg, RiskEstimate::new(-0.33, -2.45, 1.79));
        assert!(neg.is_ordered());
        assert_eq!(neg.negated(), diff);
    }

    #[test]
    fn test_malformed_estimate_has_negative_error() {
        let bad = RiskEstimate::new(1.0, 2.0, 3.0);
        assert!(!bad.is_ordered());
        assert!(bad.lower_error() < 0.0);
    }

    #[test]
    fn test_labels() {
        let study = StudyInput::default();
        assert_eq!(study.control.series_label(), "Suture (95% CI)");
        assert_eq!(study.difference_label(), "(Adhesive − Suture) [%]");
    }
}
