//! Non-inferiority Calculator Module
//! Judges the risk difference interval against the margin.

use crate::data::{RiskEstimate, StudyInput};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Confidence level of every interval in the study.
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// Outcome of comparing the difference interval with the margin.
///
/// The difference is an adverse-event risk, so smaller is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Upper bound below zero.
    Superior,
    /// Upper bound below the margin.
    NonInferior,
    /// Lower bound above the margin.
    Inferior,
    Inconclusive,
}

impl Verdict {
    pub fn describe(&self) -> &'static str {
        match self {
            Verdict::Superior => "Superior (upper bound < 0)",
            Verdict::NonInferior => "Non-inferior (upper bound < margin)",
            Verdict::Inferior => "Inferior (lower bound > margin)",
            Verdict::Inconclusive => "Inconclusive (interval crosses margin)",
        }
    }
}

/// Summary of the non-inferiority comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonInferiorityReport {
    pub control: String,
    pub treatment: String,
    pub difference: RiskEstimate,
    pub margin: f64,
    pub confidence_level: f64,
    pub standard_error: f64,
    pub z_statistic: Option<f64>,
    /// One-sided p-value for H0: difference >= margin.
    pub p_value: Option<f64>,
    pub verdict: Verdict,
}

/// Handles the statistical side of the comparison.
pub struct NonInferiorityCalculator;

impl NonInferiorityCalculator {
    fn standard_normal() -> Option<Normal> {
        Normal::new(0.0, 1.0).ok()
    }

    /// Two-sided critical value for `level` (1.959964 at 0.95).
    pub fn z_critical(level: f64) -> f64 {
        match Self::standard_normal() {
            Some(n) => n.inverse_cdf(1.0 - (1.0 - level) / 2.0),
            None => f64::NAN,
        }
    }

    /// Standard error implied by a symmetric normal-theory interval.
    pub fn implied_standard_error(ci: &RiskEstimate, level: f64) -> f64 {
        (ci.upper - ci.lower) / (2.0 * Self::z_critical(level))
    }

    pub fn verdict(difference: &RiskEstimate, margin: f64) -> Verdict {
        if difference.upper < 0.0 {
            Verdict::Superior
        } else if difference.upper < margin {
            Verdict::NonInferior
        } else if difference.lower > margin {
            Verdict::Inferior
        } else {
            Verdict::Inconclusive
        }
    }

    /// One-sided z test of H0: difference >= margin.
    ///
    /// Returns `None` when the interval has no width.
    pub fn one_sided_test(difference: &RiskEstimate, margin: f64, se: f64) -> Option<(f64, f64)> {
        if !se.is_finite() || se <= 0.0 {
            return None;
        }
        let z = (margin - difference.estimate) / se;
        let normal = Self::standard_normal()?;
        Some((z, 1.0 - normal.cdf(z)))
    }

    pub fn report(study: &StudyInput) -> NonInferiorityReport {
        let se = Self::implied_standard_error(&study.difference, CONFIDENCE_LEVEL);
        let test = Self::one_sided_test(&study.difference, study.margin, se);
        let verdict = Self::verdict(&study.difference, study.margin);

        tracing::debug!(
            se,
            z = ?test.map(|t| t.0),
            p = ?test.map(|t| t.1),
            ?verdict,
            "Computed non-inferiority summary"
        );

        NonInferiorityReport {
            control: study.control.name.clone(),
            treatment: study.treatment.name.clone(),
            difference: study.difference,
            margin: study.margin,
            confidence_level: CONFIDENCE_LEVEL,
            standard_error: se,
            z_statistic: test.map(|t| t.0),
            p_value: test.map(|t| t.1),
            verdict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_critical_95() {
        let z = NonInferiorityCalculator::z_critical(0.95);
        assert!((z - 1.959964).abs() < 1e-5);
    }

    #[test]
    fn test_default_study_is_non_inferior() {
        let report = NonInferiorityCalculator::report(&StudyInput::default());
        assert_eq!(report.verdict, Verdict::NonInferior);

        // (2.45 + 1.79) / (2 * 1.96)
        assert!((report.standard_error - 1.0817).abs() < 1e-3);
        let z = report.z_statistic.unwrap();
        assert!((z - 2.468).abs() < 1e-2);
        let p = report.p_value.unwrap();
        assert!(p > 0.0 && p < 0.025);
    }

    #[test]
    fn test_verdicts() {
        let margin = 3.0;
        let v = |l, e, u| NonInferiorityCalculator::verdict(&RiskEstimate::new(e, l, u), margin);
        assert_eq!(v(-3.0, -2.0, -0.5), Verdict::Superior);
        assert_eq!(v(-1.0, 0.5, 2.9), Verdict::NonInferior);
        assert_eq!(v(3.5, 4.0, 5.0), Verdict::Inferior);
        assert_eq!(v(-1.0, 1.0, 3.5), Verdict::Inconclusive);
    }

    #[test]
    fn test_zero_width_interval_has_no_test() {
        let point = RiskEstimate::new(1.0, 1.0, 1.0);
        let se = NonInferiorityCalculator::implied_standard_error(&point, CONFIDENCE_LEVEL);
        assert_eq!(se, 0.0);
        assert!(NonInferiorityCalculator::one_sided_test(&point, 3.0, se).is_none());
    }

    #[test]
    fn test_report_serializes_verdict_snake_case() {
        let report = NonInferiorityCalculator::report(&StudyInput::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["verdict"], "non_inferior");
        assert_eq!(json["margin"], 3.0);
        assert_eq!(json["control"], "Suture");
    }
}
