//! Study Loader Module
//! Reads study inputs from JSON and reports inconsistent intervals.

use crate::data::StudyInput;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid study JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A non-fatal problem with the input values.
#[derive(Debug, Clone, PartialEq)]
pub enum InputWarning {
    /// `lower > estimate` or `estimate > upper`; the error bar renders with negative length.
    UnorderedInterval { name: String },
    NonFiniteValue { name: String },
}

impl std::fmt::Display for InputWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputWarning::UnorderedInterval { name } => {
                write!(f, "{}: interval is not ordered (lower <= estimate <= upper)", name)
            }
            InputWarning::NonFiniteValue { name } => write!(f, "{}: non-finite value", name),
        }
    }
}

/// Loads study inputs; missing fields fall back to the built-in study.
pub struct StudyLoader;

impl StudyLoader {
    /// Load a study from a JSON file.
    pub fn load_json(path: &Path) -> Result<StudyInput, LoaderError> {
        let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let study = Self::parse_json(&text)?;
        tracing::info!(path = %path.display(), "Loaded study file");
        Ok(study)
    }

    /// Parse a study from a JSON string.
    pub fn parse_json(text: &str) -> Result<StudyInput, LoaderError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check every interval. Nothing here stops rendering.
    pub fn check(study: &StudyInput) -> Vec<InputWarning> {
        let mut warnings = Vec::new();
        for (name, est) in study.named_estimates() {
            if ![est.estimate, est.lower, est.upper]
                .iter()
                .all(|v| v.is_finite())
            {
                warnings.push(InputWarning::NonFiniteValue {
                    name: name.to_string(),
                });
            } else if !est.is_ordered() {
                warnings.push(InputWarning::UnorderedInterval {
                    name: name.to_string(),
                });
            }
        }
        if !study.margin.is_finite() {
            warnings.push(InputWarning::NonFiniteValue {
                name: "Margin".to_string(),
            });
        }
        warnings
    }

    /// Run [`StudyLoader::check`] and log each warning.
    pub fn check_and_log(study: &StudyInput) -> usize {
        let warnings = Self::check(study);
        for w in &warnings {
            tracing::warn!(warning = %w, "Inconsistent study input");
        }
        warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RiskEstimate;

    #[test]
    fn test_partial_json_fills_defaults() {
        let study = StudyLoader::parse_json(r#"{ "margin": 2.5 }"#).unwrap();
        assert_eq!(study.margin, 2.5);
        assert_eq!(study.control, StudyInput::default().control);
        assert_eq!(study.figure.width, 1050);
    }

    #[test]
    fn test_json_overrides_arm() {
        let json = r#"{
            "treatment": { "name": "Glue", "risk": { "estimate": 2.0, "lower": 1.0, "upper": 3.0 } },
            "figure": { "title": "Custom" }
        }"#;
        let study = StudyLoader::parse_json(json).unwrap();
        assert_eq!(study.treatment.name, "Glue");
        assert_eq!(study.treatment.risk, RiskEstimate::new(2.0, 1.0, 3.0));
        assert_eq!(study.figure.title, "Custom");
        assert_eq!(study.figure.height, 450);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = StudyLoader::parse_json("{ margin: }").unwrap_err();
        assert!(matches!(err, LoaderError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = StudyLoader::load_json(Path::new("/nonexistent/study.json")).unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
    }

    #[test]
    fn test_check_flags_unordered_interval() {
        let mut study = StudyInput::default();
        assert!(StudyLoader::check(&study).is_empty());

        study.difference = RiskEstimate::new(0.33, 1.0, 2.45);
        let warnings = StudyLoader::check(&study);
        assert_eq!(
            warnings,
            vec![InputWarning::UnorderedInterval {
                name: "Difference".to_string()
            }]
        );
    }

    #[test]
    fn test_check_flags_non_finite() {
        let mut study = StudyInput::default();
        study.control.risk.upper = f64::NAN;
        study.margin = f64::INFINITY;
        let warnings = StudyLoader::check(&study);
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|w| matches!(w, InputWarning::NonFiniteValue { .. })));
    }
}
