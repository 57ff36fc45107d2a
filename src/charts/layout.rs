//! Figure Layout Module
//! Backend-independent description of the two-panel forest plot.
//!
//! Layout:
//! 1. Figure title centered above both panels
//! 2. Left panel: absolute risk of each arm with 95% CI, category y labels
//! 3. Right panel: risk difference with 95% CI, margin and zero reference lines
//!
//! Both the static renderer and the interactive viewer draw from a
//! [`FigureSpec`], so they agree on ranges, labels and styles.

use crate::data::{RiskEstimate, StudyInput};
use crate::stats::{absolute_risk_range, difference_range, AxisError, AxisRange, AXIS_PADDING};

/// Vertical positions of the marks. Arms sit close together around zero.
pub const Y_CONTROL: f64 = 0.02;
pub const Y_TREATMENT: f64 = -0.02;
pub const Y_DIFFERENCE: f64 = 0.0;

/// Mark styling, in pixels.
pub const MARKER_RADIUS: u32 = 4;
pub const BAR_WIDTH: u32 = 2;
pub const CAP_HALF_LENGTH: u32 = 5;

/// Dash pattern for reference lines, as fractions of the panel height.
const DASH: (f64, f64) = (0.06, 0.03);
const DOT: (f64, f64) = (0.01, 0.025);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const GRAY: Rgb = Rgb(128, 128, 128);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Dashed,
    Dotted,
}

impl LineStyle {
    /// (dash, gap) as fractions of the vertical extent.
    pub fn pattern(&self) -> (f64, f64) {
        match self {
            LineStyle::Dashed => DASH,
            LineStyle::Dotted => DOT,
        }
    }
}

/// Point estimate with asymmetric horizontal error bars.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBarMark {
    pub label: String,
    pub y: f64,
    pub estimate: RiskEstimate,
    pub color: Rgb,
}

/// Full-height vertical line at a fixed x.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub label: String,
    pub x: f64,
    pub style: LineStyle,
    pub color: Rgb,
    pub width: f32,
}

/// Y tick carrying a text label instead of a number.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTick {
    pub y: f64,
    pub label: String,
}

/// Which border lines of a panel are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spines {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendCorner {
    UpperLeft,
    UpperRight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub title: String,
    pub x_label: String,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub marks: Vec<ErrorBarMark>,
    pub reference_lines: Vec<ReferenceLine>,
    pub y_ticks: Vec<CategoryTick>,
    pub spines: Spines,
    pub legend: LegendCorner,
}

impl PanelSpec {
    /// Legend entries in drawing order.
    pub fn legend_labels(&self) -> Vec<&str> {
        self.marks
            .iter()
            .map(|m| m.label.as_str())
            .chain(self.reference_lines.iter().map(|l| l.label.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub absolute: PanelSpec,
    pub difference: PanelSpec,
}

impl FigureSpec {
    /// Derive both panels from the study.
    pub fn build(study: &StudyInput) -> Result<Self, AxisError> {
        let absolute = Self::absolute_panel(study)?;
        let difference = Self::difference_panel(study)?;

        tracing::debug!(
            abs_min = absolute.x_range.min,
            abs_max = absolute.x_range.max,
            diff_min = difference.x_range.min,
            diff_max = difference.x_range.max,
            "Derived axis ranges"
        );

        Ok(Self {
            title: study.figure.title.clone(),
            width: study.figure.width,
            height: study.figure.height,
            absolute,
            difference,
        })
    }

    /// Panels left to right.
    pub fn panels(&self) -> [&PanelSpec; 2] {
        [&self.absolute, &self.difference]
    }

    fn absolute_panel(study: &StudyInput) -> Result<PanelSpec, AxisError> {
        let x_range = absolute_risk_range(&study.control.risk, &study.treatment.risk, AXIS_PADDING)?;

        Ok(PanelSpec {
            title: "Absolute Risk (%)".to_string(),
            x_label: "Incidence (%)".to_string(),
            x_range,
            y_range: AxisRange::new(-0.06, 0.06)?,
            marks: vec![
                ErrorBarMark {
                    label: study.control.series_label(),
                    y: Y_CONTROL,
                    estimate: study.control.risk,
                    color: BLACK,
                },
                ErrorBarMark {
                    label: study.treatment.series_label(),
                    y: Y_TREATMENT,
                    estimate: study.treatment.risk,
                    color: BLACK,
                },
            ],
            reference_lines: Vec::new(),
            y_ticks: vec![
                CategoryTick {
                    y: Y_TREATMENT,
                    label: study.treatment.name.clone(),
                },
                CategoryTick {
                    y: Y_CONTROL,
                    label: study.control.name.clone(),
                },
            ],
            spines: Spines {
                top: false,
                right: false,
                bottom: true,
                left: true,
            },
            legend: LegendCorner::UpperRight,
        })
    }

    fn difference_panel(study: &StudyInput) -> Result<PanelSpec, AxisError> {
        let x_range = difference_range(&study.difference, study.margin, AXIS_PADDING)?;

        Ok(PanelSpec {
            title: "Absolute Risk Difference".to_string(),
            x_label: study.difference_label(),
            x_range,
            y_range: AxisRange::new(-1.0, 1.0)?,
            marks: vec![ErrorBarMark {
                label: "Risk difference (95% CI)".to_string(),
                y: Y_DIFFERENCE,
                estimate: study.difference,
                color: BLACK,
            }],
            reference_lines: vec![
                ReferenceLine {
                    label: format!("Non-inferiority margin = {:?}%", study.margin),
                    x: study.margin,
                    style: LineStyle::Dashed,
                    color: BLACK,
                    width: 1.5,
                },
                ReferenceLine {
                    label: "No difference (0%)".to_string(),
                    x: 0.0,
                    style: LineStyle::Dotted,
                    color: GRAY,
                    width: 1.0,
                },
            ],
            y_ticks: vec![CategoryTick {
                y: Y_DIFFERENCE,
                label: String::new(),
            }],
            spines: Spines {
                top: false,
                right: false,
                bottom: true,
                left: false,
            },
            legend: LegendCorner::UpperLeft,
        })
    }
}

/// Split `[from, to]` into `(start, end)` dash pieces of length `dash`
/// separated by `gap`. The last piece is clipped at `to`.
pub fn dash_segments(from: f64, to: f64, dash: f64, gap: f64) -> Vec<(f64, f64)> {
    if to <= from || dash <= 0.0 || gap < 0.0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut start = from;
    while start < to {
        out.push((start, (start + dash).min(to)));
        start += dash + gap;
    }
    out
}
