//! Data module - Study estimates and loading

mod estimates;
mod loader;

pub use estimates::{Arm, FigureOptions, RiskEstimate, StudyInput, DEFAULT_MARGIN};
pub use loader::{InputWarning, LoaderError, StudyLoader};
