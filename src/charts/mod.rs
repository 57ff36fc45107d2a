//! Charts module - Figure layout and static rendering

pub mod layout;
mod renderer;

pub use layout::{FigureSpec, LineStyle, PanelSpec};
pub use renderer::{RenderError, StaticChartRenderer};
