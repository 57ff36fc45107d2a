//! Static Chart Renderer
//! Draws a [`FigureSpec`] with plotters to PNG, SVG or an in-memory buffer.
//!
//! Layout:
//! 1. Title centered above both panels
//! 2. Drawing area split evenly into two panels side by side
//! 3. Each panel: caption, x description, error bars with caps and a point
//!    marker, dashed/dotted reference lines, category tick labels, legend

use crate::charts::layout::{dash_segments, FigureSpec, LegendCorner, PanelSpec, Rgb};
use crate::charts::layout::{BAR_WIDTH, CAP_HALF_LENGTH, MARKER_RADIUS};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

const FONT: &str = "sans-serif";
const TITLE_FONT: i32 = 20;
const CAPTION_FONT: i32 = 16;
const LABEL_FONT: i32 = 14;
const TICK_FONT: i32 = 13;
const LEGEND_FONT: i32 = 12;

const Y_LABEL_AREA: u32 = 80;
const X_LABEL_AREA: u32 = 45;
const TICK_LENGTH: i32 = 5;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("Figure has zero size ({0}x{1})")]
    EmptyCanvas(u32, u32),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

fn color(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// True when plotters can resolve a sans-serif font for text layout.
    pub fn fonts_available() -> bool {
        (FONT, 12).into_font().box_size("Ag").is_ok()
    }

    /// Write the figure to `path`, choosing PNG or SVG from the extension.
    pub fn render_to_file(fig: &FigureSpec, path: &Path) -> Result<(), RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Self::render_png(fig, path),
            "svg" => Self::render_svg(fig, path),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn render_png(fig: &FigureSpec, path: &Path) -> Result<(), RenderError> {
        Self::check_size(fig)?;
        let root = BitMapBackend::new(path, (fig.width, fig.height)).into_drawing_area();
        Self::draw(&root, fig)?;
        tracing::info!(path = %path.display(), width = fig.width, height = fig.height, "PNG exported");
        Ok(())
    }

    pub fn render_svg(fig: &FigureSpec, path: &Path) -> Result<(), RenderError> {
        Self::check_size(fig)?;
        let root = SVGBackend::new(path, (fig.width, fig.height)).into_drawing_area();
        Self::draw(&root, fig)?;
        tracing::info!(path = %path.display(), "SVG exported");
        Ok(())
    }

    /// Render into a raw RGB8 buffer of `width * height * 3` bytes.
    pub fn render_rgb(fig: &FigureSpec) -> Result<Vec<u8>, RenderError> {
        Self::check_size(fig)?;
        let mut buffer = vec![0u8; fig.width as usize * fig.height as usize * 3];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (fig.width, fig.height)).into_drawing_area();
            Self::draw(&root, fig)?;
        }
        Ok(buffer)
    }

    /// Render and encode as PNG bytes.
    pub fn render_png_bytes(fig: &FigureSpec) -> Result<Vec<u8>, RenderError> {
        let rgb = Self::render_rgb(fig)?;
        let img = image::RgbImage::from_raw(fig.width, fig.height, rgb)
            .ok_or(RenderError::EmptyCanvas(fig.width, fig.height))?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    fn check_size(fig: &FigureSpec) -> Result<(), RenderError> {
        if fig.width == 0 || fig.height == 0 {
            return Err(RenderError::EmptyCanvas(fig.width, fig.height));
        }
        Ok(())
    }

    /// Draw the whole figure onto any plotters backend.
    pub fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        fig: &FigureSpec,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(draw_err)?;
        let body = root
            .titled(&fig.title, (FONT, TITLE_FONT))
            .map_err(draw_err)?;

        let areas = body.split_evenly((1, 2));
        for (area, panel) in areas.iter().zip(fig.panels()) {
            Self::draw_panel(area, panel)?;
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }

    fn draw_panel<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        panel: &PanelSpec,
    ) -> Result<(), RenderError> {
        let y_label_area = if panel.spines.left { Y_LABEL_AREA } else { 10 };

        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, (FONT, CAPTION_FONT))
            .margin(10)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(y_label_area)
            .build_cartesian_2d(
                panel.x_range.min..panel.x_range.max,
                panel.y_range.min..panel.y_range.max,
            )
            .map_err(draw_err)?;

        // Numeric y labels are replaced by the category ticks drawn below
        let no_labels = |_: &f64| String::new();
        {
            let mut mesh = chart.configure_mesh();
            mesh.disable_mesh()
                .x_desc(panel.x_label.as_str())
                .axis_desc_style((FONT, LABEL_FONT))
                .x_label_style((FONT, TICK_FONT))
                .y_label_formatter(&no_labels)
                .set_tick_mark_size(LabelAreaPosition::Left, 0);
            if !panel.spines.left {
                mesh.disable_y_axis();
            }
            if !panel.spines.bottom {
                mesh.disable_x_axis();
            }
            mesh.draw().map_err(draw_err)?;
        }

        for line in &panel.reference_lines {
            let (dash, gap) = line.style.pattern();
            let span = panel.y_range.span();
            let style = color(line.color).stroke_width(line.width.round().max(1.0) as u32);
            let x = line.x;
            let segments = dash_segments(panel.y_range.min, panel.y_range.max, dash * span, gap * span);

            chart
                .draw_series(
                    segments
                        .into_iter()
                        .map(move |(from, to)| PathElement::new(vec![(x, from), (x, to)], style)),
                )
                .map_err(draw_err)?
                .label(line.label.as_str())
                .legend(move |(lx, ly)| PathElement::new(vec![(lx, ly), (lx + 20, ly)], style));
        }

        for mark in &panel.marks {
            let c = color(mark.color);
            let est = mark.estimate;

            chart
                .draw_series(std::iter::once(ErrorBar::new_horizontal(
                    mark.y,
                    est.lower,
                    est.estimate,
                    est.upper,
                    c.stroke_width(BAR_WIDTH),
                    CAP_HALF_LENGTH * 2,
                )))
                .map_err(draw_err)?;

            chart
                .draw_series(std::iter::once(Circle::new(
                    (est.estimate, mark.y),
                    MARKER_RADIUS,
                    c.filled(),
                )))
                .map_err(draw_err)?
                .label(mark.label.as_str())
                .legend(move |(lx, ly)| Circle::new((lx + 10, ly), MARKER_RADIUS, c.filled()));
        }

        // Category ticks sit in the label area, outside the plotting area
        let (base_x, base_y) = area.get_base_pixel();
        let tick_style = TextStyle::from((FONT, TICK_FONT).into_font())
            .pos(Pos::new(HPos::Right, VPos::Center));
        for tick in &panel.y_ticks {
            let (px, py) = chart.backend_coord(&(panel.x_range.min, tick.y));
            let (x, y) = (px - base_x, py - base_y);
            if panel.spines.left {
                area.draw(&PathElement::new(vec![(x - TICK_LENGTH, y), (x, y)], BLACK))
                    .map_err(draw_err)?;
            }
            if !tick.label.is_empty() {
                area.draw(&Text::new(
                    tick.label.clone(),
                    (x - TICK_LENGTH - 3, y),
                    tick_style.clone(),
                ))
                .map_err(draw_err)?;
            }
        }

        let position = match panel.legend {
            LegendCorner::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendCorner::UpperRight => SeriesLabelPosition::UpperRight,
        };
        chart
            .configure_series_labels()
            .position(position)
            .background_style(WHITE.mix(0.0))
            .border_style(WHITE.mix(0.0))
            .label_font((FONT, LEGEND_FONT))
            .draw()
            .map_err(draw_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StudyInput;

    fn figure() -> FigureSpec {
        FigureSpec::build(&StudyInput::default()).unwrap()
    }

    #[test]
    fn test_unsupported_extension() {
        let err = StaticChartRenderer::render_to_file(&figure(), Path::new("out.bmpx")).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(ext) if ext == "bmpx"));
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let mut fig = figure();
        fig.width = 0;
        assert!(matches!(
            StaticChartRenderer::render_rgb(&fig),
            Err(RenderError::EmptyCanvas(0, 450))
        ));
    }

    #[test]
    fn test_render_rgb_is_deterministic() {
        if !StaticChartRenderer::fonts_available() {
            eprintln!("skipping: no sans-serif font available");
            return;
        }
        let fig = figure();
        let a = StaticChartRenderer::render_rgb(&fig).unwrap();
        let b = StaticChartRenderer::render_rgb(&fig).unwrap();
        assert_eq!(a.len(), 1050 * 450 * 3);
        assert!(a == b, "identical inputs rendered different pixels");
        // something other than the white background was drawn
        assert!(a.iter().any(|&p| p != 255));
    }
}
