//! Chart Viewer Widget
//! Central panel drawing both forest plot panels side by side with egui_plot.

use forest_plot::charts::layout::{LegendCorner, Rgb};
use forest_plot::charts::{FigureSpec, LineStyle, PanelSpec};
use egui::{Color32, RichText};
use egui_plot::{Corner, GridMark, Legend, Line, Plot, PlotPoints, Points, VLine};

const PANEL_SPACING: f32 = 15.0;
const MIN_PANEL_HEIGHT: f32 = 260.0;

/// Cap height as a fraction of the y span.
const CAP_FRACTION: f64 = 0.06;

fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

fn plot_line_style(style: LineStyle) -> egui_plot::LineStyle {
    match style {
        LineStyle::Dashed => egui_plot::LineStyle::Dashed { length: 8.0 },
        LineStyle::Dotted => egui_plot::LineStyle::Dotted { spacing: 4.0 },
    }
}

/// Draws a [`FigureSpec`] interactively.
pub struct ChartViewer;

impl ChartViewer {
    pub fn show(ui: &mut egui::Ui, figure: &FigureSpec) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&figure.title).size(18.0).strong());
        });
        ui.add_space(8.0);

        let panel_width = ((ui.available_width() - PANEL_SPACING) / 2.0).max(200.0);
        let panel_height = (ui.available_height() - 30.0).max(MIN_PANEL_HEIGHT);

        ui.horizontal(|ui| {
            for (i, panel) in figure.panels().into_iter().enumerate() {
                if i > 0 {
                    ui.add_space(PANEL_SPACING);
                }
                ui.vertical(|ui| {
                    ui.set_width(panel_width);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(&panel.title).size(14.0).strong());
                    });
                    Self::draw_panel(ui, panel, i, panel_height);
                });
            }
        });
    }

    fn draw_panel(ui: &mut egui::Ui, panel: &PanelSpec, index: usize, height: f32) {
        let ticks = panel.y_ticks.clone();
        let tick_values: Vec<f64> = ticks.iter().map(|t| t.y).collect();
        let y_span = panel.y_range.span();

        let corner = match panel.legend {
            LegendCorner::UpperLeft => Corner::LeftTop,
            LegendCorner::UpperRight => Corner::RightTop,
        };

        Plot::new(format!("forest_panel_{}", index))
            .height(height)
            .legend(Legend::default().position(corner))
            .x_axis_label(panel.x_label.clone())
            .show_grid(false)
            .show_axes([panel.spines.bottom, panel.spines.left])
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(panel.x_range.min)
            .include_x(panel.x_range.max)
            .include_y(panel.y_range.min)
            .include_y(panel.y_range.max)
            .set_margin_fraction(egui::Vec2::ZERO)
            // Only the category positions get a y tick
            .y_grid_spacer(move |_input| {
                tick_values
                    .iter()
                    .map(|&value| GridMark {
                        value,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| {
                ticks
                    .iter()
                    .find(|t| (t.y - mark.value).abs() < 1e-9)
                    .map(|t| t.label.clone())
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for line in &panel.reference_lines {
                    plot_ui.vline(
                        VLine::new(line.x)
                            .color(color32(line.color))
                            .width(line.width)
                            .style(plot_line_style(line.style))
                            .name(&line.label),
                    );
                }

                let cap = y_span * CAP_FRACTION / 2.0;
                for mark in &panel.marks {
                    let c = color32(mark.color);
                    let est = mark.estimate;

                    plot_ui.line(
                        Line::new(PlotPoints::from(vec![[est.lower, mark.y], [est.upper, mark.y]]))
                            .color(c)
                            .width(2.0),
                    );
                    for x in [est.lower, est.upper] {
                        plot_ui.line(
                            Line::new(PlotPoints::from(vec![[x, mark.y - cap], [x, mark.y + cap]]))
                                .color(c)
                                .width(2.0),
                        );
                    }
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[est.estimate, mark.y]]))
                            .radius(4.0)
                            .filled(true)
                            .color(c)
                            .name(&mark.label),
                    );
                }
            });
    }
}
