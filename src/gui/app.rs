//! Forest Plot Main Application
//! Main window with export toolbar and the two-panel chart.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use forest_plot::charts::{FigureSpec, StaticChartRenderer};
use forest_plot::data::StudyInput;
use forest_plot::stats::{NonInferiorityCalculator, NonInferiorityReport};
use egui::TopBottomPanel;

/// Main application window.
pub struct ForestPlotApp {
    figure: FigureSpec,
    report: NonInferiorityReport,
    control_panel: ControlPanel,
}

impl ForestPlotApp {
    pub fn new(cc: &eframe::CreationContext<'_>, study: &StudyInput, figure: FigureSpec) -> Self {
        // Black marks need a light background
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self {
            figure,
            report: NonInferiorityCalculator::report(study),
            control_panel: ControlPanel::new(),
        }
    }

    /// Ask for a destination and write the static rendering there.
    fn handle_export(&mut self, extension: &str, filter_name: &str) {
        let output_path = match rfd::FileDialog::new()
            .add_filter(filter_name, &[extension])
            .set_file_name(format!("forest_plot.{}", extension))
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartRenderer::render_to_file(&self.figure, &output_path) {
            Ok(()) => {
                self.control_panel
                    .set_status(format!("Exported: {}", output_path.display()));
                if self.control_panel.open_after_export {
                    if let Err(e) = open::that(&output_path) {
                        tracing::warn!(error = %e, path = %output_path.display(), "Failed to open export");
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                self.control_panel.set_status(format!("Export error: {}", e));
            }
        }
    }
}

impl eframe::App for ForestPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("control_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            match self.control_panel.show(ui, &self.report) {
                ControlPanelAction::ExportPng => self.handle_export("png", "PNG image"),
                ControlPanelAction::ExportSvg => self.handle_export("svg", "SVG image"),
                ControlPanelAction::None => {}
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ChartViewer::show(ui, &self.figure);
        });
    }
}
