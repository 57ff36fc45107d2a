//! Control Panel Widget
//! Top toolbar with export controls, the verdict and a status line.

use forest_plot::stats::{NonInferiorityReport, Verdict};
use egui::{Color32, RichText};

/// Toolbar with export buttons and status.
pub struct ControlPanel {
    pub status: String,
    pub open_after_export: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            open_after_export: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Draw the toolbar
    pub fn show(&mut self, ui: &mut egui::Ui, report: &NonInferiorityReport) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.horizontal(|ui| {
            if ui.button("Export PNG").clicked() {
                action = ControlPanelAction::ExportPng;
            }
            if ui.button("Export SVG").clicked() {
                action = ControlPanelAction::ExportSvg;
            }
            ui.checkbox(&mut self.open_after_export, "Open after export");

            ui.separator();

            let verdict_color = match report.verdict {
                Verdict::Superior | Verdict::NonInferior => Color32::from_rgb(40, 167, 69),
                Verdict::Inferior => Color32::from_rgb(220, 53, 69),
                Verdict::Inconclusive => Color32::from_rgb(243, 156, 18),
            };
            ui.label(
                RichText::new(report.verdict.describe())
                    .strong()
                    .color(verdict_color),
            );
            if let Some(p) = report.p_value {
                ui.label(RichText::new(format!("one-sided p = {:.4}", p)).size(12.0));
            }

            ui.separator();
            ui.label(RichText::new(&self.status).size(12.0));
        });

        action
    }
}

/// Actions that can be triggered from the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    ExportPng,
    ExportSvg,
}
