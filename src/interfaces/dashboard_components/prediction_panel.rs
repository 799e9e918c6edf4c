use crate::application::analysis::AnalysisReport;
use crate::interfaces::components::card::Card;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::dashboard_view_model::{DISCLAIMER, DashboardViewModel};
use eframe::egui;

pub fn render_prediction_panel(ui: &mut egui::Ui, report: &AnalysisReport) {
    let callout = DashboardViewModel::prediction_callout(report);
    let color = callout.color();

    Card::new().title("AI ANALYSIS").accent(color).show(ui, |ui| {
        DesignSystem::callout_frame(color).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(&callout.headline)
                    .size(16.0)
                    .strong()
                    .color(color),
            );
        });

        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(&callout.detail)
                .size(14.0)
                .color(DesignSystem::TEXT_PRIMARY),
        );

        ui.add_space(4.0);
        ui.label(
            egui::RichText::new(format!(
                "{} · {} training rows · {} ms",
                report.model_name, report.training_rows, report.elapsed_ms
            ))
            .size(11.0)
            .color(DesignSystem::TEXT_MUTED),
        );

        ui.add_space(8.0);
        DesignSystem::callout_frame(DesignSystem::INFO).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(DISCLAIMER)
                    .size(11.0)
                    .color(DesignSystem::TEXT_SECONDARY),
            );
        });
    });
}

/// Shown in place of the prediction when the run failed
pub fn render_error_panel(ui: &mut egui::Ui, error: &str) {
    Card::new()
        .title("AI ANALYSIS")
        .accent(DesignSystem::DANGER)
        .show(ui, |ui| {
            DesignSystem::callout_frame(DesignSystem::DANGER).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    egui::RichText::new("Analysis failed")
                        .strong()
                        .color(DesignSystem::DANGER),
                );
                ui.label(egui::RichText::new(error).color(DesignSystem::TEXT_SECONDARY));
            });
        });
}
