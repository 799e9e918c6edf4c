use crate::interfaces::components::card::Card;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Headline number with an optional pill (e.g. percent change) and caption
pub fn render_metric_card(
    ui: &mut egui::Ui,
    title: &str,
    value: &str,
    value_color: egui::Color32,
    pill: Option<(&str, egui::Color32)>,
    caption: Option<&str>,
) {
    Card::new().title(title).min_height(96.0).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(value)
                    .size(28.0)
                    .strong()
                    .color(value_color),
            );
            if let Some((text, color)) = pill {
                ui.add_space(6.0);
                render_status_pill(ui, text, color);
            }
        });

        if let Some(caption) = caption {
            ui.label(
                egui::RichText::new(caption)
                    .size(11.0)
                    .color(DesignSystem::TEXT_MUTED),
            );
        }
    });
}

pub fn render_status_pill(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    egui::Frame::NONE
        .fill(color.linear_multiply(0.15))
        .corner_radius(12)
        .inner_margin(egui::Margin::symmetric(8, 4))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(12.0).strong().color(color));
        });
}
