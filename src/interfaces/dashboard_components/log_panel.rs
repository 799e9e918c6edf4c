use crate::application::agents::user_agent::UserAgent;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

const LEVELS: &[(&str, Option<&str>)] = &[
    ("ALL", None),
    ("INFO", Some("INFO")),
    ("WARN", Some("WARN")),
    ("ERROR", Some("ERROR")),
];

pub fn render_log_panel(agent: &mut UserAgent, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("logs_panel")
        .resizable(true)
        .default_height(160.0)
        .min_height(30.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("System Logs").size(14.0));
                ui.add_space(8.0);

                for (label, level) in LEVELS {
                    let is_active = agent.log_level_filter.as_deref() == *level;
                    let button = egui::Button::new(egui::RichText::new(*label).size(10.0).color(
                        if is_active {
                            egui::Color32::WHITE
                        } else {
                            DesignSystem::TEXT_SECONDARY
                        },
                    ))
                    .fill(if is_active {
                        DesignSystem::ACCENT_PRIMARY
                    } else {
                        DesignSystem::BG_CARD
                    });
                    if ui.add(button).clicked() {
                        agent.log_level_filter = level.map(str::to_string);
                    }
                }
            });

            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("logs_scroll")
                .auto_shrink([false, true])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in agent.filtered_logs() {
                        let color = if line.contains("ERROR") {
                            egui::Color32::from_rgb(255, 80, 80)
                        } else if line.contains("WARN") {
                            egui::Color32::from_rgb(255, 255, 100)
                        } else {
                            egui::Color32::from_rgb(150, 150, 150)
                        };
                        ui.label(egui::RichText::new(line).monospace().size(11.0).color(color));
                    }
                });
        });
}
