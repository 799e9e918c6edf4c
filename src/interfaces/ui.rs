use crate::application::agents::user_agent::UserAgent;
use crate::interfaces::dashboard_components::chart_panel::render_chart_panel;
use crate::interfaces::dashboard_components::indicator_panel::render_indicator_panel;
use crate::interfaces::dashboard_components::log_panel::render_log_panel;
use crate::interfaces::dashboard_components::prediction_panel::{
    render_error_panel, render_prediction_panel,
};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::settings_components::render_asset_selector;
use chrono::Utc;
use eframe::egui;
use std::time::Duration;

/// Theme and text sizes, applied once at startup.
pub fn configure_fonts(ctx: &egui::Context) {
    ctx.set_visuals(DesignSystem::theme());
    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style
            .text_styles
            .insert(egui::TextStyle::Heading, egui::FontId::proportional(22.0));
        style
            .text_styles
            .insert(egui::TextStyle::Body, egui::FontId::proportional(14.0));
    });
}

impl eframe::App for UserAgent {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --- 1. Process System Events (Reports & Logs) ---
        self.poll();

        // --- 2. Top Status Bar ---
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🤖 Trader Sentinel AI");
                ui.separator();
                ui.label(format!("Time (UTC): {}", Utc::now().format("%H:%M:%S")));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (text, color) = if self.is_loading() {
                        ("● ANALYZING", DesignSystem::WARNING)
                    } else {
                        ("● READY", DesignSystem::SUCCESS)
                    };
                    ui.label(egui::RichText::new(text).color(color).small());
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("Source: {}", self.client().provider_name()))
                            .color(DesignSystem::TEXT_SECONDARY)
                            .small(),
                    );
                });
            });
        });

        // --- 3. Logs ---
        render_log_panel(self, ctx);

        // --- 4. Left Sidebar: Selections ---
        egui::SidePanel::left("settings_panel")
            .default_width(260.0)
            .min_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.add_space(DesignSystem::SPACING_SMALL);
                render_asset_selector(ui, self);
            });

        // --- 5. Right: Analysis Results ---
        let rsi_period = self.client().settings().rsi_period;
        egui::SidePanel::right("analysis_panel")
            .default_width(340.0)
            .min_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.add_space(DesignSystem::SPACING_SMALL);
                if let Some(error) = &self.last_error {
                    render_error_panel(ui, error);
                } else if let Some(report) = &self.latest_report {
                    render_indicator_panel(ui, report, rsi_period);
                    ui.add_space(DesignSystem::SPACING_SMALL);
                    render_prediction_panel(ui, report);
                } else {
                    ui.spinner();
                }
            });

        // --- 6. Central Panel: Chart ---
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(request) = self.in_flight() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!(
                        "Fetching {} ({}) and training model...",
                        request.name, request.symbol
                    ));
                });
                ui.add_space(DesignSystem::SPACING_SMALL);
            }

            match &self.latest_report {
                Some(report) => render_chart_panel(ui, report),
                None if self.last_error.is_some() => {
                    ui.centered_and_justified(|ui| {
                        ui.label("No chart: the last analysis failed.");
                    });
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label("⏳ Waiting for the first analysis...");
                    });
                }
            }
        });

        // Keep polling while the worker is busy or logs stream in
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}
