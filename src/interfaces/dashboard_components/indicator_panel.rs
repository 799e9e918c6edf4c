use crate::application::analysis::AnalysisReport;
use crate::interfaces::components::metrics::render_metric_card;
use crate::interfaces::view_models::dashboard_view_model::DashboardViewModel;
use eframe::egui;

/// Current price with day-over-day change, and the latest RSI reading
pub fn render_indicator_panel(ui: &mut egui::Ui, report: &AnalysisReport, rsi_period: usize) {
    let price = DashboardViewModel::price_metrics(report.snapshot.as_ref());
    let pill_text = price
        .change_text
        .as_ref()
        .map(|change| format!("{} {}", price.arrow, change));

    render_metric_card(
        ui,
        "CURRENT PRICE",
        &price.price_text,
        egui::Color32::WHITE,
        pill_text.as_deref().map(|text| (text, price.change_color)),
        Some(report.request.symbol.as_str()),
    );

    ui.add_space(8.0);

    let rsi = DashboardViewModel::rsi_metrics(report.latest_rsi);
    let title = format!("RSI ({})", rsi_period);
    render_metric_card(
        ui,
        &title,
        &rsi.value_text,
        rsi.color,
        Some((rsi.zone_label, rsi.color)),
        Some("> 70 overbought · < 30 oversold"),
    );
}
