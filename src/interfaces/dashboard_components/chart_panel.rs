use crate::application::analysis::AnalysisReport;
use crate::domain::market::timeframe::Timeframe;
use crate::interfaces::design_system::DesignSystem;
use chrono::{TimeZone, Utc};
use eframe::egui;
use egui_plot::{BoxElem, BoxPlot, BoxSpread, Legend, Plot};
use rust_decimal::prelude::ToPrimitive;

/// Candlestick chart of the whole fetched series.
/// X axis is in unix seconds so spacing follows real time.
pub fn render_chart_panel(ui: &mut egui::Ui, report: &AnalysisReport) {
    let request = &report.request;

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("{} Price Chart", request.name))
                .strong()
                .size(16.0)
                .color(DesignSystem::TEXT_PRIMARY),
        );
        ui.label(
            egui::RichText::new(format!(
                "{} · {} · {} candles",
                request.symbol,
                request.timeframe.display_name(),
                report.candles.len()
            ))
            .size(11.0)
            .color(DesignSystem::TEXT_MUTED),
        );
    });
    ui.add_space(8.0);

    if report.candles.is_empty() {
        ui.label(format!("No candles for {}", request.symbol));
        return;
    }

    let timeframe = request.timeframe;
    let box_width = timeframe.to_seconds() as f64 * 0.7;
    let date_format = match timeframe {
        Timeframe::OneHour => "%m-%d %H:%M",
        Timeframe::OneDay | Timeframe::OneWeek => "%Y-%m-%d",
    };

    let height = ui.available_height() - 20.0;
    Plot::new(format!("chart_{}_{}", request.symbol, timeframe))
        .height(height.max(320.0))
        .show_grid([true, true])
        .legend(Legend::default())
        .x_axis_formatter(move |mark, _range| {
            Utc.timestamp_opt(mark.value as i64, 0)
                .single()
                .map(|dt| dt.format(date_format).to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            let box_elems: Vec<BoxElem> = report
                .candles
                .iter()
                .map(|c| {
                    let t = (c.timestamp / 1000) as f64;
                    let open = c.open.to_f64().unwrap_or(0.0);
                    let close = c.close.to_f64().unwrap_or(0.0);
                    let high = c.high.to_f64().unwrap_or(0.0);
                    let low = c.low.to_f64().unwrap_or(0.0);
                    let color = if c.is_bullish() {
                        DesignSystem::CANDLE_UP
                    } else {
                        DesignSystem::CANDLE_DOWN
                    };

                    BoxElem::new(
                        t,
                        BoxSpread::new(low, open.min(close), (open + close) / 2.0, open.max(close), high),
                    )
                    .fill(color)
                    .stroke(egui::Stroke::new(1.0, color))
                    .box_width(box_width)
                    .whisker_width(0.0)
                })
                .collect();

            plot_ui.box_plot(BoxPlot::new(request.symbol.clone(), box_elems));
        });
}
