use crate::application::agents::user_agent::UserAgent;
use crate::domain::market::asset_catalog::AssetCatalog;
use crate::domain::market::lookback::LookbackPeriod;
use crate::domain::market::timeframe::Timeframe;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Sidebar controls. Every change triggers a new analysis through the agent.
pub fn render_asset_selector(ui: &mut egui::Ui, agent: &mut UserAgent) {
    ui.label(
        egui::RichText::new("MARKET")
            .size(12.0)
            .strong()
            .color(DesignSystem::TEXT_SECONDARY),
    );
    ui.add_space(4.0);

    let mut category_index = agent.category_index;
    egui::ComboBox::from_id_salt("category_select")
        .width(ui.available_width())
        .selected_text(agent.current_category().name)
        .show_ui(ui, |ui| {
            for (i, category) in AssetCatalog::categories().iter().enumerate() {
                ui.selectable_value(&mut category_index, i, category.name);
            }
        });
    agent.select_category(category_index);

    ui.add_space(6.0);

    let mut asset_index = agent.asset_index;
    let current = agent.current_asset();
    egui::ComboBox::from_id_salt("asset_select")
        .width(ui.available_width())
        .selected_text(format!("{} ({})", current.name, current.symbol))
        .show_ui(ui, |ui| {
            for (i, asset) in agent.current_category().assets.iter().enumerate() {
                ui.selectable_value(
                    &mut asset_index,
                    i,
                    format!("{} ({})", asset.name, asset.symbol),
                );
            }
        });
    agent.select_asset(asset_index);

    ui.add_space(DesignSystem::SPACING_MEDIUM);
    ui.label(
        egui::RichText::new("TIMEFRAME")
            .size(12.0)
            .strong()
            .color(DesignSystem::TEXT_SECONDARY),
    );
    ui.add_space(4.0);

    let mut timeframe = agent.timeframe;
    ui.horizontal(|ui| {
        for tf in Timeframe::all() {
            ui.selectable_value(&mut timeframe, tf, tf.to_yahoo_string());
        }
    });
    agent.select_timeframe(timeframe);

    ui.add_space(DesignSystem::SPACING_MEDIUM);
    ui.label(
        egui::RichText::new("HISTORY (YEARS)")
            .size(12.0)
            .strong()
            .color(DesignSystem::TEXT_SECONDARY),
    );
    ui.add_space(4.0);

    let slider = ui.add(egui::Slider::new(
        &mut agent.lookback_slider,
        LookbackPeriod::MIN_YEARS..=LookbackPeriod::MAX_YEARS,
    ));
    // Only refit once the drag settles
    if !slider.dragged() {
        agent.select_lookback_years(agent.lookback_slider);
    }

    if let Some(max_days) = agent.timeframe.max_lookback_days() {
        ui.label(
            egui::RichText::new(format!("Hourly data is limited to {} days", max_days))
                .size(10.0)
                .color(DesignSystem::TEXT_MUTED),
        );
    }

    ui.add_space(DesignSystem::SPACING_MEDIUM);
    if ui
        .add_enabled(!agent.is_loading(), egui::Button::new("↻ Re-run analysis"))
        .clicked()
    {
        agent.submit_analysis();
    }
}
