pub mod chart_panel;
pub mod indicator_panel;
pub mod log_panel;
pub mod prediction_panel;
