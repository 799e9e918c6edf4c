pub mod components;
pub mod dashboard_components;
pub mod design_system;
pub mod settings_components;
pub mod ui;
pub mod view_models;
