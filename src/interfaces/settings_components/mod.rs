pub mod asset_selector;

pub use asset_selector::render_asset_selector;
