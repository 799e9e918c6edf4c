//! Static catalog of selectable instruments.
//!
//! Display names map to Yahoo Finance symbols and are grouped by category so
//! the dashboard can offer a two-level picker (category, then asset).

use crate::domain::errors::MarketDataError;
use serde::Serialize;

/// A selectable instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub name: &'static str,
    pub symbol: &'static str,
}

/// A named group of assets
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AssetCategory {
    pub name: &'static str,
    pub assets: &'static [Asset],
}

const CRYPTO: &[Asset] = &[
    Asset { name: "Bitcoin", symbol: "BTC-USD" },
    Asset { name: "Ethereum", symbol: "ETH-USD" },
    Asset { name: "Solana", symbol: "SOL-USD" },
    Asset { name: "BNB", symbol: "BNB-USD" },
];

const COMMODITIES: &[Asset] = &[
    Asset { name: "Gold", symbol: "GC=F" },
    Asset { name: "Silver", symbol: "SI=F" },
    Asset { name: "Crude Oil", symbol: "CL=F" },
];

const FOREX: &[Asset] = &[
    Asset { name: "USD/IDR", symbol: "IDR=X" },
    Asset { name: "EUR/USD", symbol: "EURUSD=X" },
    Asset { name: "USD/JPY", symbol: "JPY=X" },
];

const STOCKS: &[Asset] = &[
    Asset { name: "Apple", symbol: "AAPL" },
    Asset { name: "NVIDIA", symbol: "NVDA" },
    Asset { name: "Tesla", symbol: "TSLA" },
    Asset { name: "Bank Central Asia", symbol: "BBCA.JK" },
];

const CATEGORIES: &[AssetCategory] = &[
    AssetCategory { name: "Crypto", assets: CRYPTO },
    AssetCategory { name: "Commodities", assets: COMMODITIES },
    AssetCategory { name: "Forex", assets: FOREX },
    AssetCategory { name: "Stocks", assets: STOCKS },
];

pub struct AssetCatalog;

impl AssetCatalog {
    pub fn categories() -> &'static [AssetCategory] {
        CATEGORIES
    }

    pub fn category(name: &str) -> Option<&'static AssetCategory> {
        CATEGORIES.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Iterates every asset across all categories, in catalog order
    pub fn all_assets() -> impl Iterator<Item = &'static Asset> {
        CATEGORIES.iter().flat_map(|c| c.assets.iter())
    }

    /// Resolves either a display name ("Gold") or a provider symbol ("GC=F").
    pub fn resolve(query: &str) -> Result<&'static Asset, MarketDataError> {
        Self::all_assets()
            .find(|a| a.name.eq_ignore_ascii_case(query) || a.symbol.eq_ignore_ascii_case(query))
            .ok_or_else(|| MarketDataError::UnknownAsset {
                name: query.to_string(),
            })
    }

    pub fn default_asset() -> &'static Asset {
        &CRYPTO[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_symbols_are_unique() {
        let symbols: Vec<_> = AssetCatalog::all_assets().map(|a| a.symbol).collect();
        let unique: HashSet<_> = symbols.iter().collect();
        assert_eq!(symbols.len(), unique.len());
    }

    #[test]
    fn test_resolve_by_name_or_symbol() {
        assert_eq!(AssetCatalog::resolve("gold").unwrap().symbol, "GC=F");
        assert_eq!(AssetCatalog::resolve("IDR=X").unwrap().name, "USD/IDR");
        assert!(matches!(
            AssetCatalog::resolve("DOGE"),
            Err(MarketDataError::UnknownAsset { .. })
        ));
    }

    #[test]
    fn test_every_category_has_assets() {
        for category in AssetCatalog::categories() {
            assert!(!category.assets.is_empty(), "{} is empty", category.name);
        }
        assert!(AssetCatalog::category("forex").is_some());
        assert_eq!(AssetCatalog::default_asset().symbol, "BTC-USD");
    }
}
