use crate::application::analysis::{AnalysisOutcome, AnalysisReport};
use crate::application::market_data::indicators::RsiZone;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::ml::prediction::Direction;
use crate::domain::trading::types::PriceSnapshot;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use rust_decimal::prelude::ToPrimitive;

pub const DISCLAIMER: &str = "Note: this is a technical prediction, not financial advice.";

pub struct PriceMetrics {
    pub price_text: String,
    /// "+1.23%" style day-over-day change, `None` without a previous close
    pub change_text: Option<String>,
    pub change_color: egui::Color32,
    pub arrow: &'static str,
}

pub struct RsiMetrics {
    pub value_text: String,
    pub zone_label: &'static str,
    pub color: egui::Color32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutKind {
    Success,
    Error,
    Warning,
}

pub struct PredictionCallout {
    pub kind: CalloutKind,
    pub headline: String,
    pub detail: String,
}

impl PredictionCallout {
    pub fn color(&self) -> egui::Color32 {
        match self.kind {
            CalloutKind::Success => DesignSystem::SUCCESS,
            CalloutKind::Error => DesignSystem::DANGER,
            CalloutKind::Warning => DesignSystem::WARNING,
        }
    }
}

pub struct DashboardViewModel;

impl DashboardViewModel {
    pub fn price_metrics(snapshot: Option<&PriceSnapshot>) -> PriceMetrics {
        let Some(snapshot) = snapshot else {
            return PriceMetrics {
                price_text: "N/A".to_string(),
                change_text: None,
                change_color: DesignSystem::TEXT_MUTED,
                arrow: "",
            };
        };

        let price = snapshot.last_close.to_f64().unwrap_or(0.0);
        let change_pct = snapshot.change_pct().and_then(|d| d.to_f64());
        let is_positive = change_pct.is_none_or(|pct| pct >= 0.0);

        PriceMetrics {
            price_text: Self::format_price(price),
            change_text: change_pct.map(|pct| format!("{:+.2}%", pct)),
            change_color: match change_pct {
                None => DesignSystem::TEXT_MUTED,
                Some(_) if is_positive => DesignSystem::SUCCESS,
                Some(_) => DesignSystem::DANGER,
            },
            arrow: match change_pct {
                None => "",
                Some(_) if is_positive => "↗",
                Some(_) => "↘",
            },
        }
    }

    pub fn rsi_metrics(rsi: Option<f64>) -> RsiMetrics {
        match rsi {
            Some(value) => {
                let zone = RsiZone::classify(value);
                RsiMetrics {
                    value_text: format!("{:.2}", value),
                    zone_label: zone.label(),
                    color: match zone {
                        RsiZone::Overbought => DesignSystem::DANGER,
                        RsiZone::Oversold => DesignSystem::SUCCESS,
                        RsiZone::Neutral => DesignSystem::TEXT_PRIMARY,
                    },
                }
            }
            None => RsiMetrics {
                value_text: "N/A".to_string(),
                zone_label: "Warming up",
                color: DesignSystem::TEXT_MUTED,
            },
        }
    }

    pub fn prediction_callout(report: &AnalysisReport) -> PredictionCallout {
        let timeframe = report.request.timeframe;
        match &report.outcome {
            AnalysisOutcome::Predicted(prediction) => PredictionCallout {
                kind: match prediction.direction {
                    Direction::Up => CalloutKind::Success,
                    Direction::Down => CalloutKind::Error,
                },
                headline: Self::headline(timeframe, prediction.direction),
                detail: format!("Model confidence: {:.2}%", prediction.confidence_pct()),
            },
            AnalysisOutcome::InsufficientData { rows, required } => PredictionCallout {
                kind: CalloutKind::Warning,
                headline: "Not enough data to train the model".to_string(),
                detail: format!(
                    "{} usable rows, more than {} required. Try a longer lookback.",
                    rows, required
                ),
            },
        }
    }

    pub fn headline(timeframe: Timeframe, direction: Direction) -> String {
        let icon = match direction {
            Direction::Up => "🚀",
            Direction::Down => "📉",
        };
        format!(
            "PREDICTION FOR {}: {} {}",
            timeframe.horizon_label().to_uppercase(),
            direction,
            icon
        )
    }

    /// Large prices get thousands separators, sub-unit quotes keep more precision.
    pub fn format_price(price: f64) -> String {
        if price.abs() < 1.0 {
            return format!("{:.4}", price);
        }
        let fixed = format!("{:.2}", price.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if price < 0.0 { "-" } else { "" };
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::analysis::AnalysisRequest;
    use crate::domain::market::asset_catalog::AssetCatalog;
    use crate::domain::market::lookback::LookbackPeriod;
    use crate::domain::ml::prediction::Prediction;
    use rust_decimal_macros::dec;

    fn report(timeframe: Timeframe, outcome: AnalysisOutcome) -> AnalysisReport {
        AnalysisReport {
            request: AnalysisRequest::for_asset(
                1,
                AssetCatalog::default_asset(),
                timeframe,
                LookbackPeriod::default(),
            ),
            candles: Vec::new(),
            snapshot: None,
            latest_rsi: Some(55.0),
            training_rows: 700,
            outcome,
            model_name: "test".to_string(),
            elapsed_ms: 3,
        }
    }

    #[test]
    fn test_up_prediction_is_success_with_two_decimals() {
        let r = report(
            Timeframe::OneDay,
            AnalysisOutcome::Predicted(Prediction {
                direction: Direction::Up,
                probability: 0.61234,
            }),
        );
        let callout = DashboardViewModel::prediction_callout(&r);

        assert_eq!(callout.kind, CalloutKind::Success);
        assert_eq!(callout.headline, "PREDICTION FOR TOMORROW: UP 🚀");
        assert_eq!(callout.detail, "Model confidence: 61.23%");
        assert_eq!(callout.color(), DesignSystem::SUCCESS);
    }

    #[test]
    fn test_down_prediction_wording_follows_timeframe() {
        let r = report(
            Timeframe::OneHour,
            AnalysisOutcome::Predicted(Prediction {
                direction: Direction::Down,
                probability: 0.5,
            }),
        );
        let callout = DashboardViewModel::prediction_callout(&r);

        assert_eq!(callout.kind, CalloutKind::Error);
        assert_eq!(callout.headline, "PREDICTION FOR NEXT HOUR: DOWN 📉");
        assert_eq!(callout.detail, "Model confidence: 50.00%");
    }

    #[test]
    fn test_insufficient_data_is_a_warning() {
        let r = report(
            Timeframe::OneWeek,
            AnalysisOutcome::InsufficientData {
                rows: 40,
                required: 50,
            },
        );
        let callout = DashboardViewModel::prediction_callout(&r);
        assert_eq!(callout.kind, CalloutKind::Warning);
        assert!(callout.detail.contains("40 usable rows"));
    }

    #[test]
    fn test_price_metrics_change() {
        let snapshot = PriceSnapshot {
            last_close: dec!(42500.50),
            previous_close: Some(dec!(42000)),
            timestamp: 0,
        };
        let metrics = DashboardViewModel::price_metrics(Some(&snapshot));
        assert_eq!(metrics.price_text, "42,500.50");
        assert_eq!(metrics.change_text.as_deref(), Some("+1.19%"));
        assert_eq!(metrics.change_color, DesignSystem::SUCCESS);

        let falling = PriceSnapshot {
            last_close: dec!(99),
            previous_close: Some(dec!(100)),
            timestamp: 0,
        };
        let metrics = DashboardViewModel::price_metrics(Some(&falling));
        assert_eq!(metrics.change_text.as_deref(), Some("-1.00%"));
        assert_eq!(metrics.arrow, "↘");

        let first = PriceSnapshot {
            last_close: dec!(1.5),
            previous_close: None,
            timestamp: 0,
        };
        assert!(DashboardViewModel::price_metrics(Some(&first)).change_text.is_none());
        assert_eq!(DashboardViewModel::price_metrics(None).price_text, "N/A");
    }

    #[test]
    fn test_rsi_zones() {
        assert_eq!(DashboardViewModel::rsi_metrics(Some(75.0)).zone_label, "Overbought");
        assert_eq!(DashboardViewModel::rsi_metrics(Some(25.0)).zone_label, "Oversold");
        let neutral = DashboardViewModel::rsi_metrics(Some(50.0));
        assert_eq!(neutral.zone_label, "Neutral");
        assert_eq!(neutral.value_text, "50.00");
        assert_eq!(DashboardViewModel::rsi_metrics(None).value_text, "N/A");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(DashboardViewModel::format_price(15_523.456), "15,523.46");
        assert_eq!(DashboardViewModel::format_price(999.0), "999.00");
        assert_eq!(DashboardViewModel::format_price(1_000.0), "1,000.00");
        assert_eq!(DashboardViewModel::format_price(0.00654), "0.0065");
    }
}
