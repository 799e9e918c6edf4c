//! Momentum indicator and direction label columns.
//!
//! Both functions return one entry per input row. `None` marks rows where the
//! value is undefined (indicator warm-up, final row without a next close) and
//! must be dropped before training.

use anyhow::{Result, anyhow};
use ta::Next;
use ta::indicators::SimpleMovingAverage;

pub const DEFAULT_RSI_PERIOD: usize = 14;

// Rolling sums inside the SMA can leave rounding residue where the exact mean is 0.
const ZERO_TOLERANCE: f64 = 1e-9;

/// Relative Strength Index over simple rolling means of gains and losses.
///
/// Row `i` (for `i >= period`) averages the `period` most recent
/// close-to-close deltas: `rs = mean(gains) / mean(losses)` and
/// `rsi = 100 - 100 / (1 + rs)`. A window with gains but no losses is 100;
/// a flat window (no gains, no losses) is undefined.
pub fn relative_strength_index(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    let mut avg_gain = SimpleMovingAverage::new(period)
        .map_err(|e| anyhow!("Invalid RSI period {}: {:?}", period, e))?;
    let mut avg_loss = SimpleMovingAverage::new(period)
        .map_err(|e| anyhow!("Invalid RSI period {}: {:?}", period, e))?;

    let mut values = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return Ok(values);
    }
    values.push(None);

    for (i, pair) in closes.windows(2).enumerate() {
        let delta = pair[1] - pair[0];
        let gain = avg_gain.next(delta.max(0.0)).max(0.0);
        let loss = avg_loss.next((-delta).max(0.0)).max(0.0);

        // `i + 1` deltas seen so far; the window is full once it reaches `period`.
        if i + 1 < period {
            values.push(None);
            continue;
        }

        values.push(rsi_from_means(gain, loss));
    }

    Ok(values)
}

fn rsi_from_means(gain: f64, loss: f64) -> Option<f64> {
    let scale = 1.0 + gain.max(loss);
    let gain_is_zero = gain <= ZERO_TOLERANCE * scale;
    let loss_is_zero = loss <= ZERO_TOLERANCE * scale;

    match (gain_is_zero, loss_is_zero) {
        (true, true) => None,
        (false, true) => Some(100.0),
        (true, false) => Some(0.0),
        (false, false) => {
            let rs = gain / loss;
            Some(100.0 - 100.0 / (1.0 + rs))
        }
    }
}

/// Next-period direction label: `1` when the next close is higher, else `0`.
/// The final row has no next close and is `None`.
pub fn direction_labels(closes: &[f64]) -> Vec<Option<u32>> {
    let mut labels: Vec<Option<u32>> = closes
        .windows(2)
        .map(|pair| Some(u32::from(pair[1] > pair[0])))
        .collect();
    if !closes.is_empty() {
        labels.push(None);
    }
    labels
}

/// Qualitative reading of an RSI value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    pub const OVERBOUGHT: f64 = 70.0;
    pub const OVERSOLD: f64 = 30.0;

    pub fn classify(rsi: f64) -> Self {
        if rsi > Self::OVERBOUGHT {
            RsiZone::Overbought
        } else if rsi < Self::OVERSOLD {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RsiZone::Overbought => "Overbought",
            RsiZone::Oversold => "Oversold",
            RsiZone::Neutral => "Neutral",
        }
    }
}
