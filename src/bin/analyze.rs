//! Trader Sentinel headless analysis
//!
//! Runs the fetch -> RSI -> random forest pipeline once for a single asset and
//! prints the result. No window is opened.
//!
//! # Usage
//! ```sh
//! cargo run --bin analyze -- --asset Gold --timeframe 1d --years 3
//! cargo run --bin analyze -- --list
//! MODE=mock cargo run --bin analyze -- --asset BTC-USD --json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::prelude::ToPrimitive;
use trader_sentinel::application::analysis::{AnalysisOutcome, AnalysisReport, AnalysisRequest};
use trader_sentinel::application::market_data::indicators::RsiZone;
use trader_sentinel::application::system::Application;
use trader_sentinel::config::Config;
use trader_sentinel::domain::market::asset_catalog::AssetCatalog;
use trader_sentinel::domain::market::lookback::LookbackPeriod;
use trader_sentinel::domain::market::timeframe::Timeframe;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Asset display name or provider symbol (e.g. "Gold" or "GC=F")
    #[arg(long, default_value = "BTC-USD")]
    asset: String,

    /// Candle interval: 1h, 1d or 1wk
    #[arg(long, default_value = "1d")]
    timeframe: Timeframe,

    /// Years of history to fetch (1-5)
    #[arg(long, default_value_t = 2)]
    years: u8,

    /// Print the asset catalog and exit
    #[arg(long)]
    list: bool,

    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if args.list {
        print_catalog();
        return Ok(());
    }

    // Logs go to stderr so stdout carries only the report
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    info!("Trader Sentinel analyze {}", env!("CARGO_PKG_VERSION"));

    let asset = AssetCatalog::resolve(&args.asset)?;
    let lookback = LookbackPeriod::years(args.years)?;
    let request = AnalysisRequest::for_asset(1, asset, args.timeframe, lookback);

    let config = Config::from_env().context("Failed to load config")?;
    let app = Application::build(config)?;
    let report = app.analysis_service.analyze(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, app.analysis_service.settings().rsi_period);
    }

    Ok(())
}

fn print_catalog() {
    for category in AssetCatalog::categories() {
        println!("{}", category.name);
        for asset in category.assets {
            println!("  {:<20} {}", asset.name, asset.symbol);
        }
    }
}

fn print_summary(report: &AnalysisReport, rsi_period: usize) {
    let request = &report.request;
    println!("{} ({})", request.name, request.symbol);
    println!(
        "  Timeframe:   {} / lookback {}",
        request.timeframe.display_name(),
        request.lookback
    );
    println!("  Candles:     {}", report.candles.len());

    if let Some(snapshot) = &report.snapshot {
        let price = snapshot.last_close.to_f64().unwrap_or(0.0);
        match snapshot.change_pct().and_then(|d| d.to_f64()) {
            Some(pct) => println!("  Price:       {:.4} ({:+.2}%)", price, pct),
            None => println!("  Price:       {:.4}", price),
        }
    }

    match report.latest_rsi {
        Some(rsi) => println!(
            "  RSI({}):     {:.2} ({})",
            rsi_period,
            rsi,
            RsiZone::classify(rsi).label()
        ),
        None => println!("  RSI({}):     N/A", rsi_period),
    }

    match &report.outcome {
        AnalysisOutcome::Predicted(prediction) => {
            println!(
                "  Prediction for {}: {} (confidence {:.2}%)",
                request.timeframe.horizon_label(),
                prediction.direction,
                prediction.confidence_pct()
            );
        }
        AnalysisOutcome::InsufficientData { rows, required } => {
            println!(
                "  Not enough data: {} usable rows, more than {} required",
                rows, required
            );
        }
    }
    println!(
        "  Model:       {} ({} training rows, {} ms)",
        report.model_name, report.training_rows, report.elapsed_ms
    );
    println!("  Note: this is a technical prediction, not financial advice.");
}
