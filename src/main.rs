use trader_sentinel::application::agents::user_agent::UserAgent;
use trader_sentinel::application::client::SystemClient;
use trader_sentinel::application::system::Application;
use trader_sentinel::config::Config;

use anyhow::Context;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

// A writer that sends logs to the UI via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).trim_end().to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// Cloneable wrapper for MakeWriter
#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 0. Load Env (before starting anything)
    dotenvy::dotenv().ok();

    // 1. Create Log Channel
    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    // 2. Setup Logging (Stdout + UI)
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .pretty();

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false) // No color codes for UI text
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    info!("Initializing Trader Sentinel...");

    // 3. Config errors are fatal before any thread is spawned
    let config = Config::from_env().context("Failed to load config")?;

    // 4. Create Tokio Runtime in a background thread
    let (system_tx, system_rx) = crossbeam_channel::bounded(1);

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Failed to build Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async move {
            info!("Background Runtime Started.");

            let app = match Application::build(config) {
                Ok(app) => app,
                Err(e) => {
                    tracing::error!("Failed to build application: {}", e);
                    return;
                }
            };

            match app.start().await {
                Ok(handle) => {
                    let _ = system_tx.send(handle);
                    info!("Analysis System Running.");
                    // The worker is detached; the runtime must outlive the UI.
                    std::future::pending::<()>().await;
                }
                Err(e) => {
                    tracing::error!("Failed to start application: {}", e);
                }
            }
        });
    });

    // 5. Wait for System Handle
    info!("Waiting for System to boot...");
    let system_handle = system_rx
        .recv()
        .context("Failed to receive system handle (did background thread panic?)")?;
    info!("System Connected. Launching UI.");

    // 6. Initialize User Agent and run the default selection once
    let client = SystemClient::new(system_handle, log_rx);
    let mut agent = UserAgent::new(client);
    agent.submit_analysis();

    // 7. Run UI (Blocks Main Thread)
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title("Trader Sentinel"),
        ..Default::default()
    };

    eframe::run_native(
        "Trader Sentinel",
        native_options,
        Box::new(|cc| {
            trader_sentinel::interfaces::ui::configure_fonts(&cc.egui_ctx);
            Ok(Box::new(agent))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
