mod backend_bridge;
mod controller;
mod ui;

use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use crossbeam_channel::bounded;
use directory_client::{load_settings, EmployeeApi, HttpEmployeeApi};
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::DirectoryApp;

#[derive(Parser, Debug)]
#[command(name = "directory_gui", about = "Employee directory desktop client")]
struct Args {
    /// Overrides the configured employees API base URL.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings().with_api_base_url(args.api_url);
    let api = HttpEmployeeApi::from_settings(&settings).context("invalid client settings")?;
    let api_base_url = api.base_url().to_string();
    tracing::info!(api_base_url = %api_base_url, "starting employee directory");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let api: Arc<dyn EmployeeApi> = Arc::new(api);
    backend_bridge::runtime::launch(api, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Employee Directory")
            .with_inner_size([1080.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Employee Directory",
        options,
        Box::new(move |_cc| Ok(Box::new(DirectoryApp::new(cmd_tx, ui_rx, api_base_url)))),
    )
    .map_err(|err| anyhow!("failed to open the directory window: {err}"))
}
