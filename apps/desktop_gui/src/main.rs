mod backend_bridge;
mod controller;
mod settings;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;

use backend_bridge::commands::StoreCommand;
use controller::events::UiEvent;
use ui::app::AdminApp;

/// Employee administration desktop client.
#[derive(Debug, Parser)]
#[command(name = "employee-admin")]
struct Args {
    /// Store project base URL (overrides admin.toml and STORE_URL).
    #[arg(long)]
    store_url: Option<String>,

    /// Store API key (overrides admin.toml and STORE_API_KEY).
    #[arg(long)]
    api_key: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let settings = settings::load_settings(args.store_url, args.api_key);
    tracing::info!(store_url = %settings.store_url, "starting employee admin");

    let (cmd_tx, cmd_rx) = bounded::<StoreCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings.store_config(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Employee Admin")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Employee Admin",
        options,
        Box::new(|_cc| Ok(Box::new(AdminApp::new(cmd_tx, ui_rx)))),
    )
}
