use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use wallet_core::{load_settings, ResolvedConfig};

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::{commands::BackendCommand, runtime};
use controller::events::UiEvent;
use ui::MintGuiApp;

#[derive(Parser, Debug)]
#[command(name = "mint_gui", about = "Tokenizados bonus NFT mint page")]
struct Args {
    /// Settings file; defaults to ./mint.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(args: &Args) -> anyhow::Result<ResolvedConfig> {
    load_settings(args.config.as_deref())?.resolve()
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(&args).map_err(|err| format!("{err:#}"));

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(config, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Tokenizados Mint")
            .with_inner_size([960.0, 760.0])
            .with_min_inner_size([560.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Tokenizados Mint",
        options,
        Box::new(|_cc| Ok(Box::new(MintGuiApp::new(cmd_tx, ui_rx)))),
    )
}
