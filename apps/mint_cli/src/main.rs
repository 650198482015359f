use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shared::domain::ConnectorId;
use tracing_subscriber::EnvFilter;
use wallet_core::{build_mint_controller, load_settings, select_connector, MintStatus};

#[derive(Parser, Debug)]
#[command(name = "mint_cli", about = "Headless bonus NFT minting against a JSON-RPC wallet")]
struct Args {
    /// Settings file; defaults to ./mint.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the configured wallet connectors.
    Connectors,
    /// Connect a wallet and submit one safeMint transaction.
    Mint {
        #[arg(long)]
        connector: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let args = Args::parse();

    let config = load_settings(args.config.as_deref())?
        .resolve()
        .context("invalid mint settings")?;

    match args.command {
        Command::Connectors => {
            let descriptors: Vec<_> = config
                .connectors
                .iter()
                .map(|entry| entry.descriptor.clone())
                .collect();
            let preferred = select_connector(&descriptors).map(|d| d.id.clone());
            for entry in &config.connectors {
                let marker = if Some(&entry.descriptor.id) == preferred.as_ref() {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{marker} {:<16} {:<20} {:<9} {}",
                    entry.descriptor.id.as_str(),
                    entry.descriptor.name,
                    entry.descriptor.kind.label(),
                    entry.endpoint
                );
            }
        }
        Command::Mint { connector } => {
            let connector = connector.map(ConnectorId::new).transpose()?;
            let controller = build_mint_controller(&config)?;

            let state = controller.connect(connector).await;
            if let Some(notice) = state.notice() {
                bail!(notice.message());
            }
            if let Some(session) = state.session() {
                println!(
                    "Wallet conectada: {} ({})",
                    session.account.short(),
                    session.connector.name
                );
            }

            let state = controller.mint().await?;
            match (state.status(), state.tx_hash()) {
                (MintStatus::Success, Some(tx_hash)) => {
                    println!("NFT Minteado! tx={}", tx_hash.as_str());
                    println!(
                        "Ver en {}: {}",
                        config.deployment.explorer_name,
                        config.deployment.explorer_tx_url(tx_hash)
                    );
                }
                _ => match state.notice() {
                    Some(notice) => bail!(notice.message()),
                    None => bail!("mint ended in unexpected state {:?}", state.status()),
                },
            }
        }
    }

    Ok(())
}
