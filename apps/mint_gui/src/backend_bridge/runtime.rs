//! Backend worker: owns the tokio runtime and the mint flow controller,
//! turns queued UI commands into controller calls and forwards every state
//! change back to the UI.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::sync::broadcast::error::RecvError;
use wallet_core::{build_mint_controller, MintFlowController, ResolvedConfig};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    config: Result<ResolvedConfig, String>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || run_backend(config, cmd_rx, ui_tx));
}

fn send_ui(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => tracing::warn!("ui event queue full; dropping event"),
        Err(TrySendError::Disconnected(_)) => tracing::debug!("ui closed; dropping event"),
    }
}

fn startup_failure(ui_tx: &Sender<UiEvent>, message: String) {
    tracing::error!("wallet backend startup failure: {message}");
    send_ui(
        ui_tx,
        UiEvent::Error(UiError::from_message(UiErrorContext::BackendStartup, message)),
    );
}

fn run_backend(
    config: Result<ResolvedConfig, String>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    send_ui(&ui_tx, UiEvent::Info("Backend worker starting...".to_string()));
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            startup_failure(&ui_tx, format!("failed to build runtime: {err}"));
            return;
        }
    };

    runtime.block_on(async move {
        let config = match config {
            Ok(config) => config,
            Err(err) => {
                startup_failure(&ui_tx, err);
                return;
            }
        };
        let controller = match build_mint_controller(&config) {
            Ok(controller) => Arc::new(controller),
            Err(err) => {
                startup_failure(&ui_tx, err.to_string());
                return;
            }
        };

        let mut states = controller.subscribe();
        let state_tx = ui_tx.clone();
        tokio::spawn(async move {
            loop {
                match states.recv().await {
                    Ok(state) => send_ui(&state_tx, UiEvent::FlowChanged(state)),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "ui lagged behind flow state updates");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        send_ui(
            &ui_tx,
            UiEvent::Ready {
                connectors: controller.connectors(),
                deployment: config.deployment.clone(),
            },
        );
        tracing::info!(
            network = %config.deployment.network_name,
            contract = %config.deployment.contract_address,
            connectors = config.connectors.len(),
            "wallet backend ready"
        );

        while let Ok(cmd) = cmd_rx.recv() {
            let controller = Arc::clone(&controller);
            let ui_tx = ui_tx.clone();
            tokio::spawn(async move { handle_command(&controller, cmd, &ui_tx).await });
        }
        tracing::debug!("ui command queue closed; backend worker exiting");
    });
}

async fn handle_command(
    controller: &MintFlowController,
    cmd: BackendCommand,
    ui_tx: &Sender<UiEvent>,
) {
    match cmd {
        BackendCommand::Connect { connector } => {
            controller.connect(connector).await;
        }
        BackendCommand::Mint => {
            if let Err(err) = controller.mint().await {
                send_ui(
                    ui_tx,
                    UiEvent::Error(UiError::from_message(UiErrorContext::Mint, err.to_string())),
                );
            }
        }
        BackendCommand::Disconnect => {
            controller.disconnect().await;
        }
    }
}
