//! Hands panel actions to the wallet worker without blocking the frame.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Why a panel action never reached the wallet worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueRejection {
    /// The worker is still busy with earlier clicks.
    Busy { action: &'static str },
    /// The worker is gone; only a restart brings it back.
    WorkerGone,
}

impl QueueRejection {
    pub fn status_text(&self) -> String {
        match self {
            Self::Busy { action } => {
                format!("Hay acciones pendientes; no se pudo {action}. Inténtalo de nuevo.")
            }
            Self::WorkerGone => {
                "El cliente de wallet no está disponible; reinicia la aplicación".to_string()
            }
        }
    }
}

pub fn submit_action(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), QueueRejection> {
    let action = cmd.action();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(action, "panel action queued");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(action, "wallet worker queue is full");
            Err(QueueRejection::Busy { action })
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(action, "wallet worker is gone");
            Err(QueueRejection::WorkerGone)
        }
    }
}
