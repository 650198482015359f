//! UI/backend events and error modeling for the mint GUI controller.

use shared::{deployment::Deployment, domain::ConnectorDescriptor};
use wallet_core::MintFlowState;

pub enum UiEvent {
    /// Backend built the wallet stack; the registry and deployment are fixed
    /// from here on.
    Ready {
        connectors: Vec<ConnectorDescriptor>,
        deployment: Deployment,
    },
    Info(String),
    FlowChanged(MintFlowState),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Mint,
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Startup failures leave the panel without a wallet backend and cannot
    /// be dismissed.
    pub fn is_fatal_for_session(&self) -> bool {
        self.context == UiErrorContext::BackendStartup
    }

    pub fn banner_text(&self) -> String {
        match self.context {
            UiErrorContext::BackendStartup => {
                format!("No se pudo iniciar el cliente de wallet: {}", self.message)
            }
            UiErrorContext::Mint => format!("Error en la transacción: {}", self.message),
        }
    }
}
