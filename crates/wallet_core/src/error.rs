use shared::{abi::AbiError, domain::ConnectorId, error::ErrorCode};
use thiserror::Error;

/// Failures raised by connectors, the session manager and the contract gateway.
#[derive(Debug, Clone, Error)]
pub enum WalletError {
    #[error("no compatible wallet connector is registered")]
    NoCompatibleWallet,
    #[error("unknown connector '{0}'")]
    UnknownConnector(ConnectorId),
    /// The wallet answered with a JSON-RPC error; the message is kept verbatim.
    #[error("{message}")]
    Rejected { code: ErrorCode, message: String },
    #[error("wallet endpoint unreachable: {0}")]
    Transport(String),
    #[error("invalid wallet response: {0}")]
    InvalidResponse(String),
    #[error("wallet returned no accounts")]
    NoAccounts,
    #[error("no wallet session is active")]
    NotConnected,
    #[error(transparent)]
    Abi(#[from] AbiError),
    #[error("wallet is on chain {actual}, expected chain {expected}")]
    ChainMismatch { expected: u64, actual: u64 },
}

impl WalletError {
    pub fn is_user_rejection(&self) -> bool {
        matches!(
            self,
            Self::Rejected {
                code: ErrorCode::UserRejected,
                ..
            }
        )
    }
}

impl From<reqwest::Error> for WalletError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

/// Precondition violations of the mint flow. These never reach the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MintFlowError {
    #[error("mint requires a connected wallet")]
    NotConnected,
    #[error("a mint transaction is already pending")]
    MintInFlight,
}

/// User-visible outcome of a failed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoCompatibleWallet,
    ConnectRejected(String),
    MintRejected(String),
}

impl Notice {
    /// Blocking notices are shown as a dialog that must be acknowledged;
    /// the rest render inline in the mint panel.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::NoCompatibleWallet | Self::MintRejected(_))
    }

    pub fn message(&self) -> String {
        match self {
            Self::NoCompatibleWallet => "No se encontró ninguna wallet compatible.".to_string(),
            Self::ConnectRejected(reason) => format!("Error al conectar la wallet: {reason}"),
            Self::MintRejected(reason) => format!("Error en la transacción: {reason}"),
        }
    }
}
