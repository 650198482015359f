//! Backend commands queued from UI to backend worker.

use shared::domain::ConnectorId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    /// `None` lets the backend pick the default connector.
    Connect { connector: Option<ConnectorId> },
    Mint,
    Disconnect,
}

impl BackendCommand {
    /// Spanish verb for the action, as shown in status messages.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "conectar",
            Self::Mint => "mintear",
            Self::Disconnect => "desconectar",
        }
    }
}
