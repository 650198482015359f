use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    abi::{AbiValue, FunctionDescriptor},
    domain::{Address, ConnectorDescriptor, ConnectorId, Session, TxHash},
    protocol::TransactionRequest,
};

pub mod connector;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod json_rpc;
pub mod session;
pub mod settings;

pub use connector::select_connector;
pub use error::{MintFlowError, Notice, WalletError};
pub use flow::{AttemptId, MintFlowController, MintFlowState, MintStatus};
pub use gateway::WalletContractGateway;
pub use json_rpc::JsonRpcConnector;
pub use session::WalletSessionManager;
pub use settings::{load_settings, ResolvedConfig, ResolvedConnector, Settings};

/// One wallet backend: a browser-style injected provider, a mobile bridge,
/// or anything else that speaks the EIP-1193 request set.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    fn descriptor(&self) -> &ConnectorDescriptor;
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;
    async fn chain_id(&self) -> Result<u64, WalletError>;
    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError>;
    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, WalletError>;
    async fn disconnect(&self) -> Result<(), WalletError>;
}

/// Tracks the connected account and the registry of available connectors.
#[async_trait]
pub trait SessionManager: Send + Sync {
    fn list_connectors(&self) -> Vec<ConnectorDescriptor>;
    async fn connect(&self, connector: &ConnectorId) -> Result<Session, WalletError>;
    async fn disconnect(&self) -> Result<(), WalletError>;
    async fn current_session(&self) -> Option<Session>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContractCall {
    pub contract_address: Address,
    pub interface: Vec<FunctionDescriptor>,
    pub function_name: String,
    pub args: Vec<AbiValue>,
}

/// Submits state-changing contract calls on behalf of the active session.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    async fn call_function(&self, call: ContractCall) -> Result<TxHash, WalletError>;
}

/// Wires JSON-RPC connectors, the session manager and the gateway into a
/// controller for the configured deployment.
pub fn build_mint_controller(config: &ResolvedConfig) -> Result<MintFlowController, WalletError> {
    let mut connectors: Vec<Arc<dyn WalletConnector>> = Vec::with_capacity(config.connectors.len());
    for entry in &config.connectors {
        connectors.push(Arc::new(JsonRpcConnector::new(
            entry.descriptor.clone(),
            entry.endpoint.clone(),
            config.rpc_timeout,
        )?));
    }

    let sessions = Arc::new(WalletSessionManager::new(connectors));
    let gateway = Arc::new(WalletContractGateway::new(
        Arc::clone(&sessions),
        config.deployment.chain_id,
    ));
    Ok(MintFlowController::new(sessions, gateway, &config.deployment))
}

#[cfg(test)]
#[path = "tests/connector_tests.rs"]
mod connector_tests;

#[cfg(test)]
#[path = "tests/flow_tests.rs"]
mod flow_tests;

#[cfg(test)]
#[path = "tests/json_rpc_tests.rs"]
mod json_rpc_tests;

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod settings_tests;
