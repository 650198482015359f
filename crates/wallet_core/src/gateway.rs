use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    abi::{encode_call, find_function},
    domain::TxHash,
    protocol::{encode_quantity, TransactionRequest},
};
use tracing::{debug, info};

use crate::{
    error::WalletError, session::WalletSessionManager, ContractCall, ContractGateway,
    WalletConnector,
};

/// Sends contract calls as `eth_sendTransaction` through the connector that
/// owns the active session, switching the wallet to the target chain first.
pub struct WalletContractGateway {
    sessions: Arc<WalletSessionManager>,
    chain_id: u64,
}

impl WalletContractGateway {
    pub fn new(sessions: Arc<WalletSessionManager>, chain_id: u64) -> Self {
        Self { sessions, chain_id }
    }

    async fn ensure_chain(&self, connector: &dyn WalletConnector) -> Result<(), WalletError> {
        let current = connector.chain_id().await?;
        if current == self.chain_id {
            return Ok(());
        }

        info!(
            from = current,
            to = self.chain_id,
            "asking wallet to switch chain"
        );
        connector.switch_chain(self.chain_id).await?;

        let switched = connector.chain_id().await?;
        if switched != self.chain_id {
            return Err(WalletError::ChainMismatch {
                expected: self.chain_id,
                actual: switched,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContractGateway for WalletContractGateway {
    async fn call_function(&self, call: ContractCall) -> Result<TxHash, WalletError> {
        let function = find_function(&call.interface, &call.function_name)?;
        let calldata = encode_call(function, &call.args)?;

        let (session, connector) = self
            .sessions
            .active_connector()
            .await
            .ok_or(WalletError::NotConnected)?;
        self.ensure_chain(connector.as_ref()).await?;

        let request = TransactionRequest {
            from: session.account,
            to: call.contract_address,
            data: format!("0x{}", hex::encode(calldata)),
            value: encode_quantity(0),
            chain_id: Some(encode_quantity(self.chain_id)),
        };
        debug!(
            function = %function.signature(),
            to = %request.to,
            "sending contract call"
        );
        connector.send_transaction(request).await
    }
}
