//! Wallet connector speaking EIP-1193 requests as JSON-RPC 2.0 over HTTP.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use shared::{
    domain::{Address, ConnectorDescriptor, TxHash},
    error::ErrorCode,
    protocol::{
        decode_quantity, encode_quantity, methods, JsonRpcRequest, JsonRpcResponse,
        SwitchChainParams, TransactionRequest,
    },
};
use tracing::debug;
use url::Url;

use crate::{error::WalletError, WalletConnector};

pub struct JsonRpcConnector {
    descriptor: ConnectorDescriptor,
    endpoint: Url,
    http: Client,
    next_id: AtomicU64,
}

impl JsonRpcConnector {
    pub fn new(
        descriptor: ConnectorDescriptor,
        endpoint: Url,
        timeout: Duration,
    ) -> Result<Self, WalletError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            descriptor,
            endpoint,
            http,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, WalletError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(connector = %self.descriptor.id, method, id, "wallet rpc request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&JsonRpcRequest::new(id, method, params))
            .send()
            .await?;
        let status = response.status();
        let body = match response.json::<JsonRpcResponse>().await {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(WalletError::Transport(format!(
                    "{method} returned HTTP {status}"
                )));
            }
            Err(err) => {
                return Err(WalletError::InvalidResponse(format!("{method}: {err}")));
            }
        };

        if let Some(error) = body.error {
            debug!(method, code = error.code, "wallet rpc error");
            return Err(WalletError::Rejected {
                code: error.error_code(),
                message: error.message,
            });
        }

        let result = body.result.ok_or_else(|| {
            WalletError::InvalidResponse(format!("{method}: response has neither result nor error"))
        })?;
        serde_json::from_value(result)
            .map_err(|err| WalletError::InvalidResponse(format!("{method}: {err}")))
    }
}

#[async_trait]
impl WalletConnector for JsonRpcConnector {
    fn descriptor(&self) -> &ConnectorDescriptor {
        &self.descriptor
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let raw: Vec<String> = self.call(methods::REQUEST_ACCOUNTS, json!([])).await?;
        raw.iter()
            .map(|account| {
                Address::parse(account).map_err(|err| {
                    WalletError::InvalidResponse(format!("{}: {err}", methods::REQUEST_ACCOUNTS))
                })
            })
            .collect()
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        let raw: String = self.call(methods::CHAIN_ID, json!([])).await?;
        decode_quantity(&raw)
            .map_err(|err| WalletError::InvalidResponse(format!("{}: {err}", methods::CHAIN_ID)))
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        let params = SwitchChainParams {
            chain_id: encode_quantity(chain_id),
        };
        let _: Value = self.call(methods::SWITCH_CHAIN, json!([params])).await?;
        Ok(())
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, WalletError> {
        let raw: String = self
            .call(methods::SEND_TRANSACTION, json!([request]))
            .await?;
        TxHash::new(raw).map_err(|err| {
            WalletError::InvalidResponse(format!("{}: {err}", methods::SEND_TRANSACTION))
        })
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        let revoked: Result<Value, WalletError> = self
            .call(methods::REVOKE_PERMISSIONS, json!([{ "eth_accounts": {} }]))
            .await;
        match revoked {
            Ok(_) => Ok(()),
            // Older wallets cannot revoke; forgetting the session locally is enough.
            Err(WalletError::Rejected {
                code: ErrorCode::UnsupportedMethod,
                ..
            }) => Ok(()),
            Err(err) => Err(err),
        }
    }
}
