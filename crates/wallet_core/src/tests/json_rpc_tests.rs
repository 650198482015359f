use super::*;
use std::{sync::Mutex as StdMutex, time::Duration};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use shared::{
    deployment::{mint_interface, Deployment, DeploymentProfile},
    domain::ConnectorKind,
    error::{ErrorCode, RpcError},
    protocol::{JsonRpcRequest, JsonRpcResponse},
};
use tokio::net::TcpListener;
use url::Url;

const ACCOUNT: &str = "0x1234567890AbcdEF1234567890aBcdef12345678";
const TX_HASH: &str = "0x9f2c5a0d2e4b7c1a3f6e8d0b2c4a6e8f0a1b3c5d7e9f1a2b3c4d5e6f7a8b9c0d";

#[derive(Default)]
struct MockWallet {
    chain_id: u64,
    accounts: Vec<String>,
    reject_send: Option<RpcError>,
    revoke_unsupported: bool,
    requests: Vec<JsonRpcRequest>,
}

type SharedWallet = Arc<StdMutex<MockWallet>>;

impl MockWallet {
    fn on_chain(chain_id: u64) -> Self {
        Self {
            chain_id,
            accounts: vec![ACCOUNT.to_string()],
            ..Self::default()
        }
    }

    fn handle(&mut self, request: &JsonRpcRequest) -> Result<Value, RpcError> {
        match request.method.as_str() {
            "eth_requestAccounts" => Ok(json!(self.accounts)),
            "eth_chainId" => Ok(json!(format!("{:#x}", self.chain_id))),
            "wallet_switchEthereumChain" => {
                let requested = request.params[0]["chainId"]
                    .as_str()
                    .and_then(|raw| u64::from_str_radix(raw.trim_start_matches("0x"), 16).ok())
                    .ok_or_else(|| RpcError::new(ErrorCode::InvalidParams, "bad chainId"))?;
                self.chain_id = requested;
                Ok(Value::Null)
            }
            "eth_sendTransaction" => match &self.reject_send {
                Some(error) => Err(error.clone()),
                None => Ok(json!(TX_HASH)),
            },
            "wallet_revokePermissions" if self.revoke_unsupported => Err(RpcError::new(
                ErrorCode::UnsupportedMethod,
                "The requested method is not supported",
            )),
            "wallet_revokePermissions" => Ok(Value::Null),
            other => Err(RpcError::new(
                ErrorCode::UnsupportedMethod,
                format!("unsupported method {other}"),
            )),
        }
    }

    fn methods(&self) -> Vec<String> {
        self.requests.iter().map(|r| r.method.clone()).collect()
    }
}

async fn rpc(State(wallet): State<SharedWallet>, Json(request): Json<JsonRpcRequest>) -> Json<JsonRpcResponse> {
    let mut wallet = wallet.lock().expect("lock");
    wallet.requests.push(request.clone());
    Json(match wallet.handle(&request) {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(error) => JsonRpcResponse::failure(request.id, error),
    })
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn spawn_wallet(wallet: MockWallet) -> (Url, SharedWallet) {
    let wallet = Arc::new(StdMutex::new(wallet));
    let app = Router::new()
        .route("/", post(rpc))
        .route("/broken", post(broken))
        .with_state(Arc::clone(&wallet));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    let url = Url::parse(&format!("http://{addr}/")).expect("url");
    (url, wallet)
}

fn connector_at(endpoint: Url) -> JsonRpcConnector {
    JsonRpcConnector::new(
        ConnectorDescriptor::new(
            ConnectorId::new("frame").expect("id"),
            "Frame",
            ConnectorKind::Injected,
        ),
        endpoint,
        Duration::from_secs(5),
    )
    .expect("connector")
}

fn mainnet() -> Deployment {
    let profile = DeploymentProfile::BscMainnet;
    Deployment::new(
        profile,
        Address::parse(profile.default_contract_address().expect("mainnet")).expect("contract"),
    )
}

fn mint_call(deployment: &Deployment) -> ContractCall {
    ContractCall {
        contract_address: deployment.contract_address.clone(),
        interface: mint_interface(),
        function_name: "safeMint".to_string(),
        args: vec![shared::abi::address_value(&Address::parse(ACCOUNT).expect("account"))],
    }
}

async fn connected_stack(url: Url) -> (Arc<WalletSessionManager>, WalletContractGateway) {
    let connector: Arc<dyn WalletConnector> = Arc::new(connector_at(url));
    let sessions = Arc::new(WalletSessionManager::new(vec![connector]));
    sessions
        .connect(&ConnectorId::new("frame").expect("id"))
        .await
        .expect("connect");
    let gateway = WalletContractGateway::new(Arc::clone(&sessions), 56);
    (sessions, gateway)
}

#[tokio::test]
async fn connect_uses_first_requested_account() {
    let (url, wallet) = spawn_wallet(MockWallet::on_chain(56)).await;
    let connector: Arc<dyn WalletConnector> = Arc::new(connector_at(url));
    let sessions = WalletSessionManager::new(vec![connector]);

    let session = sessions
        .connect(&ConnectorId::new("frame").expect("id"))
        .await
        .expect("connect");

    assert_eq!(session.account.as_str(), ACCOUNT);
    assert_eq!(session.connector.name, "Frame");
    assert_eq!(sessions.current_session().await, Some(session));
    let wallet = wallet.lock().expect("lock");
    assert_eq!(wallet.methods(), vec!["eth_requestAccounts"]);
    assert_eq!(wallet.requests[0].jsonrpc, "2.0");
}

#[tokio::test]
async fn connect_without_accounts_fails() {
    let mut mock = MockWallet::on_chain(56);
    mock.accounts.clear();
    let (url, _wallet) = spawn_wallet(mock).await;
    let connector: Arc<dyn WalletConnector> = Arc::new(connector_at(url));
    let sessions = WalletSessionManager::new(vec![connector]);

    let err = sessions
        .connect(&ConnectorId::new("frame").expect("id"))
        .await
        .expect_err("no accounts");

    assert!(matches!(err, WalletError::NoAccounts));
    assert!(sessions.current_session().await.is_none());
}

#[tokio::test]
async fn connect_to_unregistered_connector_fails() {
    let sessions = WalletSessionManager::new(Vec::new());
    let err = sessions
        .connect(&ConnectorId::new("metaMask").expect("id"))
        .await
        .expect_err("unknown");
    assert!(matches!(err, WalletError::UnknownConnector(id) if id.as_str() == "metaMask"));
}

#[tokio::test]
async fn mint_call_is_sent_as_safe_mint_transaction() {
    let (url, wallet) = spawn_wallet(MockWallet::on_chain(56)).await;
    let (_sessions, gateway) = connected_stack(url).await;
    let deployment = mainnet();

    let tx_hash = gateway
        .call_function(mint_call(&deployment))
        .await
        .expect("tx");

    assert_eq!(tx_hash.as_str(), TX_HASH);
    let wallet = wallet.lock().expect("lock");
    assert_eq!(
        wallet.methods(),
        vec!["eth_requestAccounts", "eth_chainId", "eth_sendTransaction"]
    );
    let tx = &wallet.requests[2].params[0];
    assert_eq!(tx["from"], ACCOUNT);
    assert_eq!(tx["to"], deployment.contract_address.as_str());
    assert_eq!(tx["value"], "0x0");
    assert_eq!(tx["chainId"], "0x38");
    let data = tx["data"].as_str().expect("data");
    assert!(data.starts_with("0x40d097c3"), "unexpected calldata {data}");
    assert!(data.ends_with(&ACCOUNT[2..].to_ascii_lowercase()));
    assert_eq!(data.len(), 2 + 8 + 64);
}

#[tokio::test]
async fn wallet_on_other_chain_is_switched_before_sending() {
    let (url, wallet) = spawn_wallet(MockWallet::on_chain(1)).await;
    let (_sessions, gateway) = connected_stack(url).await;

    gateway
        .call_function(mint_call(&mainnet()))
        .await
        .expect("tx");

    let wallet = wallet.lock().expect("lock");
    assert_eq!(
        wallet.methods(),
        vec![
            "eth_requestAccounts",
            "eth_chainId",
            "wallet_switchEthereumChain",
            "eth_chainId",
            "eth_sendTransaction",
        ]
    );
    assert_eq!(wallet.requests[2].params[0]["chainId"], "0x38");
    assert_eq!(wallet.chain_id, 56);
}

#[tokio::test]
async fn user_rejection_is_reported_verbatim() {
    let mut mock = MockWallet::on_chain(56);
    mock.reject_send = Some(RpcError::new(ErrorCode::UserRejected, "user rejected"));
    let (url, _wallet) = spawn_wallet(mock).await;
    let (_sessions, gateway) = connected_stack(url).await;

    let err = gateway
        .call_function(mint_call(&mainnet()))
        .await
        .expect_err("rejected");

    assert!(err.is_user_rejection());
    assert_eq!(err.to_string(), "user rejected");
}

#[tokio::test]
async fn gateway_without_session_refuses_to_send() {
    let (url, wallet) = spawn_wallet(MockWallet::on_chain(56)).await;
    let connector: Arc<dyn WalletConnector> = Arc::new(connector_at(url));
    let sessions = Arc::new(WalletSessionManager::new(vec![connector]));
    let gateway = WalletContractGateway::new(sessions, 56);

    let err = gateway
        .call_function(mint_call(&mainnet()))
        .await
        .expect_err("not connected");

    assert!(matches!(err, WalletError::NotConnected));
    assert!(wallet.lock().expect("lock").requests.is_empty());
}

#[tokio::test]
async fn unknown_function_never_reaches_wallet() {
    let (url, wallet) = spawn_wallet(MockWallet::on_chain(56)).await;
    let (_sessions, gateway) = connected_stack(url).await;
    let mut call = mint_call(&mainnet());
    call.function_name = "burn".to_string();

    let err = gateway.call_function(call).await.expect_err("unknown");

    assert!(matches!(err, WalletError::Abi(_)));
    assert_eq!(wallet.lock().expect("lock").methods(), vec!["eth_requestAccounts"]);
}

#[tokio::test]
async fn non_json_http_error_is_a_transport_failure() {
    let (url, _wallet) = spawn_wallet(MockWallet::on_chain(56)).await;
    let connector = connector_at(url.join("broken").expect("join"));

    let err = connector.chain_id().await.expect_err("broken");

    assert!(matches!(err, WalletError::Transport(message) if message.contains("500")));
}

#[tokio::test]
async fn null_results_count_as_success() {
    let (url, wallet) = spawn_wallet(MockWallet::on_chain(1)).await;
    let connector = connector_at(url);

    connector.switch_chain(56).await.expect("switch");
    assert_eq!(connector.chain_id().await.expect("chain"), 56);
    connector.disconnect().await.expect("revoke");

    assert_eq!(
        wallet.lock().expect("lock").methods(),
        vec!["wallet_switchEthereumChain", "eth_chainId", "wallet_revokePermissions"]
    );
}

#[tokio::test]
async fn disconnect_revokes_permissions() {
    let (url, wallet) = spawn_wallet(MockWallet::on_chain(56)).await;
    let (sessions, _gateway) = connected_stack(url).await;

    sessions.disconnect().await.expect("disconnect");

    assert!(sessions.current_session().await.is_none());
    let wallet = wallet.lock().expect("lock");
    assert_eq!(
        wallet.methods(),
        vec!["eth_requestAccounts", "wallet_revokePermissions"]
    );
    assert!(wallet.requests[1].params[0].get("eth_accounts").is_some());
}

#[tokio::test]
async fn reply_without_result_or_error_is_invalid() {
    let app = Router::new().route(
        "/",
        post(|Json(request): Json<JsonRpcRequest>| async move {
            Json(json!({ "jsonrpc": "2.0", "id": request.id }))
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    let connector = connector_at(Url::parse(&format!("http://{addr}/")).expect("url"));

    let err = connector.switch_chain(56).await.expect_err("empty reply");

    assert!(matches!(err, WalletError::InvalidResponse(_)), "{err}");
}

#[tokio::test]
async fn disconnect_tolerates_wallets_without_revoke() {
    let mut mock = MockWallet::on_chain(56);
    mock.revoke_unsupported = true;
    let (url, wallet) = spawn_wallet(mock).await;
    let (sessions, _gateway) = connected_stack(url).await;

    sessions.disconnect().await.expect("disconnect");

    assert!(sessions.current_session().await.is_none());
    assert_eq!(
        wallet.lock().expect("lock").methods(),
        vec!["eth_requestAccounts", "wallet_revokePermissions"]
    );
    // Nothing left to revoke.
    sessions.disconnect().await.expect("idempotent");
}

#[tokio::test]
async fn configured_controller_mints_against_wallet_endpoint() {
    let (url, _wallet) = spawn_wallet(MockWallet::on_chain(97)).await;
    let settings = Settings {
        deployment: DeploymentProfile::BscTestnet,
        contract_address: Some("0x00000000000000000000000000000000000000aB".to_string()),
        connectors: vec![settings::ConnectorSettings {
            id: "frame".to_string(),
            name: "Frame".to_string(),
            kind: ConnectorKind::Injected,
            endpoint: url.to_string(),
        }],
        ..Settings::default()
    };
    let config = settings.resolve().expect("resolve");
    let flow = build_mint_controller(&config).expect("controller");

    flow.connect(None).await;
    let state = flow.mint().await.expect("mint");

    assert_eq!(state.status(), MintStatus::Success);
    let tx_hash = state.tx_hash().expect("hash");
    assert_eq!(
        config.deployment.explorer_tx_url(tx_hash),
        format!("https://testnet.bscscan.com/tx/{TX_HASH}")
    );
}
