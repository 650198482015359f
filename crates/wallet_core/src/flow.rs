//! Mint flow: an explicit view-state struct changed only through transition
//! functions, and the async controller that drives it.

use std::sync::Arc;

use shared::{
    abi::{address_value, FunctionDescriptor},
    deployment::{Deployment, MINT_FUNCTION},
    domain::{Address, ConnectorDescriptor, ConnectorId, Session, TxHash},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    connector::select_connector,
    error::{MintFlowError, Notice},
    ContractCall, ContractGateway, SessionManager,
};

const STATE_EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MintStatus {
    #[default]
    Idle,
    Connecting,
    Minting,
    Success,
    Failed,
}

/// Identifies one in-flight connect or mint. Results carrying a stale id
/// (e.g. after a disconnect) are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptId(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintFlowState {
    status: MintStatus,
    session: Option<Session>,
    tx_hash: Option<TxHash>,
    notice: Option<Notice>,
    pending_connect: Option<AttemptId>,
    pending_mint: Option<AttemptId>,
    revision: u64,
}

impl MintFlowState {
    pub fn status(&self) -> MintStatus {
        self.status
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn account(&self) -> Option<&Address> {
        self.session.as_ref().map(|session| &session.account)
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn tx_hash(&self) -> Option<&TxHash> {
        self.tx_hash.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Bumped on every transition.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_connect(&self) -> bool {
        !self.is_connected() && self.status != MintStatus::Connecting
    }

    pub fn can_mint(&self) -> bool {
        self.is_connected() && self.pending_mint.is_none()
    }

    fn settled_status(&self) -> MintStatus {
        if self.pending_mint.is_some() {
            MintStatus::Minting
        } else {
            MintStatus::Idle
        }
    }

    fn touch(&mut self) -> AttemptId {
        self.revision += 1;
        AttemptId(self.revision)
    }

    pub fn no_compatible_wallet(&mut self) {
        self.touch();
        self.status = MintStatus::Idle;
        self.notice = Some(Notice::NoCompatibleWallet);
    }

    pub fn begin_connect(&mut self) -> AttemptId {
        let attempt = self.touch();
        self.status = MintStatus::Connecting;
        self.notice = None;
        self.pending_connect = Some(attempt);
        attempt
    }

    /// Returns false when the attempt is stale and nothing changed.
    pub fn connect_succeeded(&mut self, attempt: AttemptId, session: Session) -> bool {
        if self.pending_connect != Some(attempt) {
            return false;
        }
        self.touch();
        self.pending_connect = None;
        self.status = self.settled_status();
        self.session = Some(session);
        true
    }

    pub fn connect_failed(&mut self, attempt: AttemptId, reason: impl Into<String>) -> bool {
        if self.pending_connect != Some(attempt) {
            return false;
        }
        self.touch();
        self.pending_connect = None;
        self.status = self.settled_status();
        self.session = None;
        self.notice = Some(Notice::ConnectRejected(reason.into()));
        true
    }

    /// Enters `Minting` for the connected account.
    pub fn begin_mint(&mut self) -> Result<(AttemptId, Address), MintFlowError> {
        let account = self
            .account()
            .cloned()
            .ok_or(MintFlowError::NotConnected)?;
        if self.pending_mint.is_some() {
            return Err(MintFlowError::MintInFlight);
        }

        let attempt = self.touch();
        self.status = MintStatus::Minting;
        self.tx_hash = None;
        self.notice = None;
        self.pending_mint = Some(attempt);
        Ok((attempt, account))
    }

    pub fn mint_succeeded(&mut self, attempt: AttemptId, tx_hash: TxHash) -> bool {
        if self.pending_mint != Some(attempt) {
            return false;
        }
        self.touch();
        self.pending_mint = None;
        self.status = MintStatus::Success;
        self.tx_hash = Some(tx_hash);
        true
    }

    pub fn mint_failed(&mut self, attempt: AttemptId, reason: impl Into<String>) -> bool {
        if self.pending_mint != Some(attempt) {
            return false;
        }
        self.touch();
        self.pending_mint = None;
        self.status = MintStatus::Failed;
        self.tx_hash = None;
        self.notice = Some(Notice::MintRejected(reason.into()));
        true
    }

    pub fn disconnected(&mut self) {
        self.touch();
        self.status = MintStatus::Idle;
        self.session = None;
        self.tx_hash = None;
        self.notice = None;
        self.pending_connect = None;
        self.pending_mint = None;
    }
}

/// Orchestrates connect, mint and disconnect against the external session
/// manager and contract gateway. Every external failure ends up as a
/// [`Notice`] in the published state.
pub struct MintFlowController {
    sessions: Arc<dyn SessionManager>,
    gateway: Arc<dyn ContractGateway>,
    contract_address: Address,
    interface: Vec<FunctionDescriptor>,
    state: Mutex<MintFlowState>,
    events: broadcast::Sender<MintFlowState>,
}

impl MintFlowController {
    pub fn new(
        sessions: Arc<dyn SessionManager>,
        gateway: Arc<dyn ContractGateway>,
        deployment: &Deployment,
    ) -> Self {
        let (events, _) = broadcast::channel(STATE_EVENT_CAPACITY);
        Self {
            sessions,
            gateway,
            contract_address: deployment.contract_address.clone(),
            interface: shared::deployment::mint_interface(),
            state: Mutex::new(MintFlowState::default()),
            events,
        }
    }

    pub fn connectors(&self) -> Vec<ConnectorDescriptor> {
        self.sessions.list_connectors()
    }

    pub async fn state(&self) -> MintFlowState {
        self.state.lock().await.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MintFlowState> {
        self.events.subscribe()
    }

    pub async fn connect(&self, choice: Option<ConnectorId>) -> MintFlowState {
        let connector_id = match choice {
            Some(id) => id,
            None => {
                let registry = self.sessions.list_connectors();
                match select_connector(&registry) {
                    Some(descriptor) => descriptor.id.clone(),
                    None => {
                        warn!("connect requested but no wallet connector is registered");
                        return self.update(MintFlowState::no_compatible_wallet).await;
                    }
                }
            }
        };

        let attempt = {
            let mut state = self.state.lock().await;
            let attempt = state.begin_connect();
            self.publish(&state);
            attempt
        };
        info!(connector = %connector_id, "connecting wallet");

        match self.sessions.connect(&connector_id).await {
            Ok(session) => {
                info!(
                    connector = %connector_id,
                    account = %session.account,
                    "wallet connected"
                );
                self.update(|state| {
                    if !state.connect_succeeded(attempt, session) {
                        debug!("dropping stale connect result");
                    }
                })
                .await
            }
            Err(err) => {
                warn!(connector = %connector_id, error = %err, "wallet connection rejected");
                let reason = err.to_string();
                self.update(|state| {
                    if !state.connect_failed(attempt, reason) {
                        debug!("dropping stale connect failure");
                    }
                })
                .await
            }
        }
    }

    pub async fn mint(&self) -> Result<MintFlowState, MintFlowError> {
        let (attempt, account) = {
            let mut state = self.state.lock().await;
            let started = state.begin_mint()?;
            self.publish(&state);
            started
        };

        let call = ContractCall {
            contract_address: self.contract_address.clone(),
            interface: self.interface.clone(),
            function_name: MINT_FUNCTION.to_string(),
            args: vec![address_value(&account)],
        };
        info!(
            contract = %self.contract_address,
            to = %account,
            "submitting mint transaction"
        );

        let next = match self.gateway.call_function(call).await {
            Ok(tx_hash) => {
                info!(tx_hash = %tx_hash, "mint transaction submitted");
                self.update(|state| {
                    if !state.mint_succeeded(attempt, tx_hash) {
                        debug!("dropping stale mint result");
                    }
                })
                .await
            }
            Err(err) => {
                warn!(error = %err, "mint transaction failed");
                let reason = err.to_string();
                self.update(|state| {
                    if !state.mint_failed(attempt, reason) {
                        debug!("dropping stale mint failure");
                    }
                })
                .await
            }
        };
        Ok(next)
    }

    pub async fn disconnect(&self) -> MintFlowState {
        if let Err(err) = self.sessions.disconnect().await {
            warn!(error = %err, "wallet disconnect reported an error");
        }
        info!("wallet disconnected");
        self.update(MintFlowState::disconnected).await
    }

    async fn update(&self, transition: impl FnOnce(&mut MintFlowState)) -> MintFlowState {
        let mut state = self.state.lock().await;
        transition(&mut state);
        self.publish(&state);
        state.clone()
    }

    fn publish(&self, state: &MintFlowState) {
        // Errors only when nobody is subscribed.
        let _ = self.events.send(state.clone());
    }
}
