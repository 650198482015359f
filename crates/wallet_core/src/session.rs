use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::{ConnectorDescriptor, ConnectorId, Session};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{error::WalletError, SessionManager, WalletConnector};

struct ActiveSession {
    session: Session,
    connector: Arc<dyn WalletConnector>,
}

/// Session manager over a fixed registry of connectors.
pub struct WalletSessionManager {
    connectors: Vec<Arc<dyn WalletConnector>>,
    active: RwLock<Option<ActiveSession>>,
}

impl WalletSessionManager {
    pub fn new(connectors: Vec<Arc<dyn WalletConnector>>) -> Self {
        Self {
            connectors,
            active: RwLock::new(None),
        }
    }

    /// The connected session together with the connector that owns it.
    pub async fn active_connector(&self) -> Option<(Session, Arc<dyn WalletConnector>)> {
        let guard = self.active.read().await;
        guard
            .as_ref()
            .map(|active| (active.session.clone(), Arc::clone(&active.connector)))
    }

    fn find_connector(&self, id: &ConnectorId) -> Option<Arc<dyn WalletConnector>> {
        self.connectors
            .iter()
            .find(|connector| &connector.descriptor().id == id)
            .cloned()
    }
}

#[async_trait]
impl SessionManager for WalletSessionManager {
    fn list_connectors(&self) -> Vec<ConnectorDescriptor> {
        self.connectors
            .iter()
            .map(|connector| connector.descriptor().clone())
            .collect()
    }

    async fn connect(&self, connector_id: &ConnectorId) -> Result<Session, WalletError> {
        let connector = self
            .find_connector(connector_id)
            .ok_or_else(|| WalletError::UnknownConnector(connector_id.clone()))?;

        let account = connector
            .request_accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(WalletError::NoAccounts)?;
        let session = Session {
            account,
            connector: connector.descriptor().clone(),
        };

        let previous = self.active.write().await.replace(ActiveSession {
            session: session.clone(),
            connector,
        });
        if let Some(previous) = previous {
            if previous.session.connector.id != *connector_id {
                info!(
                    previous = %previous.session.connector.id,
                    "replacing session held by another connector"
                );
            }
        }
        Ok(session)
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        let Some(active) = self.active.write().await.take() else {
            return Ok(());
        };
        active.connector.disconnect().await.inspect_err(|err| {
            warn!(
                connector = %active.session.connector.id,
                error = %err,
                "connector disconnect failed; session dropped locally"
            );
        })
    }

    async fn current_session(&self) -> Option<Session> {
        self.active
            .read()
            .await
            .as_ref()
            .map(|active| active.session.clone())
    }
}
