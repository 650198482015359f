//! Pure projection of the flow state onto what the mint panel shows. Keeps
//! the egui code free of flow rules so they can be tested without a frame.

use shared::{
    deployment::Deployment,
    domain::{ConnectorDescriptor, ConnectorId},
};
use wallet_core::{MintFlowState, MintStatus, Notice};

pub const CONNECT_LABEL: &str = "Conectar Wallet";
pub const CONNECTING_LABEL: &str = "Conectando...";
pub const MINT_LABEL: &str = "🎨 Mint NFT";
pub const MINTING_LABEL: &str = "Minteando...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectControls {
    /// One button; the backend picks the connector.
    Single { label: String, enabled: bool },
    /// One button per registered connector.
    PerConnector {
        buttons: Vec<(ConnectorId, String)>,
        enabled: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockingNotice {
    pub message: String,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerLink {
    pub label: String,
    pub url: String,
    pub tx_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintPanelView {
    pub connect: Option<ConnectControls>,
    pub inline_error: Option<String>,
    pub blocking_notice: Option<BlockingNotice>,
    pub account_label: Option<String>,
    pub reward_lines: Vec<String>,
    pub mint_label: &'static str,
    pub mint_enabled: bool,
    pub explorer_link: Option<ExplorerLink>,
}

impl MintPanelView {
    /// `acknowledged_revision` is the revision of the last blocking notice the
    /// user dismissed.
    pub fn build(
        state: &MintFlowState,
        connectors: &[ConnectorDescriptor],
        deployment: &Deployment,
        acknowledged_revision: Option<u64>,
    ) -> Self {
        let connecting = state.status() == MintStatus::Connecting;
        let connect = (!state.is_connected()).then(|| {
            let enabled = state.can_connect();
            if connectors.len() > 1 && !connecting {
                ConnectControls::PerConnector {
                    buttons: connectors
                        .iter()
                        .map(|c| (c.id.clone(), format!("Conectar con {}", c.name)))
                        .collect(),
                    enabled,
                }
            } else {
                let label = if connecting {
                    CONNECTING_LABEL
                } else {
                    CONNECT_LABEL
                };
                ConnectControls::Single {
                    label: label.to_string(),
                    enabled,
                }
            }
        });

        let inline_error = match state.notice() {
            Some(Notice::ConnectRejected(reason)) => Some(format!("Error: {reason}")),
            _ => None,
        };

        let blocking_notice = state
            .notice()
            .filter(|notice| notice.is_blocking())
            .filter(|_| acknowledged_revision != Some(state.revision()))
            .map(|notice| BlockingNotice {
                message: notice.message(),
                revision: state.revision(),
            });

        let account_label = state.account().map(|account| account.short());

        let reward_lines = deployment
            .reward_tiers
            .iter()
            .map(|tier| format!("• ID #{} → {} tokens", tier.token_id, tier.tokens))
            .collect();

        let mint_label = if state.status() == MintStatus::Minting {
            MINTING_LABEL
        } else {
            MINT_LABEL
        };

        let explorer_link = state
            .tx_hash()
            .filter(|_| state.status() == MintStatus::Success)
            .map(|tx_hash| ExplorerLink {
                label: format!("Ver en {} →", deployment.explorer_name),
                url: deployment.explorer_tx_url(tx_hash),
                tx_hash: tx_hash.as_str().to_string(),
            });

        Self {
            connect,
            inline_error,
            blocking_notice,
            account_label,
            reward_lines,
            mint_label,
            mint_enabled: state.can_mint(),
            explorer_link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{
        deployment::DeploymentProfile,
        domain::{Address, ConnectorKind, Session, TxHash},
    };

    const ACCOUNT: &str = "0x5CA48aaA07FB4244A7C94966210343F2883a2236";

    fn deployment() -> Deployment {
        let profile = DeploymentProfile::BscMainnet;
        let contract = profile
            .default_contract_address()
            .expect("mainnet contract");
        Deployment::new(profile, Address::parse(contract).expect("address"))
    }

    fn connector(id: &str, name: &str) -> ConnectorDescriptor {
        ConnectorDescriptor::new(
            ConnectorId::new(id).expect("id"),
            name,
            ConnectorKind::Injected,
        )
    }

    fn connected_state() -> MintFlowState {
        let mut state = MintFlowState::default();
        let attempt = state.begin_connect();
        state.connect_succeeded(
            attempt,
            Session {
                account: Address::parse(ACCOUNT).expect("account"),
                connector: connector("metaMask", "MetaMask"),
            },
        );
        state
    }

    #[test]
    fn idle_panel_offers_single_connect_button() {
        let view = MintPanelView::build(
            &MintFlowState::default(),
            &[connector("metaMask", "MetaMask")],
            &deployment(),
            None,
        );
        assert_eq!(
            view.connect,
            Some(ConnectControls::Single {
                label: CONNECT_LABEL.to_string(),
                enabled: true
            })
        );
        assert!(!view.mint_enabled);
        assert!(view.account_label.is_none());
    }

    #[test]
    fn several_connectors_get_one_button_each() {
        let registry = [
            connector("metaMask", "MetaMask"),
            connector("walletConnect", "WalletConnect"),
        ];
        let view = MintPanelView::build(&MintFlowState::default(), &registry, &deployment(), None);
        match view.connect {
            Some(ConnectControls::PerConnector { buttons, enabled }) => {
                assert!(enabled);
                assert_eq!(buttons.len(), 2);
                assert_eq!(buttons[1].1, "Conectar con WalletConnect");
            }
            other => panic!("unexpected controls: {other:?}"),
        }
    }

    #[test]
    fn connecting_disables_button_with_pending_label() {
        let mut state = MintFlowState::default();
        state.begin_connect();
        let view = MintPanelView::build(&state, &[connector("a", "A"), connector("b", "B")], &deployment(), None);
        assert_eq!(
            view.connect,
            Some(ConnectControls::Single {
                label: CONNECTING_LABEL.to_string(),
                enabled: false
            })
        );
    }

    #[test]
    fn connected_panel_shows_short_account_and_enables_mint() {
        let view = MintPanelView::build(&connected_state(), &[], &deployment(), None);
        assert!(view.connect.is_none());
        assert_eq!(view.account_label.as_deref(), Some("0x5CA4...2236"));
        assert!(view.mint_enabled);
        assert_eq!(view.mint_label, MINT_LABEL);
        assert_eq!(view.reward_lines.len(), 5);
        assert_eq!(view.reward_lines[0], "• ID #10 → 2 tokens");
    }

    #[test]
    fn minting_disables_mint_button() {
        let mut state = connected_state();
        state.begin_mint().expect("mint starts");
        let view = MintPanelView::build(&state, &[], &deployment(), None);
        assert!(!view.mint_enabled);
        assert_eq!(view.mint_label, MINTING_LABEL);
    }

    #[test]
    fn success_links_to_explorer() {
        let mut state = connected_state();
        let (attempt, _) = state.begin_mint().expect("mint starts");
        state.mint_succeeded(attempt, TxHash::new("0xabc123").expect("tx"));

        let view = MintPanelView::build(&state, &[], &deployment(), None);
        let link = view.explorer_link.expect("link");
        assert_eq!(link.label, "Ver en BSCScan →");
        assert!(link.url.ends_with("/0xabc123"), "{}", link.url);
        assert!(view.mint_enabled);
    }

    #[test]
    fn connect_rejection_renders_inline() {
        let mut state = MintFlowState::default();
        let attempt = state.begin_connect();
        state.connect_failed(attempt, "User rejected the request.");
        let view = MintPanelView::build(&state, &[], &deployment(), None);
        assert_eq!(
            view.inline_error.as_deref(),
            Some("Error: User rejected the request.")
        );
        assert!(view.blocking_notice.is_none());
    }

    #[test]
    fn blocking_notice_hides_once_acknowledged() {
        let mut state = connected_state();
        let (attempt, _) = state.begin_mint().expect("mint starts");
        state.mint_failed(attempt, "insufficient funds");

        let view = MintPanelView::build(&state, &[], &deployment(), None);
        let notice = view.blocking_notice.expect("dialog");
        assert_eq!(notice.message, "Error en la transacción: insufficient funds");

        let view = MintPanelView::build(&state, &[], &deployment(), Some(notice.revision));
        assert!(view.blocking_notice.is_none());
    }
}
