use super::*;
use shared::domain::ConnectorKind;

fn descriptor(id: &str, name: &str, kind: ConnectorKind) -> ConnectorDescriptor {
    ConnectorDescriptor::new(ConnectorId::new(id).expect("id"), name, kind)
}

#[test]
fn prefers_metamask_by_name() {
    let registry = vec![
        descriptor("coinbase", "Coinbase", ConnectorKind::Injected),
        descriptor("metaMask", "MetaMask", ConnectorKind::Other),
    ];
    assert_eq!(
        select_connector(&registry).map(|c| c.name.as_str()),
        Some("MetaMask")
    );
}

#[test]
fn metamask_listed_first_wins_over_injected() {
    let registry = vec![
        descriptor("metaMask", "MetaMask", ConnectorKind::Injected),
        descriptor("coinbase", "Coinbase", ConnectorKind::Injected),
    ];
    assert_eq!(
        select_connector(&registry).map(|c| c.name.as_str()),
        Some("MetaMask")
    );
}

#[test]
fn falls_back_to_first_injected_connector() {
    let registry = vec![
        descriptor("walletConnect", "WalletConnect", ConnectorKind::Bridge),
        descriptor("coinbase", "Coinbase", ConnectorKind::Injected),
        descriptor("frame", "Frame", ConnectorKind::Injected),
    ];
    assert_eq!(
        select_connector(&registry).map(|c| c.name.as_str()),
        Some("Coinbase")
    );
}

#[test]
fn single_injected_connector_is_chosen() {
    let registry = vec![descriptor("coinbase", "Coinbase", ConnectorKind::Injected)];
    assert_eq!(
        select_connector(&registry).map(|c| c.name.as_str()),
        Some("Coinbase")
    );
}

#[test]
fn falls_back_to_first_registered_connector() {
    let registry = vec![
        descriptor("walletConnect", "WalletConnect", ConnectorKind::Bridge),
        descriptor("ledger", "Ledger", ConnectorKind::Other),
    ];
    assert_eq!(
        select_connector(&registry).map(|c| c.name.as_str()),
        Some("WalletConnect")
    );
}

#[test]
fn empty_registry_selects_nothing() {
    assert!(select_connector(&[]).is_none());
}

#[test]
fn name_match_is_exact() {
    let registry = vec![
        descriptor("mm", "metamask", ConnectorKind::Bridge),
        descriptor("frame", "Frame", ConnectorKind::Injected),
    ];
    assert_eq!(
        select_connector(&registry).map(|c| c.name.as_str()),
        Some("Frame")
    );
}
