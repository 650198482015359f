//! Default connector choice when the user does not pick one explicitly.

use shared::domain::{ConnectorDescriptor, ConnectorKind};

pub const PREFERRED_CONNECTOR_NAME: &str = "MetaMask";

/// Picks, in order: the connector named "MetaMask", the first injected
/// connector, the first registered connector.
pub fn select_connector(registry: &[ConnectorDescriptor]) -> Option<&ConnectorDescriptor> {
    let by_name = |c: &&ConnectorDescriptor| c.name == PREFERRED_CONNECTOR_NAME;
    let by_kind = |c: &&ConnectorDescriptor| c.kind == ConnectorKind::Injected;

    registry
        .iter()
        .find(by_name)
        .or_else(|| registry.iter().find(by_kind))
        .or_else(|| registry.first())
}
