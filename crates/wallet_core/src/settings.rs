use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use shared::{
    deployment::{Deployment, DeploymentProfile},
    domain::{Address, ConnectorDescriptor, ConnectorId, ConnectorKind},
};
use tracing::warn;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "mint.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub deployment: DeploymentProfile,
    pub contract_address: Option<String>,
    pub explorer_tx_base: Option<String>,
    pub rpc_timeout_seconds: u64,
    pub connectors: Vec<ConnectorSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSettings {
    pub id: String,
    pub name: String,
    #[serde(default = "default_connector_kind")]
    pub kind: ConnectorKind,
    pub endpoint: String,
}

fn default_connector_kind() -> ConnectorKind {
    ConnectorKind::Injected
}

/// A single Frame connector. `mint.example.toml` at the repository root shows
/// a multi-wallet registry.
impl Default for Settings {
    fn default() -> Self {
        Self {
            deployment: DeploymentProfile::BscMainnet,
            contract_address: None,
            explorer_tx_base: None,
            rpc_timeout_seconds: 120,
            connectors: vec![ConnectorSettings {
                id: "frame".into(),
                name: "Frame".into(),
                kind: ConnectorKind::Injected,
                endpoint: "http://127.0.0.1:1248".into(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConnector {
    pub descriptor: ConnectorDescriptor,
    pub endpoint: Url,
}

/// Validated settings, ready to build connectors from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub deployment: Deployment,
    pub connectors: Vec<ResolvedConnector>,
    pub rpc_timeout: Duration,
}

/// Defaults, then `path` (or `mint.toml` in the working directory when
/// present), then `APP__*` environment overrides.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let (file, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };

    let mut settings = if required || file.exists() {
        let raw = fs::read_to_string(&file)
            .with_context(|| format!("failed to read settings file '{}'", file.display()))?;
        parse_settings(&raw)
            .with_context(|| format!("invalid settings file '{}'", file.display()))?
    } else {
        Settings::default()
    };

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok())?;
    Ok(settings)
}

pub fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str::<Settings>(raw)?)
}

pub fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("APP__DEPLOYMENT") {
        settings.deployment = v
            .parse::<DeploymentProfile>()
            .with_context(|| format!("APP__DEPLOYMENT='{v}' is not a known deployment"))?;
    }
    if let Some(v) = lookup("APP__CONTRACT_ADDRESS") {
        settings.contract_address = Some(v);
    }
    if let Some(v) = lookup("APP__EXPLORER_TX_BASE") {
        settings.explorer_tx_base = Some(v);
    }
    if let Some(v) = lookup("APP__RPC_TIMEOUT_SECONDS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.rpc_timeout_seconds = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__RPC_TIMEOUT_SECONDS"),
        }
    }
    if let Some(v) = lookup("APP__WALLET_ENDPOINT") {
        match settings.connectors.first_mut() {
            Some(first) => first.endpoint = v,
            None => bail!("APP__WALLET_ENDPOINT is set but no connector is configured"),
        }
    }
    Ok(())
}

impl Settings {
    pub fn resolve(&self) -> anyhow::Result<ResolvedConfig> {
        let raw_contract = self
            .contract_address
            .as_deref()
            .or(self.deployment.default_contract_address())
            .ok_or_else(|| {
                anyhow!(
                    "no contract address configured for deployment '{}'",
                    self.deployment
                )
            })?;
        let contract_address =
            Address::parse(raw_contract).context("invalid contract_address")?;

        let mut deployment = Deployment::new(self.deployment, contract_address);
        if let Some(base) = &self.explorer_tx_base {
            Url::parse(base).with_context(|| format!("invalid explorer_tx_base '{base}'"))?;
            deployment = deployment.with_explorer_tx_base(base.clone());
        }

        let mut seen = HashSet::new();
        let mut connectors = Vec::with_capacity(self.connectors.len());
        for entry in &self.connectors {
            let id = ConnectorId::new(entry.id.clone()).context("invalid connector id")?;
            if !seen.insert(id.clone()) {
                bail!("connector id '{id}' is configured more than once");
            }
            let endpoint = Url::parse(&entry.endpoint)
                .with_context(|| format!("invalid endpoint for connector '{id}'"))?;
            connectors.push(ResolvedConnector {
                descriptor: ConnectorDescriptor::new(id, entry.name.clone(), entry.kind),
                endpoint,
            });
        }

        Ok(ResolvedConfig {
            deployment,
            connectors,
            rpc_timeout: Duration::from_secs(self.rpc_timeout_seconds.max(1)),
        })
    }
}
