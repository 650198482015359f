//! Static deployment data: target network, contract and explorer.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    abi::{param, FunctionDescriptor, StateMutability},
    domain::{Address, TxHash},
    error::ParseError,
};

pub const MINT_FUNCTION: &str = "safeMint";

/// Known network/contract pairings shipped with the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentProfile {
    #[default]
    BscMainnet,
    BscTestnet,
}

impl DeploymentProfile {
    pub fn chain_id(self) -> u64 {
        match self {
            Self::BscMainnet => 56,
            Self::BscTestnet => 97,
        }
    }

    pub fn network_name(self) -> &'static str {
        match self {
            Self::BscMainnet => "BNB Smart Chain",
            Self::BscTestnet => "BNB Smart Chain Testnet",
        }
    }

    pub fn explorer_name(self) -> &'static str {
        match self {
            Self::BscMainnet => "BSCScan",
            Self::BscTestnet => "BSCScan Testnet",
        }
    }

    pub fn explorer_tx_base(self) -> &'static str {
        match self {
            Self::BscMainnet => "https://bscscan.com/tx/",
            Self::BscTestnet => "https://testnet.bscscan.com/tx/",
        }
    }

    /// Contract address published for this profile, if any. Testnet
    /// deployments must be supplied through configuration.
    pub fn default_contract_address(self) -> Option<&'static str> {
        match self {
            Self::BscMainnet => Some("0x5CA48aaA07FB4244A7C94966210343F2883a2236"),
            Self::BscTestnet => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BscMainnet => "bsc-mainnet",
            Self::BscTestnet => "bsc-testnet",
        }
    }
}

impl fmt::Display for DeploymentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentProfile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bsc" | "bsc-mainnet" => Ok(Self::BscMainnet),
            "bsc-testnet" | "bsctestnet" => Ok(Self::BscTestnet),
            other => Err(ParseError::UnknownProfile(other.to_string())),
        }
    }
}

/// Informational reward row. The payout itself happens inside the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTier {
    pub token_id: u32,
    pub tokens: u32,
}

pub const REWARD_TIERS: [RewardTier; 5] = [
    RewardTier { token_id: 10, tokens: 2 },
    RewardTier { token_id: 20, tokens: 4 },
    RewardTier { token_id: 30, tokens: 6 },
    RewardTier { token_id: 40, tokens: 8 },
    RewardTier { token_id: 50, tokens: 10 },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub profile: DeploymentProfile,
    pub chain_id: u64,
    pub network_name: String,
    pub contract_address: Address,
    pub explorer_name: String,
    pub explorer_tx_base: String,
    pub reward_tiers: Vec<RewardTier>,
}

impl Deployment {
    pub fn new(profile: DeploymentProfile, contract_address: Address) -> Self {
        Self {
            profile,
            chain_id: profile.chain_id(),
            network_name: profile.network_name().to_string(),
            contract_address,
            explorer_name: profile.explorer_name().to_string(),
            explorer_tx_base: profile.explorer_tx_base().to_string(),
            reward_tiers: REWARD_TIERS.to_vec(),
        }
    }

    pub fn with_explorer_tx_base(mut self, base: impl Into<String>) -> Self {
        self.explorer_tx_base = base.into();
        self
    }

    /// Block-explorer page for a submitted transaction; the handle is
    /// appended verbatim.
    pub fn explorer_tx_url(&self, tx_hash: &TxHash) -> String {
        format!("{}{}", self.explorer_tx_base, tx_hash.as_str())
    }
}

/// The single-function interface the client calls:
/// `safeMint(address to) returns (uint256)`, nonpayable.
pub fn mint_interface() -> Vec<FunctionDescriptor> {
    vec![FunctionDescriptor {
        name: MINT_FUNCTION.to_string(),
        inputs: vec![param("to", "address")],
        outputs: vec![param("", "uint256")],
        state_mutability: StateMutability::NonPayable,
    }]
}
