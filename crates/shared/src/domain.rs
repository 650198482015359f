use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// An account or contract address: `0x` followed by 40 hex digits.
///
/// Any casing is accepted on input; display is always the EIP-55 checksum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    inner: alloy_primitives::Address,
    checksummed: String,
}

impl Address {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| ParseError::MissingHexPrefix(trimmed.to_string()))?;
        if digits.len() != 40 {
            return Err(ParseError::AddressLength {
                value: trimmed.to_string(),
                len: digits.len(),
            });
        }

        let inner = alloy_primitives::Address::from_str(digits)
            .map_err(|_| ParseError::InvalidHex(trimmed.to_string()))?;
        Ok(Self::from(inner))
    }

    pub fn as_str(&self) -> &str {
        &self.checksummed
    }

    pub fn to_alloy(&self) -> alloy_primitives::Address {
        self.inner
    }

    /// `0x1234...abcd`: first six and last four characters.
    pub fn short(&self) -> String {
        let len = self.checksummed.len();
        format!(
            "{}...{}",
            &self.checksummed[..6],
            &self.checksummed[len - 4..]
        )
    }
}

impl From<alloy_primitives::Address> for Address {
    fn from(inner: alloy_primitives::Address) -> Self {
        Self {
            inner,
            checksummed: inner.to_checksum(None),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.checksummed)
    }
}

impl TryFrom<String> for Address {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.checksummed
    }
}

/// Opaque identifier the network returns for a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TxHash(String);

impl TxHash {
    pub fn new(raw: impl Into<String>) -> Result<Self, ParseError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyTxHash);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TxHash {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TxHash> for String {
    fn from(value: TxHash) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConnectorId(String);

impl ConnectorId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ParseError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ParseError::EmptyConnectorId);
        }
        Ok(Self(raw.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ConnectorId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConnectorId> for String {
    fn from(value: ConnectorId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorKind {
    Injected,
    Bridge,
    Other,
}

impl ConnectorKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Injected => "injected",
            Self::Bridge => "bridge",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorDescriptor {
    pub id: ConnectorId,
    pub name: String,
    pub kind: ConnectorKind,
}

impl ConnectorDescriptor {
    pub fn new(id: ConnectorId, name: impl Into<String>, kind: ConnectorKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }
}

/// Live association between this client and a connected wallet account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub account: Address,
    pub connector: ConnectorDescriptor,
}
