use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Provider error codes defined by EIP-1193 plus the JSON-RPC 2.0 reserved range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UserRejected,
    Unauthorized,
    UnsupportedMethod,
    Disconnected,
    ChainDisconnected,
    UnrecognizedChain,
    InvalidParams,
    Internal,
    Other(i64),
}

impl ErrorCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            4001 => Self::UserRejected,
            4100 => Self::Unauthorized,
            4200 => Self::UnsupportedMethod,
            4900 => Self::Disconnected,
            4901 => Self::ChainDisconnected,
            4902 => Self::UnrecognizedChain,
            -32602 => Self::InvalidParams,
            -32603 => Self::Internal,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::UserRejected => 4001,
            Self::Unauthorized => 4100,
            Self::UnsupportedMethod => 4200,
            Self::Disconnected => 4900,
            Self::ChainDisconnected => 4901,
            Self::UnrecognizedChain => 4902,
            Self::InvalidParams => -32602,
            Self::Internal => -32603,
            Self::Other(code) => code,
        }
    }
}

/// Error object carried in a JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: None,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::from_code(self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("'{0}' is missing the 0x prefix")]
    MissingHexPrefix(String),
    #[error("address '{value}' has {len} hex digits, expected 40")]
    AddressLength { value: String, len: usize },
    #[error("'{0}' contains non-hex characters")]
    InvalidHex(String),
    #[error("transaction hash must not be empty")]
    EmptyTxHash,
    #[error("connector id must not be empty")]
    EmptyConnectorId,
    #[error("invalid hex quantity '{0}'")]
    InvalidQuantity(String),
    #[error("unknown deployment profile '{0}'")]
    UnknownProfile(String),
}
