//! Error types for the SwapMarket settlement engine.
//!
//! All errors use the `SM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Authentication errors
//! - 3xx: Consumption (replay) errors
//! - 4xx: Authorization errors
//! - 5xx: Whitelist errors
//! - 6xx: Transfer errors
//! - 9xx: General / internal errors

use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::{AssetKind, Fingerprint, OrderStatus, SettlementLeg};

/// Central error enum for all SwapMarket operations.
///
/// Every variant is terminal for the invocation that produced it and
/// leaves engine state exactly as it was before the call.
#[derive(Debug, Error)]
pub enum MarketError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The signed status tag does not permit settlement.
    #[error("SM_ERR_100: Order is not open: status {0}")]
    OrderNotOpen(OrderStatus),

    // =================================================================
    // Authentication Errors (2xx)
    // =================================================================
    /// The signature is malformed or no signer can be recovered from it.
    #[error("SM_ERR_200: Invalid signature: {reason}")]
    InvalidSignature { reason: String },

    /// The signature is well-formed but was not produced by the order's maker.
    #[error("SM_ERR_201: Signer mismatch: order maker {maker}, recovered {recovered}")]
    SignerMismatch { maker: Address, recovered: Address },

    /// The maker-side signer failed to produce a signature.
    #[error("SM_ERR_202: Signing failed: {0}")]
    SigningFailed(String),

    // =================================================================
    // Consumption Errors (3xx)
    // =================================================================
    /// The order fingerprint was already settled or cancelled.
    #[error("SM_ERR_300: Order already consumed: {0}")]
    AlreadyConsumed(Fingerprint),

    // =================================================================
    // Authorization Errors (4xx)
    // =================================================================
    /// The caller is not the party the order names for this operation.
    #[error("SM_ERR_400: Caller {caller} not authorized, expected {expected}")]
    CallerNotAuthorized { caller: Address, expected: Address },

    /// An administrator-only operation was attempted by another caller.
    #[error("SM_ERR_401: Unauthorized: {caller} is not the administrator")]
    Unauthorized { caller: Address },

    // =================================================================
    // Whitelist Errors (5xx)
    // =================================================================
    /// An asset ledger referenced by the order is not whitelisted.
    #[error("SM_ERR_500: {kind} asset not whitelisted: {asset}")]
    AssetNotWhitelisted { kind: AssetKind, asset: Address },

    // =================================================================
    // Transfer Errors (6xx)
    // =================================================================
    /// One settlement leg failed; the whole settlement was rolled back.
    #[error("SM_ERR_600: Transfer failed on {leg} leg: {cause}")]
    TransferFailed {
        leg: SettlementLeg,
        #[source]
        cause: LedgerError,
    },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("SM_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("SM_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk, network).
    #[error("SM_ERR_903: I/O error: {0}")]
    Io(String),
}

impl MarketError {
    /// The `SM_ERR_` code of this error, e.g. `"SM_ERR_300"`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::OrderNotOpen(_) => "SM_ERR_100",
            Self::InvalidSignature { .. } => "SM_ERR_200",
            Self::SignerMismatch { .. } => "SM_ERR_201",
            Self::SigningFailed(_) => "SM_ERR_202",
            Self::AlreadyConsumed(_) => "SM_ERR_300",
            Self::CallerNotAuthorized { .. } => "SM_ERR_400",
            Self::Unauthorized { .. } => "SM_ERR_401",
            Self::AssetNotWhitelisted { .. } => "SM_ERR_500",
            Self::TransferFailed { .. } => "SM_ERR_600",
            Self::Serialization(_) => "SM_ERR_901",
            Self::Configuration(_) => "SM_ERR_902",
            Self::Io(_) => "SM_ERR_903",
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MarketError>;

// Conversion from std::io::Error
impl From<std::io::Error> for MarketError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Failure reported by an asset ledger. Ledgers check every precondition
/// before mutating, so an error always means nothing was applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No ledger is registered at this address.
    #[error("no ledger registered at {0}")]
    UnknownAsset(Address),

    /// The owner's balance does not cover the transfer.
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: U256, available: U256 },

    /// The spender's allowance does not cover the transfer.
    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: U256, available: U256 },

    /// The token id has never been minted.
    #[error("token {0} does not exist")]
    UnknownToken(U256),

    /// The claimed owner does not own the token.
    #[error("token {token_id} is not owned by {claimed}")]
    NotTokenOwner { token_id: U256, claimed: Address },

    /// The spender holds neither a per-token nor an operator approval.
    #[error("{spender} is not approved for token {token_id}")]
    NotApproved { token_id: U256, spender: Address },

    /// Transfers to the zero address are rejected.
    #[error("transfer to the zero address")]
    InvalidRecipient,

    /// Minting would push total supply past `U256::MAX`.
    #[error("total supply overflow: supply {supply}, mint {amount}")]
    SupplyOverflow { supply: U256, amount: U256 },
}
