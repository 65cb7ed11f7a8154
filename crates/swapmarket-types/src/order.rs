//! Order types for the SwapMarket settlement engine.
//!
//! An [`Order`] is built and signed off-chain by the maker and never mutated
//! afterwards. Whether it has been consumed is tracked by the engine, keyed
//! by the order's [`Fingerprint`](crate::Fingerprint).

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{Fingerprint, canonical};

/// Status tag embedded in the signed payload. Packed as one byte.
///
/// Serialized as that byte. Maker tooling sends it either as a JSON number
/// or as a decimal string (`"1"`); both are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "StatusRepr")]
#[repr(u8)]
pub enum OrderStatus {
    /// Signed but not offered for settlement.
    Inactive = 0,
    /// Offered; the only settleable status.
    Open = 1,
}

impl OrderStatus {
    /// The byte written into the canonical encoding.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for OrderStatus {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inactive),
            1 => Ok(Self::Open),
            other => Err(other),
        }
    }
}

impl From<OrderStatus> for u8 {
    fn from(status: OrderStatus) -> Self {
        status.as_u8()
    }
}

/// Wire forms of [`OrderStatus`].
#[derive(Deserialize)]
#[serde(untagged)]
enum StatusRepr {
    Byte(u8),
    Text(String),
}

impl TryFrom<StatusRepr> for OrderStatus {
    type Error = String;

    fn try_from(repr: StatusRepr) -> std::result::Result<Self, Self::Error> {
        let byte = match repr {
            StatusRepr::Byte(b) => b,
            StatusRepr::Text(text) => text
                .trim()
                .parse::<u8>()
                .map_err(|_| format!("invalid order status {text:?}"))?,
        };
        <Self as TryFrom<u8>>::try_from(byte).map_err(|b| format!("unknown order status {b}"))
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => write!(f, "INACTIVE"),
            Self::Open => write!(f, "OPEN"),
        }
    }
}

/// Which kind of asset ledger an address refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Fungible,
    NonFungible,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fungible => write!(f, "FUNGIBLE"),
            Self::NonFungible => write!(f, "NON_FUNGIBLE"),
        }
    }
}

/// A maker's signed offer: `amount` of `fungible_asset` in exchange for
/// item `token_id` of `non_fungible_asset`, currently held by `taker`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Maker-chosen identifier; disambiguates otherwise identical orders.
    #[serde(alias = "oid")]
    pub order_id: U256,
    pub maker: Address,
    /// Zero address means "any taker" where the market allows open offers.
    pub taker: Address,
    #[serde(alias = "erc721Address")]
    pub non_fungible_asset: Address,
    pub token_id: U256,
    #[serde(alias = "erc20Address")]
    pub fungible_asset: Address,
    pub amount: U256,
    pub status: OrderStatus,
}

impl Order {
    /// Replay-protection key for this order.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint(canonical::order_hash(self))
    }

    /// Whether the maker left the taker unspecified.
    #[must_use]
    pub fn is_open_offer(&self) -> bool {
        self.taker.is_zero()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// An open order between `maker` and `taker` on fixed dummy asset addresses.
    pub fn dummy(maker: Address, taker: Address) -> Self {
        Self {
            order_id: U256::from(1),
            maker,
            taker,
            non_fungible_asset: Address::repeat_byte(0x72),
            token_id: U256::from(2),
            fungible_asset: Address::repeat_byte(0x20),
            amount: U256::from(100),
            status: OrderStatus::Open,
        }
    }

    /// An open order on the given asset ledgers.
    pub fn dummy_on_assets(
        maker: Address,
        taker: Address,
        fungible_asset: Address,
        non_fungible_asset: Address,
        amount: u64,
        token_id: u64,
    ) -> Self {
        Self {
            order_id: U256::from(1),
            maker,
            taker,
            non_fungible_asset,
            token_id: U256::from(token_id),
            fungible_asset,
            amount: U256::from(amount),
            status: OrderStatus::Open,
        }
    }
}
