//! # swapmarket-types
//!
//! Shared types, errors, and configuration for the **SwapMarket** settlement engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Fingerprint`], [`RecordId`]
//! - **Order model**: [`Order`], [`OrderStatus`]
//! - **Canonical encoding**: [`encode_order`], [`order_hash`]
//! - **Records**: [`SettlementRecord`], [`CancellationRecord`], [`SettlementLeg`]
//! - **Configuration**: [`MarketConfig`]
//! - **Errors**: [`MarketError`] with `SM_ERR_` prefix codes, [`LedgerError`]
//! - **Constants**: encoding widths and signing prefix

pub mod canonical;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod order;
pub mod receipt;

// Re-export all primary types at crate root for ergonomic imports:
//   use swapmarket_types::{Order, Fingerprint, MarketError, ...};

pub use canonical::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use receipt::*;

// Address and integer primitives are shared with the maker tooling.
pub use alloy_primitives::{Address, B256, U256};

// Constants are accessed via `swapmarket_types::constants::FOO`
// (not re-exported to avoid name collisions).
