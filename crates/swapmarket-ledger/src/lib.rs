//! # swapmarket-ledger
//!
//! **Asset Ledger Adapter**: the narrow transfer contract the settlement
//! engine uses to move assets it does not own.
//!
//! ## Architecture
//!
//! - [`FungibleLedger`]: balance + allowance-gated `transfer_from`
//! - [`NonFungibleLedger`]: ownership + approval-gated `transfer_from`
//! - [`SettlementLedgers`]: the engine-facing view, addressing ledgers by
//!   asset address and offering checkpoint / revert / commit
//! - [`FungibleToken`], [`NonFungibleToken`]: in-memory reference ledgers
//! - [`LedgerBook`]: registry of reference ledgers with a rollback [`Journal`]
//!
//! Ledgers validate every precondition before mutating. A failed transfer
//! never leaves a partial effect; a reverted checkpoint undoes successful
//! transfers made after it.

pub mod book;
pub mod fungible;
pub mod journal;
pub mod non_fungible;

pub use book::LedgerBook;
pub use fungible::FungibleToken;
pub use journal::{Checkpoint, Journal, JournalEntry};
pub use non_fungible::NonFungibleToken;

use alloy_primitives::{Address, U256};
use swapmarket_types::LedgerError;

/// A balance-based asset ledger.
pub trait FungibleLedger {
    fn balance_of(&self, owner: Address) -> U256;

    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Move `amount` from `owner` to `recipient`, spending `spender`'s
    /// allowance unless `spender == owner`.
    fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<(), LedgerError>;
}

/// A ledger of uniquely owned items.
pub trait NonFungibleLedger {
    fn owner_of(&self, token_id: U256) -> Option<Address>;

    fn get_approved(&self, token_id: U256) -> Option<Address>;

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool;

    /// Move `token_id` from `owner` to `recipient`. `spender` must be the
    /// owner, the token's approved address, or an operator of the owner.
    fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        recipient: Address,
        token_id: U256,
    ) -> Result<(), LedgerError>;
}

/// What the settlement engine needs from the asset world.
///
/// Transfers between [`checkpoint`](Self::checkpoint) and
/// [`revert_to`](Self::revert_to) are undone as a unit.
pub trait SettlementLedgers {
    fn transfer_fungible(
        &mut self,
        asset: Address,
        spender: Address,
        owner: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<(), LedgerError>;

    fn transfer_non_fungible(
        &mut self,
        asset: Address,
        spender: Address,
        owner: Address,
        recipient: Address,
        token_id: U256,
    ) -> Result<(), LedgerError>;

    /// Mark the current state.
    fn checkpoint(&mut self) -> Checkpoint;

    /// Undo every transfer made since `checkpoint`.
    fn revert_to(&mut self, checkpoint: Checkpoint);

    /// Make every transfer since `checkpoint` permanent.
    fn commit(&mut self, checkpoint: Checkpoint);
}
