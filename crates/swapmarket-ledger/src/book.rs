//! Registry of in-memory asset ledgers addressed by asset address.
//!
//! `LedgerBook` is the reference [`SettlementLedgers`] implementation.
//! Transfers go through the [`FungibleLedger`] / [`NonFungibleLedger`]
//! contracts and are journaled so a settlement can be reverted as a unit.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use swapmarket_types::LedgerError;

use crate::journal::{Checkpoint, Journal, JournalEntry};
use crate::{
    FungibleLedger, FungibleToken, NonFungibleLedger, NonFungibleToken, SettlementLedgers,
};

/// Asset ledgers keyed by address, plus the undo journal.
#[derive(Debug, Default)]
pub struct LedgerBook {
    fungibles: HashMap<Address, FungibleToken>,
    non_fungibles: HashMap<Address, NonFungibleToken>,
    journal: Journal,
}

impl LedgerBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy `token` at `asset`, replacing any ledger already there.
    pub fn register_fungible(&mut self, asset: Address, token: FungibleToken) {
        self.fungibles.insert(asset, token);
    }

    /// Deploy `token` at `asset`, replacing any ledger already there.
    pub fn register_non_fungible(&mut self, asset: Address, token: NonFungibleToken) {
        self.non_fungibles.insert(asset, token);
    }

    #[must_use]
    pub fn fungible(&self, asset: Address) -> Option<&FungibleToken> {
        self.fungibles.get(&asset)
    }

    /// Direct access for minting and approvals. Changes made here are
    /// not journaled.
    pub fn fungible_mut(&mut self, asset: Address) -> Option<&mut FungibleToken> {
        self.fungibles.get_mut(&asset)
    }

    #[must_use]
    pub fn non_fungible(&self, asset: Address) -> Option<&NonFungibleToken> {
        self.non_fungibles.get(&asset)
    }

    /// Direct access for minting and approvals. Changes made here are
    /// not journaled.
    pub fn non_fungible_mut(&mut self, asset: Address) -> Option<&mut NonFungibleToken> {
        self.non_fungibles.get_mut(&asset)
    }

    /// Balance of `holder` on the fungible ledger at `asset` (zero if absent).
    #[must_use]
    pub fn balance_of(&self, asset: Address, holder: Address) -> U256 {
        self.fungible(asset)
            .map(|t| t.balance_of(holder))
            .unwrap_or_default()
    }

    /// Owner of `token_id` on the non-fungible ledger at `asset`.
    #[must_use]
    pub fn owner_of(&self, asset: Address, token_id: U256) -> Option<Address> {
        self.non_fungible(asset).and_then(|t| t.owner_of(token_id))
    }

    /// Entries awaiting commit or revert.
    #[must_use]
    pub fn pending_entries(&self) -> usize {
        self.journal.len()
    }

    fn undo(&mut self, entry: JournalEntry) {
        match entry {
            JournalEntry::FungibleBalance {
                asset,
                holder,
                prev,
            } => {
                if let Some(token) = self.fungibles.get_mut(&asset) {
                    token.set_balance(holder, prev);
                }
            }
            JournalEntry::FungibleAllowance {
                asset,
                owner,
                spender,
                prev,
            } => {
                if let Some(token) = self.fungibles.get_mut(&asset) {
                    token.set_allowance(owner, spender, prev);
                }
            }
            JournalEntry::TokenOwner {
                asset,
                token_id,
                prev,
            } => {
                if let Some(token) = self.non_fungibles.get_mut(&asset) {
                    token.set_owner(token_id, prev);
                }
            }
            JournalEntry::TokenApproval {
                asset,
                token_id,
                prev,
            } => {
                if let Some(token) = self.non_fungibles.get_mut(&asset) {
                    token.set_approval(token_id, prev);
                }
            }
        }
    }
}

impl SettlementLedgers for LedgerBook {
    fn transfer_fungible(
        &mut self,
        asset: Address,
        spender: Address,
        owner: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let token = self
            .fungibles
            .get_mut(&asset)
            .ok_or(LedgerError::UnknownAsset(asset))?;

        let prior = [
            JournalEntry::FungibleBalance {
                asset,
                holder: owner,
                prev: token.balance_of(owner),
            },
            JournalEntry::FungibleBalance {
                asset,
                holder: recipient,
                prev: token.balance_of(recipient),
            },
            JournalEntry::FungibleAllowance {
                asset,
                owner,
                spender,
                prev: token.allowance(owner, spender),
            },
        ];

        token.transfer_from(spender, owner, recipient, amount)?;

        for entry in prior {
            self.journal.record(entry);
        }
        tracing::trace!(%asset, %owner, %recipient, %amount, "fungible transfer applied");
        Ok(())
    }

    fn transfer_non_fungible(
        &mut self,
        asset: Address,
        spender: Address,
        owner: Address,
        recipient: Address,
        token_id: U256,
    ) -> Result<(), LedgerError> {
        let token = self
            .non_fungibles
            .get_mut(&asset)
            .ok_or(LedgerError::UnknownAsset(asset))?;

        let prior = [
            JournalEntry::TokenOwner {
                asset,
                token_id,
                prev: token.owner_of(token_id),
            },
            JournalEntry::TokenApproval {
                asset,
                token_id,
                prev: token.get_approved(token_id),
            },
        ];

        token.transfer_from(spender, owner, recipient, token_id)?;

        for entry in prior {
            self.journal.record(entry);
        }
        tracing::trace!(%asset, %owner, %recipient, %token_id, "non-fungible transfer applied");
        Ok(())
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.journal.checkpoint()
    }

    fn revert_to(&mut self, checkpoint: Checkpoint) {
        let undone = self.journal.unwind(checkpoint);
        if !undone.is_empty() {
            tracing::debug!(entries = undone.len(), "reverting ledger transfers");
        }
        for entry in undone {
            self.undo(entry);
        }
    }

    fn commit(&mut self, checkpoint: Checkpoint) {
        self.journal.commit(checkpoint);
    }
}
