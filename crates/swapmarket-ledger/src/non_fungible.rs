//! In-memory non-fungible token ledger.
//!
//! Each token id has exactly one owner. A transfer may be made by the
//! owner, by the token's approved address, or by an operator the owner
//! approved for all of their tokens. A transfer clears the per-token
//! approval.

use std::collections::{HashMap, HashSet};

use alloy_primitives::{Address, U256};
use swapmarket_types::LedgerError;

use crate::NonFungibleLedger;

/// Reference non-fungible ledger with sequential minting.
#[derive(Debug, Clone, Default)]
pub struct NonFungibleToken {
    name: String,
    owners: HashMap<U256, Address>,
    approvals: HashMap<U256, Address>,
    operators: HashSet<(Address, Address)>,
    next_id: U256,
}

impl NonFungibleToken {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mint the next sequential id (starting at 0) to `to`.
    pub fn safe_mint(&mut self, to: Address) -> Result<U256, LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }
        let id = self.next_id;
        self.owners.insert(id, to);
        self.next_id = id + U256::from(1);
        Ok(id)
    }

    /// Approve `spender` for a single token. Only the owner or one of the
    /// owner's operators may approve.
    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        token_id: U256,
    ) -> Result<(), LedgerError> {
        let owner = self
            .owner_of(token_id)
            .ok_or(LedgerError::UnknownToken(token_id))?;
        if caller != owner && !self.is_approved_for_all(owner, caller) {
            return Err(LedgerError::NotApproved {
                token_id,
                spender: caller,
            });
        }
        self.set_approval(token_id, Some(spender));
        Ok(())
    }

    /// Grant or revoke `operator` over every token `owner` holds.
    pub fn set_approval_for_all(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.operators.insert((owner, operator));
        } else {
            self.operators.remove(&(owner, operator));
        }
    }

    /// Number of tokens held by `owner`.
    #[must_use]
    pub fn balance_of(&self, owner: Address) -> usize {
        self.owners.values().filter(|o| **o == owner).count()
    }

    /// Number of tokens minted so far.
    #[must_use]
    pub fn minted(&self) -> usize {
        self.owners.len()
    }

    pub(crate) fn set_owner(&mut self, token_id: U256, owner: Option<Address>) {
        match owner {
            Some(owner) => self.owners.insert(token_id, owner),
            None => self.owners.remove(&token_id),
        };
    }

    pub(crate) fn set_approval(&mut self, token_id: U256, spender: Option<Address>) {
        match spender {
            Some(spender) if !spender.is_zero() => self.approvals.insert(token_id, spender),
            _ => self.approvals.remove(&token_id),
        };
    }
}

impl NonFungibleLedger for NonFungibleToken {
    fn owner_of(&self, token_id: U256) -> Option<Address> {
        self.owners.get(&token_id).copied()
    }

    fn get_approved(&self, token_id: U256) -> Option<Address> {
        self.approvals.get(&token_id).copied()
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operators.contains(&(owner, operator))
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        recipient: Address,
        token_id: U256,
    ) -> Result<(), LedgerError> {
        let current = self
            .owner_of(token_id)
            .ok_or(LedgerError::UnknownToken(token_id))?;
        if current != owner {
            return Err(LedgerError::NotTokenOwner {
                token_id,
                claimed: owner,
            });
        }

        let authorized = spender == owner
            || self.get_approved(token_id) == Some(spender)
            || self.is_approved_for_all(owner, spender);
        if !authorized {
            return Err(LedgerError::NotApproved { token_id, spender });
        }

        if recipient.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }

        self.set_approval(token_id, None);
        self.set_owner(token_id, Some(recipient));
        Ok(())
    }
}
