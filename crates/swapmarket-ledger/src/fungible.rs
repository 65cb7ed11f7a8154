//! In-memory fungible token ledger.
//!
//! Tracks per-holder balances and per-(owner, spender) allowances.
//! All mutations are atomic: either the full operation succeeds or
//! the ledger is unchanged.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use swapmarket_types::LedgerError;

use crate::FungibleLedger;

/// Reference fungible ledger with allowance-gated `transfer_from`.
///
/// An allowance of `U256::MAX` is treated as infinite and never decremented.
#[derive(Debug, Clone, Default)]
pub struct FungibleToken {
    symbol: String,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
    total_supply: U256,
}

impl FungibleToken {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Create `amount` new units for `to`. Fails without effect if total
    /// supply would overflow.
    pub fn mint(&mut self, to: Address, amount: U256) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow {
                supply: self.total_supply,
                amount,
            })?;
        *self.balances.entry(to).or_default() += amount;
        self.total_supply = supply;
        Ok(())
    }

    /// Set `spender`'s allowance over `owner`'s balance (last write wins).
    pub fn approve(&mut self, owner: Address, spender: Address, amount: U256) {
        self.set_allowance(owner, spender, amount);
    }

    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Sum of every holder's balance. Equals `total_supply` unless the
    /// ledger is corrupt.
    #[must_use]
    pub fn circulating(&self) -> U256 {
        self.balances.values().fold(U256::ZERO, |acc, b| acc + *b)
    }

    pub(crate) fn set_balance(&mut self, holder: Address, amount: U256) {
        if amount.is_zero() {
            self.balances.remove(&holder);
        } else {
            self.balances.insert(holder, amount);
        }
    }

    pub(crate) fn set_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }
}

impl FungibleLedger for FungibleToken {
    fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        if recipient.is_zero() {
            return Err(LedgerError::InvalidRecipient);
        }

        let allowance = self.allowance(owner, spender);
        if spender != owner && allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                available: allowance,
            });
        }

        let balance = self.balance_of(owner);
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }

        // All checks passed; apply.
        if spender != owner && allowance != U256::MAX {
            self.set_allowance(owner, spender, allowance - amount);
        }
        self.set_balance(owner, balance - amount);
        let credited = self.balance_of(recipient) + amount;
        self.set_balance(recipient, credited);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::repeat_byte(b)
    }

    fn funded() -> FungibleToken {
        let mut token = FungibleToken::new("MOCK");
        token.mint(addr(1), U256::from(1_000_000)).unwrap();
        token
    }

    #[test]
    fn mint_increases_balance_and_supply() {
        let token = funded();
        assert_eq!(token.balance_of(addr(1)), U256::from(1_000_000));
        assert_eq!(token.total_supply(), U256::from(1_000_000));
        assert_eq!(token.circulating(), token.total_supply());
        assert_eq!(token.symbol(), "MOCK");
    }

    #[test]
    fn mint_overflow_rejected_without_effect() {
        let mut token = FungibleToken::new("MOCK");
        token.mint(addr(1), U256::MAX - U256::from(1)).unwrap();
        let err = token.mint(addr(2), U256::from(2)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::SupplyOverflow {
                supply: U256::MAX - U256::from(1),
                amount: U256::from(2),
            }
        );
        assert_eq!(token.balance_of(addr(2)), U256::ZERO);
        assert_eq!(token.total_supply(), U256::MAX - U256::from(1));
        token.mint(addr(2), U256::from(1)).unwrap();
        assert_eq!(token.total_supply(), U256::MAX);
        assert_eq!(token.circulating(), U256::MAX);
    }

    #[test]
    fn mint_to_zero_rejected() {
        let mut token = FungibleToken::new("MOCK");
        assert_eq!(
            token.mint(Address::ZERO, U256::from(1)),
            Err(LedgerError::InvalidRecipient)
        );
    }

    #[test]
    fn transfer_spends_allowance() {
        let mut token = funded();
        token.approve(addr(1), addr(9), U256::from(100));
        token
            .transfer_from(addr(9), addr(1), addr(2), U256::from(5))
            .unwrap();
        assert_eq!(token.balance_of(addr(1)), U256::from(999_995));
        assert_eq!(token.balance_of(addr(2)), U256::from(5));
        assert_eq!(token.allowance(addr(1), addr(9)), U256::from(95));
    }

    #[test]
    fn insufficient_allowance_fails_without_effect() {
        let mut token = funded();
        token.approve(addr(1), addr(9), U256::from(4));
        let err = token
            .transfer_from(addr(9), addr(1), addr(2), U256::from(5))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
        assert_eq!(token.balance_of(addr(1)), U256::from(1_000_000));
        assert_eq!(token.balance_of(addr(2)), U256::ZERO);
        assert_eq!(token.allowance(addr(1), addr(9)), U256::from(4));
    }

    #[test]
    fn insufficient_balance_fails_without_effect() {
        let mut token = funded();
        token.approve(addr(1), addr(9), U256::MAX);
        let err = token
            .transfer_from(addr(9), addr(1), addr(2), U256::from(2_000_000))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(token.allowance(addr(1), addr(9)), U256::MAX);
    }

    #[test]
    fn infinite_allowance_not_decremented() {
        let mut token = funded();
        token.approve(addr(1), addr(9), U256::MAX);
        token
            .transfer_from(addr(9), addr(1), addr(2), U256::from(10))
            .unwrap();
        assert_eq!(token.allowance(addr(1), addr(9)), U256::MAX);
    }

    #[test]
    fn owner_moves_own_funds_without_allowance() {
        let mut token = funded();
        token
            .transfer_from(addr(1), addr(1), addr(2), U256::from(7))
            .unwrap();
        assert_eq!(token.balance_of(addr(2)), U256::from(7));
    }

    #[test]
    fn self_transfer_keeps_balance() {
        let mut token = funded();
        token
            .transfer_from(addr(1), addr(1), addr(1), U256::from(7))
            .unwrap();
        assert_eq!(token.balance_of(addr(1)), U256::from(1_000_000));
        assert_eq!(token.circulating(), token.total_supply());
    }

    #[test]
    fn transfer_to_zero_rejected() {
        let mut token = funded();
        let err = token
            .transfer_from(addr(1), addr(1), Address::ZERO, U256::from(1))
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidRecipient);
    }
}
