//! Undo journal for ledger transfers.
//!
//! Before a transfer mutates a ledger, the prior value of every slot it
//! touches is pushed here. Reverting to a [`Checkpoint`] pops and restores
//! those values newest-first, which returns every slot to its state at
//! the checkpoint.

use alloy_primitives::{Address, U256};

/// Position in the journal. Obtained from [`Journal::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

impl Checkpoint {
    #[must_use]
    pub fn depth(self) -> usize {
        self.0
    }
}

/// Prior value of one ledger slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    FungibleBalance {
        asset: Address,
        holder: Address,
        prev: U256,
    },
    FungibleAllowance {
        asset: Address,
        owner: Address,
        spender: Address,
        prev: U256,
    },
    TokenOwner {
        asset: Address,
        token_id: U256,
        prev: Option<Address>,
    },
    TokenApproval {
        asset: Address,
        token_id: U256,
        prev: Option<Address>,
    },
}

/// Append-only list of [`JournalEntry`] values with checkpoint support.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.entries.len())
    }

    pub fn record(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Remove and return every entry recorded after `checkpoint`,
    /// newest first.
    pub fn unwind(&mut self, checkpoint: Checkpoint) -> Vec<JournalEntry> {
        let start = checkpoint.0.min(self.entries.len());
        let mut undone = self.entries.split_off(start);
        undone.reverse();
        undone
    }

    /// Forget entries after `checkpoint`; they can no longer be reverted.
    /// Committing the outermost checkpoint empties the journal.
    pub fn commit(&mut self, checkpoint: Checkpoint) {
        if checkpoint.0 == 0 {
            self.entries.clear();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
