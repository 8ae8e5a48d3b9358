use std::collections::BTreeMap;

use casper_types::{Key, U256};

/// Balance book keyed by holder
#[derive(Debug, Clone, Default)]
pub struct Balances {
    entries: BTreeMap<Key, U256>,
}

impl Balances {
    /// Read balance, zero for unknown holders
    pub fn read_balance(&self, owner: &Key) -> U256 {
        self.entries.get(owner).copied().unwrap_or_default()
    }

    /// Write balance, dropping the entry once it reaches zero
    pub fn write_balance(&mut self, owner: &Key, amount: U256) {
        if amount.is_zero() {
            self.entries.remove(owner);
        } else {
            self.entries.insert(*owner, amount);
        }
    }

    pub fn holders(&self) -> usize {
        self.entries.len()
    }

    /// Sum of every balance, used to reconcile against total supply
    pub fn sum(&self) -> Option<U256> {
        self.entries
            .values()
            .try_fold(U256::zero(), |acc, amount| acc.checked_add(*amount))
    }
}
