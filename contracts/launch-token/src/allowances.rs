use std::collections::BTreeMap;

use casper_types::{Key, U256};

/// Allowances keyed by (owner, spender)
#[derive(Debug, Clone, Default)]
pub struct Allowances {
    entries: BTreeMap<(Key, Key), U256>,
}

impl Allowances {
    pub fn read_allowance(&self, owner: &Key, spender: &Key) -> U256 {
        self.entries
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn write_allowance(&mut self, owner: &Key, spender: &Key, amount: U256) {
        if amount.is_zero() {
            self.entries.remove(&(*owner, *spender));
        } else {
            self.entries.insert((*owner, *spender), amount);
        }
    }
}
