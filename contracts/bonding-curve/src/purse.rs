use std::collections::BTreeMap;

use casper_types::{Key, U512};

use crate::error::PurseError;

/// Reserve-currency balances for every account and contract.
///
/// Stands in for the host's native purses: curves hold their reserve here
/// under their own key and pay sellers and the treasury out of it.
#[derive(Debug, Clone, Default)]
pub struct Purses {
    balances: BTreeMap<Key, U512>,
}

impl Purses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &Key) -> U512 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Fund an account from outside the system
    pub fn credit(&mut self, account: &Key, amount: U512) -> Result<(), PurseError> {
        let balance = self.balance_of(account);
        let new_balance = balance.checked_add(amount).ok_or(PurseError::Overflow)?;
        self.write(account, new_balance);
        Ok(())
    }

    pub fn transfer(&mut self, from: &Key, to: &Key, amount: U512) -> Result<(), PurseError> {
        if amount.is_zero() || from == to {
            return if self.balance_of(from) < amount {
                Err(PurseError::InsufficientFunds)
            } else {
                Ok(())
            };
        }
        let from_balance = self.balance_of(from);
        let remaining = from_balance
            .checked_sub(amount)
            .ok_or(PurseError::InsufficientFunds)?;
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(PurseError::Overflow)?;

        self.write(from, remaining);
        self.write(to, to_balance);
        Ok(())
    }

    /// Total across all purses; transfers never change it
    pub fn total(&self) -> Option<U512> {
        self.balances
            .values()
            .try_fold(U512::zero(), |acc, amount| acc.checked_add(*amount))
    }

    fn write(&mut self, account: &Key, amount: U512) {
        if amount.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, amount);
        }
    }
}
