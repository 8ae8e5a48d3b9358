//! Launch token ledger.
//!
//! Balance and supply accounting for one launched asset. Supply can only grow
//! through the holder of the ledger's [`MinterCap`], which the bonding curve
//! receives when the launch is created. Peer-to-peer transfers stay gated
//! until the minter enables trading at graduation; moves to or from the minter
//! itself are always allowed so the curve can settle trades.

mod allowances;
mod balances;
mod error;
mod minter;

use casper_types::{Key, U256};
use tracing::{debug, info};

use allowances::Allowances;
use balances::Balances;

pub use error::TokenError;
pub use minter::MinterCap;

/// Token decimals, amounts are fixed-point with 18 implied places
pub const TOKEN_DECIMALS: u8 = 18;

#[derive(Debug, Clone)]
pub struct LaunchToken {
    key: Key,
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: U256,
    balances: Balances,
    allowances: Allowances,
    authorized_minter: Option<Key>,
    trading_enabled: bool,
}

impl LaunchToken {
    /// New ledger with no holders and no minter bound yet
    pub fn new(key: Key, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            symbol: symbol.into(),
            decimals: TOKEN_DECIMALS,
            total_supply: U256::zero(),
            balances: Balances::default(),
            allowances: Allowances::default(),
            authorized_minter: None,
            trading_enabled: false,
        }
    }

    // ============ Views ============

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    pub fn balance_of(&self, owner: &Key) -> U256 {
        self.balances.read_balance(owner)
    }

    pub fn allowance(&self, owner: &Key, spender: &Key) -> U256 {
        self.allowances.read_allowance(owner, spender)
    }

    pub fn authorized_minter(&self) -> Option<Key> {
        self.authorized_minter
    }

    pub fn trading_enabled(&self) -> bool {
        self.trading_enabled
    }

    pub fn holder_count(&self) -> usize {
        self.balances.holders()
    }

    /// True when the sum of all balances equals total supply
    pub fn reconciles(&self) -> bool {
        self.balances.sum() == Some(self.total_supply)
    }

    // ============ Minter ============

    /// Bind the authorized minter. Succeeds once; the returned capability is
    /// the only handle that can mint, burn on behalf of holders, or enable
    /// trading.
    pub fn bind_minter(&mut self, minter: Key) -> Result<MinterCap, TokenError> {
        if self.authorized_minter.is_some() {
            return Err(TokenError::AlreadySet);
        }
        self.authorized_minter = Some(minter);
        info!(token = ?self.key, minter = ?minter, "authorized minter bound");
        Ok(MinterCap::new(self.key, minter))
    }

    pub fn mint(&mut self, cap: &MinterCap, to: &Key, amount: U256) -> Result<(), TokenError> {
        self.require_minter(cap)?;

        let balance = self.balances.read_balance(to);
        let new_balance = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.balances.write_balance(to, new_balance);
        self.total_supply = new_supply;
        debug!(token = ?self.key, to = ?to, %amount, "mint");
        Ok(())
    }

    /// Burn from any holder, used by the curve when a holder sells back
    pub fn minter_burn(
        &mut self,
        cap: &MinterCap,
        from: &Key,
        amount: U256,
    ) -> Result<(), TokenError> {
        self.require_minter(cap)?;
        self.burn_internal(from, amount)
    }

    /// Permanently open peer-to-peer transfers
    pub fn enable_trading(&mut self, cap: &MinterCap) -> Result<(), TokenError> {
        self.require_minter(cap)?;
        if self.trading_enabled {
            return Err(TokenError::TradingAlreadyEnabled);
        }
        self.trading_enabled = true;
        info!(token = ?self.key, "trading enabled");
        Ok(())
    }

    // ============ Holder Operations ============

    /// Burn the caller's own tokens
    pub fn burn(&mut self, owner: &Key, amount: U256) -> Result<(), TokenError> {
        self.burn_internal(owner, amount)
    }

    /// Burn another holder's tokens against an allowance. An owner burning
    /// its own balance needs no allowance.
    pub fn burn_from(&mut self, spender: &Key, owner: &Key, amount: U256) -> Result<(), TokenError> {
        if spender == owner {
            return self.burn_internal(owner, amount);
        }
        let remaining = self.checked_allowance(owner, spender, amount)?;
        if self.balances.read_balance(owner) < amount {
            return Err(TokenError::InsufficientBalance);
        }
        self.allowances.write_allowance(owner, spender, remaining);
        self.burn_internal(owner, amount)
    }

    pub fn approve(&mut self, owner: &Key, spender: &Key, amount: U256) {
        self.allowances.write_allowance(owner, spender, amount);
    }

    pub fn transfer(&mut self, sender: &Key, recipient: &Key, amount: U256) -> Result<(), TokenError> {
        self.require_transferable(sender, recipient)?;
        self.transfer_internal(sender, recipient, amount)
    }

    pub fn transfer_from(
        &mut self,
        spender: &Key,
        owner: &Key,
        recipient: &Key,
        amount: U256,
    ) -> Result<(), TokenError> {
        self.require_transferable(owner, recipient)?;
        let remaining = self.checked_allowance(owner, spender, amount)?;
        self.transfer_internal(owner, recipient, amount)?;
        self.allowances.write_allowance(owner, spender, remaining);
        Ok(())
    }

    // ============ Internal Functions ============

    fn require_minter(&self, cap: &MinterCap) -> Result<(), TokenError> {
        if cap.token() != self.key || self.authorized_minter != Some(cap.minter()) {
            return Err(TokenError::Unauthorized);
        }
        Ok(())
    }

    fn require_transferable(&self, sender: &Key, recipient: &Key) -> Result<(), TokenError> {
        if self.trading_enabled {
            return Ok(());
        }
        match self.authorized_minter {
            Some(minter) if minter == *sender || minter == *recipient => Ok(()),
            _ => Err(TokenError::TradingDisabled),
        }
    }

    fn checked_allowance(&self, owner: &Key, spender: &Key, amount: U256) -> Result<U256, TokenError> {
        let current = self.allowances.read_allowance(owner, spender);
        current
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientAllowance)
    }

    fn burn_internal(&mut self, from: &Key, amount: U256) -> Result<(), TokenError> {
        let balance = self.balances.read_balance(from);
        let new_balance = balance
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance)?;
        let new_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(TokenError::Overflow)?;

        self.balances.write_balance(from, new_balance);
        self.total_supply = new_supply;
        debug!(token = ?self.key, from = ?from, %amount, "burn");
        Ok(())
    }

    fn transfer_internal(&mut self, sender: &Key, recipient: &Key, amount: U256) -> Result<(), TokenError> {
        let sender_balance = self.balances.read_balance(sender);
        if sender_balance < amount {
            return Err(TokenError::InsufficientBalance);
        }
        if sender == recipient {
            return Ok(());
        }
        let recipient_balance = self.balances.read_balance(recipient);
        let new_recipient_balance = recipient_balance
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.balances.write_balance(sender, sender_balance - amount);
        self.balances.write_balance(recipient, new_recipient_balance);
        Ok(())
    }
}
