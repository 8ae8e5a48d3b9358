use casper_types::Key;

/// Proof of minting authority over one ledger.
///
/// Only [`LaunchToken::bind_minter`](crate::LaunchToken::bind_minter) can
/// construct it, and a ledger binds its minter exactly once, so holding a
/// `MinterCap` is the sole way to grow a token's supply. It is neither
/// `Clone` nor `Copy`.
#[derive(Debug, PartialEq, Eq)]
pub struct MinterCap {
    token: Key,
    minter: Key,
}

impl MinterCap {
    pub(crate) fn new(token: Key, minter: Key) -> Self {
        Self { token, minter }
    }

    /// Ledger this capability was issued by
    pub fn token(&self) -> Key {
        self.token
    }

    /// Account the ledger treats as its authorized minter
    pub fn minter(&self) -> Key {
        self.minter
    }
}
