use casper_types::ApiError;
use thiserror::Error;

/// Errors for the launch token ledger
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum TokenError {
    #[error("insufficient balance")]
    InsufficientBalance = 1,
    #[error("insufficient allowance")]
    InsufficientAllowance = 2,
    #[error("caller is not the authorized minter of this token")]
    Unauthorized = 3,
    #[error("arithmetic overflow")]
    Overflow = 4,
    #[error("peer-to-peer transfers are disabled until graduation")]
    TradingDisabled = 5,
    #[error("authorized minter is already set")]
    AlreadySet = 6,
    #[error("trading is already enabled")]
    TradingAlreadyEnabled = 7,
}

impl TokenError {
    pub fn code(self) -> u16 {
        self as u16
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError::User(error.code())
    }
}
