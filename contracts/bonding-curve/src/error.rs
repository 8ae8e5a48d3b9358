use casper_types::ApiError;
use launch_token::TokenError;
use thiserror::Error;

use crate::venue::VenueError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BondingCurveError {
    #[error("input is zero or consumed entirely by fees")]
    InsufficientInput,
    #[error("output is below the caller's minimum")]
    SlippageExceeded,
    #[error("trade rounds to zero output")]
    ZeroOutput,
    #[error("curve has graduated")]
    CurveGraduated,
    #[error("seller holds fewer tokens than offered")]
    InsufficientBalance,
    #[error("sell exceeds the amount sold through the curve")]
    InsufficientSupply,
    #[error("curve reserve cannot cover the payout")]
    InsufficientLiquidity,
    #[error("curve supply cap reached")]
    SupplyCapReached,
    #[error("reserve raised is below the liquidity allocation")]
    GraduationThresholdNotMet,
    #[error("liquidity venue failed: {0}")]
    VenueFailure(VenueError),
    #[error("venue accepted liquidity but settlement failed: {0}")]
    SettlementFailed(Box<BondingCurveError>),
    #[error("operation already in progress on this curve")]
    LockedReentrancy,
    #[error("ledger does not belong to this curve")]
    TokenMismatch,
    #[error("invalid curve parameters: {0}")]
    InvalidParams(&'static str),
    #[error("arithmetic overflow")]
    Overflow,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Purse(#[from] PurseError),
}

impl BondingCurveError {
    pub fn code(&self) -> u16 {
        match self {
            BondingCurveError::InsufficientInput => 1,
            BondingCurveError::SlippageExceeded => 2,
            BondingCurveError::ZeroOutput => 3,
            BondingCurveError::CurveGraduated => 4,
            BondingCurveError::InsufficientBalance => 5,
            BondingCurveError::InsufficientSupply => 6,
            BondingCurveError::InsufficientLiquidity => 7,
            BondingCurveError::SupplyCapReached => 8,
            BondingCurveError::GraduationThresholdNotMet => 9,
            BondingCurveError::VenueFailure(_) => 10,
            BondingCurveError::LockedReentrancy => 11,
            BondingCurveError::TokenMismatch => 12,
            BondingCurveError::InvalidParams(_) => 13,
            BondingCurveError::Overflow => 14,
            BondingCurveError::SettlementFailed(_) => 15,
            BondingCurveError::Token(error) => 100 + error.code(),
            BondingCurveError::Purse(error) => 200 + *error as u16,
        }
    }
}

impl From<BondingCurveError> for ApiError {
    fn from(error: BondingCurveError) -> Self {
        ApiError::User(error.code())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum PurseError {
    #[error("insufficient funds in purse")]
    InsufficientFunds = 1,
    #[error("purse balance overflow")]
    Overflow = 2,
}
