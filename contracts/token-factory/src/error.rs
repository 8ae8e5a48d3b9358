use bonding_curve::{BondingCurveError, PurseError};
use casper_types::ApiError;
use launch_token::TokenError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    #[error("caller is not the registry owner")]
    Unauthorized,
    #[error("attached value does not cover creation fee and initial buy")]
    InsufficientInput,
    #[error("platform fee above 10%")]
    InvalidFee,
    #[error("symbol must be 1 to 6 bytes")]
    InvalidSymbol,
    #[error("name must be 1 to 50 bytes")]
    InvalidName,
    #[error("no launch for this asset")]
    LaunchNotFound,
    #[error("launch id out of bounds")]
    IndexOutOfBounds,
    #[error("registry purse is empty")]
    NothingToWithdraw,
    #[error("invalid launchpad config: {0}")]
    InvalidConfig(&'static str),
    #[error("arithmetic overflow")]
    Overflow,
    #[error(transparent)]
    Curve(#[from] BondingCurveError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Purse(#[from] PurseError),
}

impl FactoryError {
    pub fn code(&self) -> u16 {
        match self {
            FactoryError::Unauthorized => 1,
            FactoryError::InsufficientInput => 2,
            FactoryError::InvalidFee => 3,
            FactoryError::InvalidSymbol => 4,
            FactoryError::InvalidName => 5,
            FactoryError::LaunchNotFound => 6,
            FactoryError::IndexOutOfBounds => 7,
            FactoryError::NothingToWithdraw => 8,
            FactoryError::InvalidConfig(_) => 9,
            FactoryError::Overflow => 10,
            FactoryError::Curve(error) => 1_000 + error.code(),
            FactoryError::Token(error) => 2_000 + error.code(),
            FactoryError::Purse(error) => 3_000 + *error as u16,
        }
    }
}

impl From<FactoryError> for ApiError {
    fn from(error: FactoryError) -> Self {
        ApiError::User(error.code())
    }
}
