//! Boundary to the external liquidity venue that receives the graduation
//! liquidity. The venue is only ever reached through [`LiquidityVenue`];
//! its answer is a plain `Result` that the graduation state machine consumes.

use casper_types::{Key, U256, U512};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VenueError {
    #[error("deadline {deadline} passed at block time {now}")]
    DeadlineExpired { deadline: u64, now: u64 },
    #[error("amounts fell below the slippage floor")]
    SlippageFloor,
    #[error("receipt does not match the offered liquidity")]
    InvalidReceipt,
    #[error("venue rejected liquidity: {0}")]
    Rejected(String),
}

/// Liquidity offered to the venue at graduation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityRequest {
    pub asset: Key,
    pub asset_amount: U256,
    pub min_asset_amount: U256,
    pub reserve_amount: U512,
    pub min_reserve_amount: U512,
    /// Receives the liquidity position
    pub recipient: Key,
    /// Latest block time at which the venue may accept
    pub deadline: u64,
}

/// What the venue actually took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityReceipt {
    /// Account the used asset and reserve are paid to
    pub pool: Key,
    pub asset_used: U256,
    pub reserve_used: U512,
    pub liquidity: U256,
}

impl LiquidityRequest {
    /// Check a receipt against the offer before settling it
    pub fn verify(&self, receipt: &LiquidityReceipt, now: u64) -> Result<(), VenueError> {
        if now > self.deadline {
            return Err(VenueError::DeadlineExpired {
                deadline: self.deadline,
                now,
            });
        }
        if receipt.asset_used > self.asset_amount || receipt.reserve_used > self.reserve_amount {
            return Err(VenueError::InvalidReceipt);
        }
        if receipt.asset_used < self.min_asset_amount
            || receipt.reserve_used < self.min_reserve_amount
        {
            return Err(VenueError::SlippageFloor);
        }
        Ok(())
    }
}

pub trait LiquidityVenue {
    /// Add `request` as liquidity. Either the whole deposit is accepted and a
    /// receipt returned, or nothing happens and an error is returned.
    fn provide_liquidity(
        &mut self,
        request: &LiquidityRequest,
        block_time: u64,
    ) -> Result<LiquidityReceipt, VenueError>;
}

impl<V: LiquidityVenue + ?Sized> LiquidityVenue for Box<V> {
    fn provide_liquidity(
        &mut self,
        request: &LiquidityRequest,
        block_time: u64,
    ) -> Result<LiquidityReceipt, VenueError> {
        (**self).provide_liquidity(request, block_time)
    }
}
