use casper_types::{Key, U256, U512};

use crate::error::BondingCurveError;
use crate::venue::VenueError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurveEvent {
    /// Price and volume update after every buy or sell
    Trade {
        side: TradeSide,
        trader: Key,
        reserve_amount: U512,
        asset_amount: U256,
        fee: U512,
        price_after: U512,
        reserve_raised: U512,
        asset_sold: U256,
    },
    /// Terminal: liquidity is live on the venue
    GraduationSucceeded {
        pool: Key,
        asset_liquidity: U256,
        reserve_liquidity: U512,
        liquidity: U256,
        treasury_amount: U512,
    },
    GraduationRolledBack {
        reason: VenueError,
        allocation_burned: bool,
    },
    /// The venue accepted but the curve could not pay it; ledger and purses
    /// are back where they were before graduation started
    GraduationSettlementFailed {
        pool: Key,
        error: BondingCurveError,
        allocation_burned: bool,
    },
}
