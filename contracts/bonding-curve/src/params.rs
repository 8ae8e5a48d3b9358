use casper_types::{U256, U512};

use crate::curves::{self, widen};
use crate::error::BondingCurveError;
use crate::fees::SellFeeSchedule;

/// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Maximum platform fee: 10% (1000 basis points)
pub const MAX_PLATFORM_FEE_BPS: u64 = 1_000;

pub const DEFAULT_PLATFORM_FEE_BPS: u64 = 100;

/// Reserve currency decimals
pub const RESERVE_DECIMALS: u8 = 18;

// Default curve shape, in whole units
pub const DEFAULT_VIRTUAL_RESERVE: u64 = 570;
pub const DEFAULT_VIRTUAL_SUPPLY: u64 = 750_000_000;
pub const DEFAULT_CURVE_SUPPLY_CAP: u64 = 700_000_000;

// Pool seeded at graduation; 6_840 / 40M matches the curve's final price
pub const DEFAULT_LIQUIDITY_ASSET_ALLOCATION: u64 = 40_000_000;
pub const DEFAULT_LIQUIDITY_RESERVE_ALLOCATION: u64 = 6_840;

// Sell fee drops one basis point per second for 15 minutes
pub const DEFAULT_INITIAL_SELL_FEE_BPS: u64 = 1_000;
pub const DEFAULT_FINAL_SELL_FEE_BPS: u64 = 100;
pub const DEFAULT_SELL_FEE_DECAY_MS: u64 = 900_000;

pub const DEFAULT_GRADUATION_SLIPPAGE_BPS: u64 = 9_500;
pub const DEFAULT_GRADUATION_DEADLINE_MS: u64 = 5 * 60 * 1_000;

/// Whole tokens to base units
pub fn whole_tokens(amount: u64) -> U256 {
    U256::from(amount) * U256::exp10(launch_token::TOKEN_DECIMALS as usize)
}

/// Whole reserve units to base units
pub fn whole_reserve(amount: u64) -> U512 {
    U512::from(amount) * U512::exp10(RESERVE_DECIMALS as usize)
}

/// What happens to the freshly minted liquidity allocation when the venue
/// call fails and graduation rolls back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraduationRollback {
    /// Burn the allocation so supply matches the pre-graduation state
    #[default]
    BurnAllocation,
    /// Leave the allocation on the curve's own balance
    LeaveOutstanding,
}

/// Protocol constants for one curve, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveParams {
    pub virtual_reserve: U512,
    pub virtual_supply: U256,
    pub curve_supply_cap: U256,
    pub graduation_threshold: U512,
    pub liquidity_asset_allocation: U256,
    pub liquidity_reserve_allocation: U512,
    /// Minimum accepted by the venue, as bps of each offered amount
    pub graduation_slippage_bps: u64,
    pub graduation_deadline_ms: u64,
    pub sell_fee: SellFeeSchedule,
    pub rollback: GraduationRollback,
}

impl Default for CurveParams {
    fn default() -> Self {
        let virtual_reserve = whole_reserve(DEFAULT_VIRTUAL_RESERVE);
        let virtual_supply = whole_tokens(DEFAULT_VIRTUAL_SUPPLY);
        let curve_supply_cap = whole_tokens(DEFAULT_CURVE_SUPPLY_CAP);
        let graduation_threshold =
            curves::derive_graduation_threshold(virtual_reserve, virtual_supply, curve_supply_cap)
                .unwrap_or_default();

        Self {
            virtual_reserve,
            virtual_supply,
            curve_supply_cap,
            graduation_threshold,
            liquidity_asset_allocation: whole_tokens(DEFAULT_LIQUIDITY_ASSET_ALLOCATION),
            liquidity_reserve_allocation: whole_reserve(DEFAULT_LIQUIDITY_RESERVE_ALLOCATION),
            graduation_slippage_bps: DEFAULT_GRADUATION_SLIPPAGE_BPS,
            graduation_deadline_ms: DEFAULT_GRADUATION_DEADLINE_MS,
            sell_fee: SellFeeSchedule {
                initial_bps: DEFAULT_INITIAL_SELL_FEE_BPS,
                final_bps: DEFAULT_FINAL_SELL_FEE_BPS,
                decay_duration_ms: DEFAULT_SELL_FEE_DECAY_MS,
            },
            rollback: GraduationRollback::default(),
        }
    }
}

impl CurveParams {
    pub fn validate(&self) -> Result<(), BondingCurveError> {
        if self.virtual_reserve.is_zero() {
            return Err(BondingCurveError::InvalidParams("virtual reserve must be positive"));
        }
        if self.curve_supply_cap.is_zero() || self.curve_supply_cap >= self.virtual_supply {
            return Err(BondingCurveError::InvalidParams(
                "supply cap must be positive and below virtual supply",
            ));
        }
        if self.graduation_threshold.is_zero() {
            return Err(BondingCurveError::InvalidParams("graduation threshold must be positive"));
        }
        let reachable = curves::derive_graduation_threshold(
            self.virtual_reserve,
            self.virtual_supply,
            self.curve_supply_cap,
        )
        .ok_or(BondingCurveError::Overflow)?;
        if self.graduation_threshold > reachable {
            return Err(BondingCurveError::InvalidParams(
                "graduation threshold unreachable before the supply cap",
            ));
        }
        if self.liquidity_reserve_allocation > self.graduation_threshold {
            return Err(BondingCurveError::InvalidParams(
                "liquidity reserve allocation exceeds graduation threshold",
            ));
        }
        if self.graduation_slippage_bps > BPS_DENOMINATOR {
            return Err(BondingCurveError::InvalidParams("slippage floor above 100%"));
        }
        let fee = &self.sell_fee;
        if fee.initial_bps > BPS_DENOMINATOR || fee.final_bps > fee.initial_bps {
            return Err(BondingCurveError::InvalidParams(
                "sell fee must decay from at most 100%",
            ));
        }
        if fee.decay_duration_ms == 0 {
            return Err(BondingCurveError::InvalidParams("sell fee decay duration is zero"));
        }
        // k at the threshold must fit in U512
        let reserve_side = self
            .virtual_reserve
            .checked_add(self.graduation_threshold)
            .ok_or(BondingCurveError::Overflow)?;
        widen(self.virtual_supply)
            .checked_mul(reserve_side)
            .ok_or(BondingCurveError::Overflow)?;
        Ok(())
    }
}
