//! Launchpad configuration.
//!
//! Amounts are base units (18 decimals). Every field has a default, so a
//! config file only needs the values it overrides.

use bonding_curve::curves::derive_graduation_threshold;
use bonding_curve::params::{
    DEFAULT_CURVE_SUPPLY_CAP, DEFAULT_FINAL_SELL_FEE_BPS, DEFAULT_GRADUATION_DEADLINE_MS,
    DEFAULT_GRADUATION_SLIPPAGE_BPS, DEFAULT_INITIAL_SELL_FEE_BPS,
    DEFAULT_LIQUIDITY_ASSET_ALLOCATION, DEFAULT_LIQUIDITY_RESERVE_ALLOCATION,
    DEFAULT_PLATFORM_FEE_BPS, DEFAULT_SELL_FEE_DECAY_MS, DEFAULT_VIRTUAL_RESERVE,
    DEFAULT_VIRTUAL_SUPPLY, MAX_PLATFORM_FEE_BPS,
};
use bonding_curve::{CurveParams, GraduationRollback, SellFeeSchedule};
use casper_types::{U256, U512};
use serde::{Deserialize, Serialize};

use crate::error::FactoryError;

const ONE: u128 = 1_000_000_000_000_000_000;

/// Default creation fee: 1 whole reserve unit
pub const DEFAULT_CREATION_FEE: u128 = ONE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchpadConfig {
    pub creation_fee: u128,
    pub platform_fee_bps: u64,
    pub curve: CurveConfig,
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        Self {
            creation_fee: DEFAULT_CREATION_FEE,
            platform_fee_bps: DEFAULT_PLATFORM_FEE_BPS,
            curve: CurveConfig::default(),
        }
    }
}

impl LaunchpadConfig {
    pub fn validate(&self) -> Result<(), FactoryError> {
        if self.platform_fee_bps > MAX_PLATFORM_FEE_BPS {
            return Err(FactoryError::InvalidFee);
        }
        self.curve.to_params().map(|_| ())
    }
}

/// Curve constants applied to every new launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub virtual_reserve: u128,
    pub virtual_supply: u128,
    pub curve_supply_cap: u128,
    /// Derived from the three values above when absent
    pub graduation_threshold: Option<u128>,
    pub liquidity_asset_allocation: u128,
    pub liquidity_reserve_allocation: u128,
    pub graduation_slippage_bps: u64,
    pub graduation_deadline_ms: u64,
    pub initial_sell_fee_bps: u64,
    pub final_sell_fee_bps: u64,
    pub sell_fee_decay_ms: u64,
    /// Burn the liquidity allocation when graduation rolls back
    pub burn_allocation_on_rollback: bool,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            virtual_reserve: u128::from(DEFAULT_VIRTUAL_RESERVE) * ONE,
            virtual_supply: u128::from(DEFAULT_VIRTUAL_SUPPLY) * ONE,
            curve_supply_cap: u128::from(DEFAULT_CURVE_SUPPLY_CAP) * ONE,
            graduation_threshold: None,
            liquidity_asset_allocation: u128::from(DEFAULT_LIQUIDITY_ASSET_ALLOCATION) * ONE,
            liquidity_reserve_allocation: u128::from(DEFAULT_LIQUIDITY_RESERVE_ALLOCATION) * ONE,
            graduation_slippage_bps: DEFAULT_GRADUATION_SLIPPAGE_BPS,
            graduation_deadline_ms: DEFAULT_GRADUATION_DEADLINE_MS,
            initial_sell_fee_bps: DEFAULT_INITIAL_SELL_FEE_BPS,
            final_sell_fee_bps: DEFAULT_FINAL_SELL_FEE_BPS,
            sell_fee_decay_ms: DEFAULT_SELL_FEE_DECAY_MS,
            burn_allocation_on_rollback: true,
        }
    }
}

impl CurveConfig {
    /// Convert to validated curve parameters
    pub fn to_params(&self) -> Result<CurveParams, FactoryError> {
        let virtual_reserve = U512::from(self.virtual_reserve);
        let virtual_supply = U256::from(self.virtual_supply);
        let curve_supply_cap = U256::from(self.curve_supply_cap);

        let graduation_threshold = match self.graduation_threshold {
            Some(threshold) => U512::from(threshold),
            None => derive_graduation_threshold(virtual_reserve, virtual_supply, curve_supply_cap)
                .ok_or(FactoryError::InvalidConfig(
                    "supply cap must be below virtual supply",
                ))?,
        };

        let params = CurveParams {
            virtual_reserve,
            virtual_supply,
            curve_supply_cap,
            graduation_threshold,
            liquidity_asset_allocation: U256::from(self.liquidity_asset_allocation),
            liquidity_reserve_allocation: U512::from(self.liquidity_reserve_allocation),
            graduation_slippage_bps: self.graduation_slippage_bps,
            graduation_deadline_ms: self.graduation_deadline_ms,
            sell_fee: SellFeeSchedule {
                initial_bps: self.initial_sell_fee_bps,
                final_bps: self.final_sell_fee_bps,
                decay_duration_ms: self.sell_fee_decay_ms,
            },
            rollback: if self.burn_allocation_on_rollback {
                GraduationRollback::BurnAllocation
            } else {
                GraduationRollback::LeaveOutstanding
            },
        };
        params.validate()?;
        Ok(params)
    }
}
