use casper_types::{U256, U512};

use crate::error::BondingCurveError;
use crate::fees::bps_of;
use crate::params::CurveParams;

/// Real quantities held against the curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurvePosition {
    /// Reserve currently held against curve-sold supply
    pub reserve_raised: U512,
    /// Tokens minted through the curve and still outstanding
    pub asset_sold: U256,
}

impl CurvePosition {
    pub fn after_buy(&self, quote: &BuyQuote) -> Result<Self, BondingCurveError> {
        Ok(Self {
            reserve_raised: self
                .reserve_raised
                .checked_add(quote.net_in)
                .ok_or(BondingCurveError::Overflow)?,
            asset_sold: self
                .asset_sold
                .checked_add(quote.asset_out)
                .ok_or(BondingCurveError::Overflow)?,
        })
    }

    pub fn after_sell(&self, quote: &SellQuote) -> Result<Self, BondingCurveError> {
        Ok(Self {
            reserve_raised: self
                .reserve_raised
                .checked_sub(quote.reserve_out)
                .ok_or(BondingCurveError::InsufficientLiquidity)?,
            asset_sold: self
                .asset_sold
                .checked_sub(quote.asset_in)
                .ok_or(BondingCurveError::InsufficientSupply)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyQuote {
    pub reserve_in: U512,
    pub platform_fee: U512,
    pub net_in: U512,
    pub asset_out: U256,
    /// Output was clamped to the remaining curve supply
    pub capped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellQuote {
    pub asset_in: U256,
    pub reserve_out: U512,
    pub fee_bps: u64,
    pub fee: U512,
    pub net_out: U512,
}

pub(crate) fn widen(value: U256) -> U512 {
    let mut bytes = [0u8; 32];
    value.to_little_endian(&mut bytes);
    U512::from_little_endian(&bytes)
}

pub(crate) fn narrow(value: U512) -> Option<U256> {
    if value.bits() > 256 {
        return None;
    }
    let mut bytes = [0u8; 64];
    value.to_little_endian(&mut bytes);
    Some(U256::from_little_endian(&bytes[..32]))
}

fn ceil_div(numerator: U512, denominator: U512) -> U512 {
    let (quotient, remainder) = numerator.div_mod(denominator);
    if remainder.is_zero() {
        quotient
    } else {
        quotient + U512::one()
    }
}

/// Virtual-plus-real reserve and supply sides and their product `k`
fn sides(
    params: &CurveParams,
    position: &CurvePosition,
) -> Result<(U512, U512, U512), BondingCurveError> {
    let reserve_side = params
        .virtual_reserve
        .checked_add(position.reserve_raised)
        .ok_or(BondingCurveError::Overflow)?;
    let supply_side = params
        .virtual_supply
        .checked_sub(position.asset_sold)
        .map(widen)
        .ok_or(BondingCurveError::InsufficientSupply)?;
    let k = reserve_side
        .checked_mul(supply_side)
        .ok_or(BondingCurveError::Overflow)?;
    Ok((reserve_side, supply_side, k))
}

/// Reserve raised when the curve has sold exactly `curve_supply_cap`
///
/// # Arguments
/// * `virtual_reserve` - Virtual reserve offset
/// * `virtual_supply` - Virtual supply offset
/// * `curve_supply_cap` - Tokens the curve may sell
///
/// # Returns
/// `None` if the cap is not below virtual supply or the product overflows
pub fn derive_graduation_threshold(
    virtual_reserve: U512,
    virtual_supply: U256,
    curve_supply_cap: U256,
) -> Option<U512> {
    let end_supply = widen(virtual_supply.checked_sub(curve_supply_cap)?);
    if end_supply.is_zero() {
        return None;
    }
    let k = virtual_reserve.checked_mul(widen(virtual_supply))?;
    (k / end_supply).checked_sub(virtual_reserve)
}

/// Marginal price in reserve base units per whole token
pub fn spot_price(params: &CurveParams, position: &CurvePosition) -> U512 {
    let reserve_side = params.virtual_reserve.saturating_add(position.reserve_raised);
    let supply_side = widen(params.virtual_supply.saturating_sub(position.asset_sold));
    if supply_side.is_zero() {
        return U512::zero();
    }
    let one_token = U512::exp10(launch_token::TOKEN_DECIMALS as usize);
    reserve_side.saturating_mul(one_token) / supply_side
}

/// Calculate the tokens minted for `reserve_in`
///
/// The new supply side is truncated, so the buyer receives at most what the
/// invariant allows. Output is clamped to the supply left under the cap.
///
/// # Arguments
/// * `params` - Curve constants
/// * `position` - Current real reserve and sold supply
/// * `reserve_in` - Reserve paid, including the platform fee
/// * `platform_fee_bps` - Platform fee taken before pricing
pub fn quote_buy(
    params: &CurveParams,
    position: &CurvePosition,
    reserve_in: U512,
    platform_fee_bps: u64,
) -> Result<BuyQuote, BondingCurveError> {
    if reserve_in.is_zero() {
        return Err(BondingCurveError::InsufficientInput);
    }
    if position.asset_sold >= params.curve_supply_cap {
        return Err(BondingCurveError::SupplyCapReached);
    }

    let platform_fee = bps_of(reserve_in, platform_fee_bps);
    let net_in = reserve_in - platform_fee;
    if net_in.is_zero() {
        return Err(BondingCurveError::InsufficientInput);
    }

    let (reserve_side, supply_side, k) = sides(params, position)?;
    let new_reserve_side = reserve_side
        .checked_add(net_in)
        .ok_or(BondingCurveError::Overflow)?;
    let new_supply_side = k / new_reserve_side;
    let raw_out = supply_side - new_supply_side;

    let remaining = widen(params.curve_supply_cap - position.asset_sold);
    let capped = raw_out > remaining;
    let asset_out = narrow(raw_out.min(remaining)).ok_or(BondingCurveError::Overflow)?;
    if asset_out.is_zero() {
        return Err(BondingCurveError::ZeroOutput);
    }

    Ok(BuyQuote {
        reserve_in,
        platform_fee,
        net_in,
        asset_out,
        capped,
    })
}

/// Calculate the reserve returned for selling `asset_in` back to the curve
///
/// The new reserve side is rounded up, so the payout never exceeds what the
/// invariant allows.
///
/// # Arguments
/// * `params` - Curve constants
/// * `position` - Current real reserve and sold supply
/// * `asset_in` - Tokens sold back
/// * `fee_bps` - Sell fee in effect
pub fn quote_sell(
    params: &CurveParams,
    position: &CurvePosition,
    asset_in: U256,
    fee_bps: u64,
) -> Result<SellQuote, BondingCurveError> {
    if asset_in.is_zero() {
        return Err(BondingCurveError::InsufficientInput);
    }
    if asset_in > position.asset_sold {
        return Err(BondingCurveError::InsufficientSupply);
    }

    let (reserve_side, supply_side, k) = sides(params, position)?;
    let new_supply_side = supply_side
        .checked_add(widen(asset_in))
        .ok_or(BondingCurveError::Overflow)?;
    let new_reserve_side = ceil_div(k, new_supply_side);
    let reserve_out = reserve_side
        .checked_sub(new_reserve_side)
        .ok_or(BondingCurveError::Overflow)?;

    if reserve_out.is_zero() {
        return Err(BondingCurveError::ZeroOutput);
    }
    if reserve_out > position.reserve_raised {
        return Err(BondingCurveError::InsufficientLiquidity);
    }

    let fee = bps_of(reserve_out, fee_bps);
    Ok(SellQuote {
        asset_in,
        reserve_out,
        fee_bps,
        fee,
        net_out: reserve_out - fee,
    })
}
