//! Bonding curve engine.
//!
//! Prices buys and sells of one launched token against a pooled reserve with
//! a constant-product invariant over virtual-plus-real quantities:
//!
//! ```text
//! k = (virtual_reserve + reserve_raised) * (virtual_supply - asset_sold)
//! ```
//!
//! Buys mint through the token's [`MinterCap`], sells burn and pay out of the
//! curve's purse minus a sell fee that decays after launch. Once the reserve
//! raised reaches the graduation threshold the curve seeds a pool on an
//! external [`LiquidityVenue`], opens peer transfers on the ledger and stops
//! trading for good. A failed venue call rolls the curve back to trading.

pub mod curves;
pub mod events;
pub mod fees;
pub mod params;
pub mod runtime;
pub mod venue;

mod error;
mod graduation;
mod lock;
mod purse;

#[cfg(test)]
mod tests;

use casper_types::{Key, U256, U512};
use launch_token::{LaunchToken, MinterCap};
use tracing::{debug, info};

pub use curves::{BuyQuote, CurvePosition, SellQuote};
pub use error::{BondingCurveError, PurseError};
pub use events::{CurveEvent, TradeSide};
pub use fees::SellFeeSchedule;
pub use graduation::GraduationOutcome;
pub use lock::{LockGuard, OperationLock};
pub use params::{CurveParams, GraduationRollback, MAX_PLATFORM_FEE_BPS};
pub use purse::Purses;
pub use runtime::CallContext;
pub use venue::{LiquidityReceipt, LiquidityRequest, LiquidityVenue, VenueError};

/// Curve lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CurveStatus {
    Trading = 0,
    Graduating = 1,
    Graduated = 2,
}

impl CurveStatus {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(CurveStatus::Trading),
            1 => Some(CurveStatus::Graduating),
            2 => Some(CurveStatus::Graduated),
            _ => None,
        }
    }
}

/// Everything a curve operation touches outside the curve itself
pub struct CurveAccounts<'a> {
    pub token: &'a mut LaunchToken,
    pub purses: &'a mut Purses,
    pub venue: &'a mut dyn LiquidityVenue,
}

/// Snapshot returned by [`BondingCurve::token_info`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    pub asset_sold: U256,
    pub reserve_raised: U512,
    pub current_sell_fee_bps: u64,
    pub graduated: bool,
    pub progress_bps: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyOutcome {
    pub quote: BuyQuote,
    /// Set when this buy crossed the graduation threshold
    pub graduation: Option<GraduationOutcome>,
}

#[derive(Debug)]
pub struct BondingCurve {
    key: Key,
    token: Key,
    creator: Key,
    treasury: Key,
    params: CurveParams,
    platform_fee_bps: u64,
    launch_time: u64,
    position: CurvePosition,
    status: CurveStatus,
    minter: MinterCap,
    lock: OperationLock,
    events: Vec<CurveEvent>,
}

impl BondingCurve {
    /// Bind a new curve to the ledger that issued `minter`.
    ///
    /// `minter` must have been issued for `key`; the platform fee and
    /// treasury are fixed for the life of the curve.
    pub fn new(
        key: Key,
        creator: Key,
        treasury: Key,
        params: CurveParams,
        platform_fee_bps: u64,
        launch_time: u64,
        minter: MinterCap,
    ) -> Result<Self, BondingCurveError> {
        params.validate()?;
        if platform_fee_bps > MAX_PLATFORM_FEE_BPS {
            return Err(BondingCurveError::InvalidParams("platform fee above 10%"));
        }
        if minter.minter() != key {
            return Err(BondingCurveError::InvalidParams(
                "minter capability is bound to another account",
            ));
        }

        Ok(Self {
            key,
            token: minter.token(),
            creator,
            treasury,
            params,
            platform_fee_bps,
            launch_time,
            position: CurvePosition::default(),
            status: CurveStatus::Trading,
            minter,
            lock: OperationLock::default(),
            events: Vec::new(),
        })
    }

    // ============ Views ============

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn token(&self) -> Key {
        self.token
    }

    pub fn creator(&self) -> Key {
        self.creator
    }

    pub fn treasury(&self) -> Key {
        self.treasury
    }

    pub fn params(&self) -> &CurveParams {
        &self.params
    }

    pub fn platform_fee_bps(&self) -> u64 {
        self.platform_fee_bps
    }

    pub fn launch_time(&self) -> u64 {
        self.launch_time
    }

    pub fn status(&self) -> CurveStatus {
        self.status
    }

    pub fn is_graduated(&self) -> bool {
        self.status == CurveStatus::Graduated
    }

    pub fn position(&self) -> CurvePosition {
        self.position
    }

    pub fn reserve_raised(&self) -> U512 {
        self.position.reserve_raised
    }

    pub fn asset_sold(&self) -> U256 {
        self.position.asset_sold
    }

    pub fn current_sell_fee_bps(&self, now: u64) -> u64 {
        self.params.sell_fee.current_bps(self.launch_time, now)
    }

    /// Marginal price in reserve base units per whole token
    pub fn current_price(&self) -> U512 {
        curves::spot_price(&self.params, &self.position)
    }

    /// Reserve raised against the graduation threshold, 0..=10000
    pub fn progress_bps(&self) -> u64 {
        if self.params.graduation_threshold.is_zero() {
            return 0;
        }
        let progress = self
            .position
            .reserve_raised
            .saturating_mul(U512::from(params::BPS_DENOMINATOR))
            / self.params.graduation_threshold;
        progress.min(U512::from(params::BPS_DENOMINATOR)).as_u64()
    }

    pub fn token_info(&self, now: u64) -> TokenInfo {
        TokenInfo {
            asset_sold: self.position.asset_sold,
            reserve_raised: self.position.reserve_raised,
            current_sell_fee_bps: self.current_sell_fee_bps(now),
            graduated: self.is_graduated(),
            progress_bps: self.progress_bps(),
        }
    }

    /// Quote a buy with the same rounding as [`buy`](Self::buy)
    pub fn preview_buy(&self, reserve_in: U512) -> Result<BuyQuote, BondingCurveError> {
        self.require_trading()?;
        let quote =
            curves::quote_buy(&self.params, &self.position, reserve_in, self.platform_fee_bps)?;
        debug!(curve = ?self.key, %reserve_in, asset_out = %quote.asset_out, "preview buy");
        Ok(quote)
    }

    /// Quote a sell at block time `now` with the same rounding as
    /// [`sell`](Self::sell)
    pub fn preview_sell(&self, asset_in: U256, now: u64) -> Result<SellQuote, BondingCurveError> {
        self.require_trading()?;
        let fee_bps = self.current_sell_fee_bps(now);
        let quote = curves::quote_sell(&self.params, &self.position, asset_in, fee_bps)?;
        debug!(curve = ?self.key, %asset_in, net_out = %quote.net_out, "preview sell");
        Ok(quote)
    }

    /// Drain events recorded since the last call
    pub fn take_events(&mut self) -> Vec<CurveEvent> {
        std::mem::take(&mut self.events)
    }

    // ============ Trading ============

    /// Buy tokens with `reserve_in` taken from the caller's purse.
    ///
    /// Crossing the graduation threshold runs graduation inside the same
    /// call. A failed graduation is rolled back and reported in the outcome;
    /// the buy itself still succeeds.
    pub fn buy(
        &mut self,
        ctx: &CallContext,
        mut accounts: CurveAccounts<'_>,
        reserve_in: U512,
        min_asset_out: U256,
    ) -> Result<BuyOutcome, BondingCurveError> {
        let _guard = self.lock.acquire()?;
        self.require_trading()?;
        self.require_token(accounts.token)?;

        let quote =
            curves::quote_buy(&self.params, &self.position, reserve_in, self.platform_fee_bps)?;
        if quote.asset_out < min_asset_out {
            return Err(BondingCurveError::SlippageExceeded);
        }

        let buyer = ctx.caller;
        if accounts.purses.balance_of(&buyer) < reserve_in {
            return Err(BondingCurveError::InsufficientInput);
        }
        let next = self.position.after_buy(&quote)?;

        accounts.token.mint(&self.minter, &buyer, quote.asset_out)?;
        accounts.purses.transfer(&buyer, &self.key, quote.net_in)?;
        accounts
            .purses
            .transfer(&buyer, &self.treasury, quote.platform_fee)?;
        self.position = next;

        self.record_trade(
            TradeSide::Buy,
            buyer,
            reserve_in,
            quote.asset_out,
            quote.platform_fee,
        );
        info!(
            curve = ?self.key,
            buyer = ?buyer,
            %reserve_in,
            asset_out = %quote.asset_out,
            reserve_raised = %self.position.reserve_raised,
            "buy"
        );

        let graduation = if self.position.reserve_raised >= self.params.graduation_threshold {
            Some(match self.graduate(ctx, &mut accounts) {
                Ok(receipt) => GraduationOutcome::Graduated(receipt),
                Err(error) => GraduationOutcome::from(error),
            })
        } else {
            None
        };

        Ok(BuyOutcome { quote, graduation })
    }

    /// Sell `asset_in` back to the curve. Curve state is updated before the
    /// tokens are burned and the reserve is paid out.
    pub fn sell(
        &mut self,
        ctx: &CallContext,
        accounts: CurveAccounts<'_>,
        asset_in: U256,
        min_reserve_out: U512,
    ) -> Result<SellQuote, BondingCurveError> {
        let _guard = self.lock.acquire()?;
        self.require_trading()?;
        self.require_token(accounts.token)?;

        let fee_bps = self.current_sell_fee_bps(ctx.block_time);
        let quote = curves::quote_sell(&self.params, &self.position, asset_in, fee_bps)?;

        let seller = ctx.caller;
        if accounts.token.balance_of(&seller) < asset_in {
            return Err(BondingCurveError::InsufficientBalance);
        }
        if quote.net_out < min_reserve_out {
            return Err(BondingCurveError::SlippageExceeded);
        }
        if accounts.purses.balance_of(&self.key) < quote.reserve_out {
            return Err(BondingCurveError::InsufficientLiquidity);
        }

        self.position = self.position.after_sell(&quote)?;
        accounts.token.minter_burn(&self.minter, &seller, asset_in)?;
        accounts.purses.transfer(&self.key, &seller, quote.net_out)?;
        accounts.purses.transfer(&self.key, &self.treasury, quote.fee)?;

        self.record_trade(TradeSide::Sell, seller, quote.reserve_out, asset_in, quote.fee);
        info!(
            curve = ?self.key,
            seller = ?seller,
            %asset_in,
            net_out = %quote.net_out,
            fee_bps,
            "sell"
        );

        Ok(quote)
    }

    /// Graduate without waiting for the threshold. The reserve raised must
    /// cover the liquidity reserve allocation.
    ///
    /// A venue failure is rolled back and returned as
    /// [`BondingCurveError::VenueFailure`], a failed settlement as
    /// [`BondingCurveError::SettlementFailed`]. The error does not mean
    /// nothing changed: a `GraduationRolledBack` or
    /// `GraduationSettlementFailed` event is recorded, and under
    /// [`GraduationRollback::LeaveOutstanding`] the minted allocation stays
    /// with the curve.
    pub fn force_graduate(
        &mut self,
        ctx: &CallContext,
        mut accounts: CurveAccounts<'_>,
    ) -> Result<LiquidityReceipt, BondingCurveError> {
        let _guard = self.lock.acquire()?;
        self.require_trading()?;
        self.require_token(accounts.token)?;

        if self.position.reserve_raised < self.params.liquidity_reserve_allocation {
            return Err(BondingCurveError::GraduationThresholdNotMet);
        }
        self.graduate(ctx, &mut accounts)
    }

    // ============ Internal Functions ============

    fn require_trading(&self) -> Result<(), BondingCurveError> {
        match self.status {
            CurveStatus::Trading => Ok(()),
            CurveStatus::Graduating => Err(BondingCurveError::LockedReentrancy),
            CurveStatus::Graduated => Err(BondingCurveError::CurveGraduated),
        }
    }

    fn require_token(&self, token: &LaunchToken) -> Result<(), BondingCurveError> {
        if token.key() != self.token {
            return Err(BondingCurveError::TokenMismatch);
        }
        Ok(())
    }

    fn record_trade(
        &mut self,
        side: TradeSide,
        trader: Key,
        reserve_amount: U512,
        asset_amount: U256,
        fee: U512,
    ) {
        let price_after = self.current_price();
        self.events.push(CurveEvent::Trade {
            side,
            trader,
            reserve_amount,
            asset_amount,
            fee,
            price_after,
            reserve_raised: self.position.reserve_raised,
            asset_sold: self.position.asset_sold,
        });
    }
}
