//! Graduation: `Trading -> Graduating -> Graduated`, or back to `Trading`
//! when the venue fails.
//!
//! The liquidity allocation is minted to the curve, offered to the venue,
//! and on success settled to the pool with the leftover reserve paid to the
//! treasury. Settlement either completes in full or leaves the ledger and
//! purses untouched. On any failure the mint is undone according to the
//! curve's [`GraduationRollback`] policy and the curve keeps trading.

use casper_types::{U256, U512};
use tracing::{info, warn};

use crate::curves::{narrow, widen};
use crate::error::BondingCurveError;
use crate::events::CurveEvent;
use crate::fees::bps_of;
use crate::params::GraduationRollback;
use crate::runtime::CallContext;
use crate::venue::{LiquidityReceipt, LiquidityRequest};
use crate::{BondingCurve, CurveAccounts, CurveStatus};

/// How a threshold-triggered graduation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraduationOutcome {
    Graduated(LiquidityReceipt),
    /// The venue refused, or the allocation could not be minted
    RolledBack(BondingCurveError),
    /// The venue accepted but the receipt could not be settled
    SettlementFailed(BondingCurveError),
}

impl From<BondingCurveError> for GraduationOutcome {
    fn from(error: BondingCurveError) -> Self {
        match error {
            BondingCurveError::SettlementFailed(cause) => {
                GraduationOutcome::SettlementFailed(*cause)
            }
            other => GraduationOutcome::RolledBack(other),
        }
    }
}

impl BondingCurve {
    /// Run the transition. The caller holds the operation lock.
    ///
    /// On return the status is either `Graduated` or back to `Trading`.
    pub(crate) fn graduate(
        &mut self,
        ctx: &CallContext,
        accounts: &mut CurveAccounts<'_>,
    ) -> Result<LiquidityReceipt, BondingCurveError> {
        self.status = CurveStatus::Graduating;
        info!(
            curve = ?self.key,
            reserve_raised = %self.position.reserve_raised,
            "graduation started"
        );

        let allocation = self.params.liquidity_asset_allocation;
        if let Err(error) = accounts.token.mint(&self.minter, &self.key, allocation) {
            self.status = CurveStatus::Trading;
            return Err(error.into());
        }

        let request = self.liquidity_request(ctx.block_time);
        let result = accounts
            .venue
            .provide_liquidity(&request, ctx.block_time)
            .and_then(|receipt| {
                request.verify(&receipt, ctx.block_time)?;
                Ok(receipt)
            });

        let receipt = match result {
            Ok(receipt) => receipt,
            Err(reason) => {
                let allocation_burned = self.roll_back_graduation(accounts);
                warn!(curve = ?self.key, %reason, allocation_burned, "graduation rolled back");
                self.events.push(CurveEvent::GraduationRolledBack {
                    reason: reason.clone(),
                    allocation_burned,
                });
                return Err(BondingCurveError::VenueFailure(reason));
            }
        };

        match self.settle_graduation(accounts, &request, &receipt) {
            Ok(treasury_amount) => {
                self.position.reserve_raised = U512::zero();
                self.status = CurveStatus::Graduated;
                self.events.push(CurveEvent::GraduationSucceeded {
                    pool: receipt.pool,
                    asset_liquidity: receipt.asset_used,
                    reserve_liquidity: receipt.reserve_used,
                    liquidity: receipt.liquidity,
                    treasury_amount,
                });
                info!(
                    curve = ?self.key,
                    pool = ?receipt.pool,
                    reserve_liquidity = %receipt.reserve_used,
                    %treasury_amount,
                    "graduated"
                );
                Ok(receipt)
            }
            Err(error) => {
                let allocation_burned = self.roll_back_graduation(accounts);
                warn!(
                    curve = ?self.key,
                    pool = ?receipt.pool,
                    %error,
                    allocation_burned,
                    "graduation settlement failed"
                );
                self.events.push(CurveEvent::GraduationSettlementFailed {
                    pool: receipt.pool,
                    error: error.clone(),
                    allocation_burned,
                });
                Err(BondingCurveError::SettlementFailed(Box::new(error)))
            }
        }
    }

    fn liquidity_request(&self, block_time: u64) -> LiquidityRequest {
        let asset_amount = self.params.liquidity_asset_allocation;
        let reserve_amount = self.params.liquidity_reserve_allocation;
        let floor_bps = self.params.graduation_slippage_bps;

        LiquidityRequest {
            asset: self.token,
            asset_amount,
            min_asset_amount: asset_floor(asset_amount, floor_bps),
            reserve_amount,
            min_reserve_amount: bps_of(reserve_amount, floor_bps),
            recipient: self.treasury,
            deadline: block_time.saturating_add(self.params.graduation_deadline_ms),
        }
    }

    /// Pay the receipt out of the curve. Works on staged copies of the ledger
    /// and purses and commits them only when every step succeeds.
    fn settle_graduation(
        &self,
        accounts: &mut CurveAccounts<'_>,
        request: &LiquidityRequest,
        receipt: &LiquidityReceipt,
    ) -> Result<U512, BondingCurveError> {
        let treasury_amount = self
            .position
            .reserve_raised
            .checked_sub(receipt.reserve_used)
            .ok_or(BondingCurveError::InsufficientLiquidity)?;
        let unused_asset = request
            .asset_amount
            .checked_sub(receipt.asset_used)
            .ok_or(BondingCurveError::Overflow)?;

        let mut token = accounts.token.clone();
        let mut purses = accounts.purses.clone();

        token.transfer(&self.key, &receipt.pool, receipt.asset_used)?;
        if !unused_asset.is_zero() {
            token.minter_burn(&self.minter, &self.key, unused_asset)?;
        }
        purses.transfer(&self.key, &receipt.pool, receipt.reserve_used)?;
        purses.transfer(&self.key, &self.treasury, treasury_amount)?;
        token.enable_trading(&self.minter)?;

        *accounts.token = token;
        *accounts.purses = purses;
        Ok(treasury_amount)
    }

    /// Return to `Trading`, undoing the allocation mint if the policy says so
    fn roll_back_graduation(&mut self, accounts: &mut CurveAccounts<'_>) -> bool {
        let allocation = self.params.liquidity_asset_allocation;
        let allocation_burned = match self.params.rollback {
            GraduationRollback::BurnAllocation => {
                match accounts.token.minter_burn(&self.minter, &self.key, allocation) {
                    Ok(()) => true,
                    Err(error) => {
                        warn!(curve = ?self.key, %error, "could not burn liquidity allocation");
                        false
                    }
                }
            }
            GraduationRollback::LeaveOutstanding => false,
        };
        self.status = CurveStatus::Trading;
        allocation_burned
    }
}

fn asset_floor(amount: U256, floor_bps: u64) -> U256 {
    // bps_of never grows the amount, so it narrows back
    narrow(bps_of(widen(amount), floor_bps)).unwrap_or(amount)
}
