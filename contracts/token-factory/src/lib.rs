//! Launch registry.
//!
//! Creates matched ledger and bonding curve pairs, binds each curve as its
//! ledger's only minter, collects the creation fee and indexes launches by id
//! and by asset. After creation the registry only routes calls to the curve;
//! it holds no pricing logic of its own.

pub mod config;
pub mod events;
pub mod launch;

mod error;


use std::collections::BTreeMap;

use bonding_curve::{
    BondingCurve, BondingCurveError, BuyOutcome, BuyQuote, CallContext, CurveAccounts, CurveEvent,
    CurveParams, LiquidityReceipt, LiquidityVenue, Purses, SellQuote, TokenInfo,
    MAX_PLATFORM_FEE_BPS,
};
use casper_types::{Key, U256, U512};
use launch_token::LaunchToken;
use tracing::{info, warn};

pub use config::{CurveConfig, LaunchpadConfig};
pub use error::FactoryError;
pub use events::FactoryEvent;
pub use launch::{Launch, LaunchMeta, LaunchRequest};

/// Result of a successful [`TokenFactory::create_launch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLaunch {
    pub launch_id: u64,
    pub token: Key,
    pub curve: Key,
    pub initial_buy: Option<BuyOutcome>,
}

#[derive(Debug)]
pub struct TokenFactory<V: LiquidityVenue> {
    key: Key,
    owner: Key,
    treasury: Key,
    creation_fee: U512,
    platform_fee_bps: u64,
    curve_params: CurveParams,
    purses: Purses,
    venue: V,
    launches: Vec<Launch>,
    token_to_launch: BTreeMap<Key, u64>,
    events: Vec<FactoryEvent>,
}

impl<V: LiquidityVenue> TokenFactory<V> {
    /// Registry at `key`, owned by `owner`, with fees and curve constants
    /// taken from `config`
    pub fn new(
        key: Key,
        owner: Key,
        treasury: Key,
        config: &LaunchpadConfig,
        venue: V,
    ) -> Result<Self, FactoryError> {
        config.validate()?;
        let curve_params = config.curve.to_params()?;

        Ok(Self {
            key,
            owner,
            treasury,
            creation_fee: U512::from(config.creation_fee),
            platform_fee_bps: config.platform_fee_bps,
            curve_params,
            purses: Purses::new(),
            venue,
            launches: Vec::new(),
            token_to_launch: BTreeMap::new(),
            events: Vec::new(),
        })
    }

    // ============ Views ============

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn owner(&self) -> Key {
        self.owner
    }

    pub fn treasury(&self) -> Key {
        self.treasury
    }

    pub fn creation_fee(&self) -> U512 {
        self.creation_fee
    }

    pub fn platform_fee_bps(&self) -> u64 {
        self.platform_fee_bps
    }

    pub fn curve_params(&self) -> &CurveParams {
        &self.curve_params
    }

    pub fn launch_count(&self) -> u64 {
        self.launches.len() as u64
    }

    pub fn get_launch(&self, launch_id: u64) -> Result<&Launch, FactoryError> {
        usize::try_from(launch_id)
            .ok()
            .and_then(|index| self.launches.get(index))
            .ok_or(FactoryError::IndexOutOfBounds)
    }

    pub fn launch_by_token(&self, asset: &Key) -> Option<u64> {
        self.token_to_launch.get(asset).copied()
    }

    /// Launch ids in creation order
    ///
    /// # Arguments
    /// * `offset` - First id to return
    /// * `limit` - Maximum number of ids
    pub fn get_launches(&self, offset: u64, limit: u64) -> Vec<u64> {
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        (offset..self.launch_count()).take(limit).collect()
    }

    pub fn is_known_asset(&self, asset: &Key) -> bool {
        self.token_to_launch.contains_key(asset)
    }

    pub fn curve_for(&self, asset: &Key) -> Option<Key> {
        self.launch(asset).ok().map(|launch| launch.curve.key())
    }

    pub fn token(&self, asset: &Key) -> Option<&LaunchToken> {
        self.launch(asset).ok().map(|launch| &launch.token)
    }

    /// Ledger handle for holder operations (transfer, approve, burn)
    pub fn token_mut(&mut self, asset: &Key) -> Option<&mut LaunchToken> {
        self.launch_mut(asset).ok().map(|launch| &mut launch.token)
    }

    pub fn curve(&self, asset: &Key) -> Option<&BondingCurve> {
        self.launch(asset).ok().map(|launch| &launch.curve)
    }

    pub fn preview_buy(&self, asset: &Key, reserve_in: U512) -> Result<BuyQuote, FactoryError> {
        Ok(self.launch(asset)?.curve.preview_buy(reserve_in)?)
    }

    pub fn preview_sell(
        &self,
        asset: &Key,
        asset_in: U256,
        now: u64,
    ) -> Result<SellQuote, FactoryError> {
        Ok(self.launch(asset)?.curve.preview_sell(asset_in, now)?)
    }

    pub fn current_price(&self, asset: &Key) -> Result<U512, FactoryError> {
        Ok(self.launch(asset)?.curve.current_price())
    }

    pub fn token_info(&self, asset: &Key, now: u64) -> Result<TokenInfo, FactoryError> {
        Ok(self.launch(asset)?.curve.token_info(now))
    }

    pub fn purses(&self) -> &Purses {
        &self.purses
    }

    pub fn venue_mut(&mut self) -> &mut V {
        &mut self.venue
    }

    pub fn take_events(&mut self) -> Vec<FactoryEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_curve_events(&mut self, asset: &Key) -> Result<Vec<CurveEvent>, FactoryError> {
        Ok(self.launch_mut(asset)?.curve.take_events())
    }

    /// Fund an account's purse from outside the registry
    pub fn deposit(&mut self, account: &Key, amount: U512) -> Result<(), FactoryError> {
        Ok(self.purses.credit(account, amount)?)
    }

    // ============ Launch ============

    /// Create a ledger and curve pair for the caller.
    ///
    /// Takes exactly `creation_fee + initial_buy` from the caller; anything
    /// attached above that stays with the caller. Either the whole launch,
    /// including the initial buy, goes through or nothing changes.
    ///
    /// # Arguments
    /// * `ctx` - Caller becomes the creator; block time is the launch time
    /// * `request` - Metadata and optional initial buy
    /// * `attached` - Value the caller offers to pay
    ///
    /// # Returns
    /// The new launch id with its token and curve keys
    pub fn create_launch(
        &mut self,
        ctx: &CallContext,
        request: LaunchRequest,
        attached: U512,
    ) -> Result<CreatedLaunch, FactoryError> {
        if !launch::validate_name(&request.name) {
            return Err(FactoryError::InvalidName);
        }
        if !launch::validate_symbol(&request.symbol) {
            return Err(FactoryError::InvalidSymbol);
        }

        let creator = ctx.caller;
        let required = self
            .creation_fee
            .checked_add(request.initial_buy)
            .ok_or(FactoryError::Overflow)?;
        if attached < required || self.purses.balance_of(&creator) < required {
            return Err(FactoryError::InsufficientInput);
        }

        let launch_id = self.launch_count();
        let token_key = launch::token_key(&self.key, launch_id);
        let curve_key = launch::curve_key(&self.key, launch_id);

        let mut token = LaunchToken::new(token_key, request.name.clone(), request.symbol.clone());
        let minter = token.bind_minter(curve_key)?;
        let mut curve = BondingCurve::new(
            curve_key,
            creator,
            self.treasury,
            self.curve_params.clone(),
            self.platform_fee_bps,
            ctx.block_time,
            minter,
        )?;

        let initial_buy = if request.initial_buy.is_zero() {
            None
        } else {
            let quote = curve.preview_buy(request.initial_buy)?;
            if quote.asset_out < request.min_asset_out {
                return Err(BondingCurveError::SlippageExceeded.into());
            }
            let outcome = curve.buy(
                ctx,
                CurveAccounts {
                    token: &mut token,
                    purses: &mut self.purses,
                    venue: &mut self.venue,
                },
                request.initial_buy,
                request.min_asset_out,
            )?;
            Some(outcome)
        };

        self.purses
            .transfer(&creator, &self.treasury, self.creation_fee)?;

        let meta = LaunchMeta {
            name: request.name,
            symbol: request.symbol,
            description: request.description,
            image_url: request.image_url,
            website: request.website,
            twitter: request.twitter,
            creator,
            created_at: ctx.block_time,
        };
        self.events.push(FactoryEvent::LaunchCreated {
            launch_id,
            token: token_key,
            curve: curve_key,
            creator,
            name: meta.name.clone(),
            symbol: meta.symbol.clone(),
        });
        info!(
            launch_id,
            token = ?token_key,
            creator = ?creator,
            symbol = %meta.symbol,
            "launch created"
        );

        self.launches.push(Launch {
            id: launch_id,
            token,
            curve,
            meta,
        });
        self.token_to_launch.insert(token_key, launch_id);

        Ok(CreatedLaunch {
            launch_id,
            token: token_key,
            curve: curve_key,
            initial_buy,
        })
    }

    // ============ Trading ============

    pub fn buy(
        &mut self,
        ctx: &CallContext,
        asset: &Key,
        reserve_in: U512,
        min_asset_out: U256,
    ) -> Result<BuyOutcome, FactoryError> {
        let index = self.index_of(asset)?;
        let launch = &mut self.launches[index];
        let outcome = launch.curve.buy(
            ctx,
            CurveAccounts {
                token: &mut launch.token,
                purses: &mut self.purses,
                venue: &mut self.venue,
            },
            reserve_in,
            min_asset_out,
        )?;
        Ok(outcome)
    }

    pub fn sell(
        &mut self,
        ctx: &CallContext,
        asset: &Key,
        asset_in: U256,
        min_reserve_out: U512,
    ) -> Result<SellQuote, FactoryError> {
        let index = self.index_of(asset)?;
        let launch = &mut self.launches[index];
        let quote = launch.curve.sell(
            ctx,
            CurveAccounts {
                token: &mut launch.token,
                purses: &mut self.purses,
                venue: &mut self.venue,
            },
            asset_in,
            min_reserve_out,
        )?;
        Ok(quote)
    }

    // ============ Admin Functions ============

    /// Applies to launches created after the change
    pub fn set_treasury(&mut self, ctx: &CallContext, treasury: Key) -> Result<(), FactoryError> {
        self.require_owner(ctx)?;
        let old = std::mem::replace(&mut self.treasury, treasury);
        self.events.push(FactoryEvent::TreasuryUpdated { old, new: treasury });
        info!(old = ?old, new = ?treasury, "treasury updated");
        Ok(())
    }

    /// Applies to launches created after the change
    pub fn set_platform_fee(&mut self, ctx: &CallContext, fee_bps: u64) -> Result<(), FactoryError> {
        self.require_owner(ctx)?;
        if fee_bps > MAX_PLATFORM_FEE_BPS {
            return Err(FactoryError::InvalidFee);
        }
        let old_bps = std::mem::replace(&mut self.platform_fee_bps, fee_bps);
        self.events.push(FactoryEvent::PlatformFeeUpdated {
            old_bps,
            new_bps: fee_bps,
        });
        info!(old_bps, new_bps = fee_bps, "platform fee updated");
        Ok(())
    }

    pub fn set_creation_fee(&mut self, ctx: &CallContext, fee: U512) -> Result<(), FactoryError> {
        self.require_owner(ctx)?;
        let old = std::mem::replace(&mut self.creation_fee, fee);
        self.events.push(FactoryEvent::CreationFeeUpdated { old, new: fee });
        info!(%old, new = %fee, "creation fee updated");
        Ok(())
    }

    /// Graduate a curve before it reaches its threshold
    pub fn force_graduation(
        &mut self,
        ctx: &CallContext,
        asset: &Key,
    ) -> Result<LiquidityReceipt, FactoryError> {
        self.require_owner(ctx)?;
        let index = self.index_of(asset)?;
        let launch = &mut self.launches[index];
        let receipt = launch.curve.force_graduate(
            ctx,
            CurveAccounts {
                token: &mut launch.token,
                purses: &mut self.purses,
                venue: &mut self.venue,
            },
        )?;
        info!(asset = ?asset, pool = ?receipt.pool, "forced graduation");
        Ok(receipt)
    }

    /// Sweep everything held in the registry's own purse to `to`
    ///
    /// Creation fees go straight to the treasury and never pass through this
    /// purse, so the sweep only recovers value sent to the registry key from
    /// outside, such as a [`deposit`](Self::deposit).
    pub fn emergency_withdraw(&mut self, ctx: &CallContext, to: Key) -> Result<U512, FactoryError> {
        self.require_owner(ctx)?;
        let amount = self.purses.balance_of(&self.key);
        if amount.is_zero() {
            return Err(FactoryError::NothingToWithdraw);
        }
        self.purses.transfer(&self.key, &to, amount)?;
        self.events.push(FactoryEvent::EmergencyWithdrawal { to, amount });
        warn!(to = ?to, %amount, "emergency withdrawal");
        Ok(amount)
    }

    pub fn transfer_ownership(&mut self, ctx: &CallContext, new_owner: Key) -> Result<(), FactoryError> {
        self.require_owner(ctx)?;
        let previous = std::mem::replace(&mut self.owner, new_owner);
        self.events.push(FactoryEvent::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        info!(previous = ?previous, new = ?new_owner, "ownership transferred");
        Ok(())
    }

    // ============ Internal Functions ============

    fn require_owner(&self, ctx: &CallContext) -> Result<(), FactoryError> {
        if ctx.caller != self.owner {
            return Err(FactoryError::Unauthorized);
        }
        Ok(())
    }

    fn index_of(&self, asset: &Key) -> Result<usize, FactoryError> {
        self.token_to_launch
            .get(asset)
            .and_then(|id| usize::try_from(*id).ok())
            .filter(|index| *index < self.launches.len())
            .ok_or(FactoryError::LaunchNotFound)
    }

    fn launch(&self, asset: &Key) -> Result<&Launch, FactoryError> {
        let index = self.index_of(asset)?;
        Ok(&self.launches[index])
    }

    fn launch_mut(&mut self, asset: &Key) -> Result<&mut Launch, FactoryError> {
        let index = self.index_of(asset)?;
        Ok(&mut self.launches[index])
    }
}
