use casper_types::account::AccountHash;
use casper_types::{Key, U256, U512};
use launch_token::{LaunchToken, TokenError};

use super::*;
use crate::fees::bps_of;
use crate::params::{whole_reserve, whole_tokens};

const LAUNCH: u64 = 1_700_000_000_000;
const CURVE: Key = Key::Hash([10; 32]);
const TOKEN: Key = Key::Hash([11; 32]);
const POOL: Key = Key::Hash([20; 32]);

fn account(n: u8) -> Key {
    Key::Account(AccountHash::new([n; 32]))
}

fn treasury() -> Key {
    account(2)
}

fn creator() -> Key {
    account(3)
}

fn alice() -> Key {
    account(4)
}

fn bob() -> Key {
    account(5)
}

/// Venue that accepts `use_bps` of every offer, or fails with `fail_with`
struct MockVenue {
    fail_with: Option<VenueError>,
    use_bps: u64,
    requests: Vec<LiquidityRequest>,
}

impl MockVenue {
    fn accepting() -> Self {
        Self {
            fail_with: None,
            use_bps: 10_000,
            requests: Vec::new(),
        }
    }

    fn failing(error: VenueError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::accepting()
        }
    }
}

impl LiquidityVenue for MockVenue {
    fn provide_liquidity(
        &mut self,
        request: &LiquidityRequest,
        _block_time: u64,
    ) -> Result<LiquidityReceipt, VenueError> {
        self.requests.push(request.clone());
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        Ok(LiquidityReceipt {
            pool: POOL,
            asset_used: request.asset_amount * U256::from(self.use_bps) / U256::from(10_000u64),
            reserve_used: bps_of(request.reserve_amount, self.use_bps),
            liquidity: U256::from(1_000u64),
        })
    }
}

struct Harness {
    curve: BondingCurve,
    token: LaunchToken,
    purses: Purses,
    venue: MockVenue,
}

impl Harness {
    fn new() -> Self {
        Self::with_params(CurveParams::default())
    }

    fn with_params(params: CurveParams) -> Self {
        Self::configured(params, 100)
    }

    fn configured(params: CurveParams, platform_fee_bps: u64) -> Self {
        let mut token = LaunchToken::new(TOKEN, "Moon Cat", "MCAT");
        let minter = token.bind_minter(CURVE).unwrap();
        let curve = BondingCurve::new(
            CURVE,
            creator(),
            treasury(),
            params,
            platform_fee_bps,
            LAUNCH,
            minter,
        )
        .unwrap();

        let mut purses = Purses::new();
        purses.credit(&alice(), whole_reserve(10_000)).unwrap();
        purses.credit(&bob(), whole_reserve(1_000)).unwrap();

        Self {
            curve,
            token,
            purses,
            venue: MockVenue::accepting(),
        }
    }

    fn buy(&mut self, buyer: Key, reserve_in: U512) -> Result<BuyOutcome, BondingCurveError> {
        self.buy_with_min(buyer, reserve_in, U256::zero())
    }

    fn buy_with_min(
        &mut self,
        buyer: Key,
        reserve_in: U512,
        min_asset_out: U256,
    ) -> Result<BuyOutcome, BondingCurveError> {
        let ctx = CallContext::new(buyer, LAUNCH);
        self.curve.buy(
            &ctx,
            CurveAccounts {
                token: &mut self.token,
                purses: &mut self.purses,
                venue: &mut self.venue,
            },
            reserve_in,
            min_asset_out,
        )
    }

    fn sell(&mut self, seller: Key, asset_in: U256, now: u64) -> Result<SellQuote, BondingCurveError> {
        let ctx = CallContext::new(seller, now);
        self.curve.sell(
            &ctx,
            CurveAccounts {
                token: &mut self.token,
                purses: &mut self.purses,
                venue: &mut self.venue,
            },
            asset_in,
            U512::zero(),
        )
    }

    fn force_graduate(&mut self) -> Result<LiquidityReceipt, BondingCurveError> {
        let ctx = CallContext::new(creator(), LAUNCH);
        self.curve.force_graduate(
            &ctx,
            CurveAccounts {
                token: &mut self.token,
                purses: &mut self.purses,
                venue: &mut self.venue,
            },
        )
    }

    /// Holds while the curve is trading with no allocation outstanding
    fn assert_consistent(&self) {
        assert_eq!(self.purses.balance_of(&CURVE), self.curve.reserve_raised());
        assert_eq!(self.token.total_supply(), self.curve.asset_sold());
        assert!(self.token.reconciles());
    }
}

// ============ Trading ============

#[test]
fn test_buy_mints_and_collects_reserve() {
    let mut h = Harness::new();
    let outcome = h.buy(alice(), whole_reserve(10)).unwrap();

    assert!(outcome.graduation.is_none());
    assert_eq!(h.token.balance_of(&alice()), outcome.quote.asset_out);
    assert_eq!(h.purses.balance_of(&alice()), whole_reserve(9_990));
    assert_eq!(h.purses.balance_of(&treasury()), whole_reserve(10) / U512::from(100u64));
    assert_eq!(h.curve.reserve_raised(), outcome.quote.net_in);
    assert_eq!(h.curve.status(), CurveStatus::Trading);
    h.assert_consistent();
}

#[test]
fn test_preview_matches_execution() {
    let mut h = Harness::new();
    let preview = h.curve.preview_buy(whole_reserve(25)).unwrap();
    let outcome = h.buy(alice(), whole_reserve(25)).unwrap();
    assert_eq!(preview, outcome.quote);

    let half = outcome.quote.asset_out / U256::from(2u64);
    let now = LAUNCH + 60_000;
    let preview = h.curve.preview_sell(half, now).unwrap();
    let sold = h.sell(alice(), half, now).unwrap();
    assert_eq!(preview, sold);
}

#[test]
fn test_buy_slippage_leaves_state_untouched() {
    let mut h = Harness::new();
    let preview = h.curve.preview_buy(whole_reserve(5)).unwrap();

    let result = h.buy_with_min(alice(), whole_reserve(5), preview.asset_out + U256::one());
    assert_eq!(result.unwrap_err(), BondingCurveError::SlippageExceeded);
    assert_eq!(h.curve.position(), CurvePosition::default());
    assert!(h.token.total_supply().is_zero());
    assert_eq!(h.purses.balance_of(&alice()), whole_reserve(10_000));
}

#[test]
fn test_buy_without_funds() {
    let mut h = Harness::new();
    let result = h.buy(account(9), whole_reserve(1));
    assert_eq!(result.unwrap_err(), BondingCurveError::InsufficientInput);
    assert!(h.token.total_supply().is_zero());
}

#[test]
fn test_sell_pays_out_minus_fee() {
    let mut h = Harness::new();
    let bought = h.buy(alice(), whole_reserve(50)).unwrap().quote.asset_out;
    let treasury_before = h.purses.balance_of(&treasury());
    let alice_before = h.purses.balance_of(&alice());

    let quote = h.sell(alice(), bought / U256::from(4u64), LAUNCH).unwrap();

    assert_eq!(quote.fee_bps, 1_000);
    assert_eq!(h.purses.balance_of(&alice()), alice_before + quote.net_out);
    assert_eq!(h.purses.balance_of(&treasury()), treasury_before + quote.fee);
    assert_eq!(h.token.balance_of(&alice()), bought - bought / U256::from(4u64));
    h.assert_consistent();
}

#[test]
fn test_sell_more_than_sold_changes_nothing() {
    let mut h = Harness::new();
    let bought = h.buy(alice(), whole_reserve(5)).unwrap().quote.asset_out;
    let position = h.curve.position();

    let result = h.sell(alice(), bought + U256::one(), LAUNCH);
    assert_eq!(result.unwrap_err(), BondingCurveError::InsufficientSupply);
    assert_eq!(h.curve.position(), position);
    assert_eq!(h.token.balance_of(&alice()), bought);
    h.assert_consistent();
}

#[test]
fn test_sell_more_than_held() {
    let mut h = Harness::new();
    let alice_tokens = h.buy(alice(), whole_reserve(20)).unwrap().quote.asset_out;
    let bob_tokens = h.buy(bob(), whole_reserve(1)).unwrap().quote.asset_out;

    let result = h.sell(bob(), bob_tokens + alice_tokens / U256::from(2u64), LAUNCH);
    assert_eq!(result.unwrap_err(), BondingCurveError::InsufficientBalance);
    assert_eq!(h.token.balance_of(&bob()), bob_tokens);
}

#[test]
fn test_back_to_back_sells_pay_decreasing_fees() {
    let mut h = Harness::new();
    h.buy(alice(), whole_reserve(100)).unwrap();

    let first = h.sell(alice(), whole_tokens(1_000_000), LAUNCH + 1_000).unwrap();
    let second = h.sell(alice(), whole_tokens(1_000_000), LAUNCH + 2_000).unwrap();

    assert_eq!(first.fee_bps, 999);
    assert_eq!(second.fee_bps, 998);
    assert!(second.fee_bps < first.fee_bps);
    h.assert_consistent();
}

#[test]
fn test_sell_fee_settles_after_decay() {
    let mut h = Harness::new();
    h.buy(alice(), whole_reserve(100)).unwrap();
    let quote = h
        .sell(alice(), whole_tokens(1_000), LAUNCH + 5 * 900_000)
        .unwrap();
    assert_eq!(quote.fee_bps, 100);
}

#[test]
fn test_peer_transfer_gated_while_trading() {
    let mut h = Harness::new();
    let bought = h.buy(alice(), whole_reserve(5)).unwrap().quote.asset_out;
    assert_eq!(
        h.token.transfer(&alice(), &bob(), bought),
        Err(TokenError::TradingDisabled)
    );
}

#[test]
fn test_trade_events() {
    let mut h = Harness::new();
    let quote = h.buy(alice(), whole_reserve(3)).unwrap().quote;
    let events = h.curve.take_events();

    assert_eq!(
        events,
        vec![CurveEvent::Trade {
            side: TradeSide::Buy,
            trader: alice(),
            reserve_amount: whole_reserve(3),
            asset_amount: quote.asset_out,
            fee: quote.platform_fee,
            price_after: h.curve.current_price(),
            reserve_raised: quote.net_in,
            asset_sold: quote.asset_out,
        }]
    );
    assert!(h.curve.take_events().is_empty());
}

#[test]
fn test_progress_and_token_info() {
    let mut h = Harness::new();
    h.buy(alice(), whole_reserve(4_000)).unwrap();

    // 3_960 of 7_980 raised
    assert_eq!(h.curve.progress_bps(), 4_962);
    let info = h.curve.token_info(LAUNCH + 450_000);
    assert_eq!(info.current_sell_fee_bps, 550);
    assert_eq!(info.reserve_raised, whole_reserve(3_960));
    assert_eq!(info.asset_sold, h.curve.asset_sold());
    assert!(!info.graduated);
}

#[test]
fn test_reserve_is_conserved() {
    let mut h = Harness::new();
    let total = h.purses.total().unwrap();

    let bought = h.buy(alice(), whole_reserve(700)).unwrap().quote.asset_out;
    h.buy(bob(), whole_reserve(300)).unwrap();
    h.sell(alice(), bought / U256::from(3u64), LAUNCH + 10_000).unwrap();
    h.buy(alice(), whole_reserve(7_900)).unwrap();

    assert!(h.curve.is_graduated());
    assert_eq!(h.purses.total(), Some(total));
}

// ============ Graduation ============

#[test]
fn test_threshold_buy_graduates() {
    let mut h = Harness::new();
    let outcome = h.buy(alice(), whole_reserve(8_100)).unwrap();

    assert!(outcome.quote.capped);
    let receipt = match outcome.graduation {
        Some(GraduationOutcome::Graduated(receipt)) => receipt,
        other => panic!("unexpected graduation {:?}", other),
    };
    assert_eq!(receipt.pool, POOL);

    assert_eq!(h.curve.status(), CurveStatus::Graduated);
    assert!(h.curve.reserve_raised().is_zero());
    assert_eq!(h.curve.asset_sold(), whole_tokens(700_000_000));
    assert!(h.token.trading_enabled());

    // 81 platform fee plus 8_019 raised less 6_840 seeded
    assert_eq!(h.purses.balance_of(&treasury()), whole_reserve(1_260));
    assert_eq!(h.purses.balance_of(&POOL), whole_reserve(6_840));
    assert!(h.purses.balance_of(&CURVE).is_zero());
    assert_eq!(h.token.balance_of(&POOL), whole_tokens(40_000_000));
    assert!(h.token.balance_of(&CURVE).is_zero());
    assert_eq!(h.token.total_supply(), whole_tokens(740_000_000));
    assert!(h.token.reconciles());

    let request = &h.venue.requests[0];
    assert_eq!(request.min_reserve_amount, whole_reserve(6_498));
    assert_eq!(request.min_asset_amount, whole_tokens(38_000_000));
    assert_eq!(request.recipient, treasury());
    assert_eq!(request.deadline, LAUNCH + 300_000);

    let graduations = h
        .curve
        .take_events()
        .into_iter()
        .filter(|event| matches!(event, CurveEvent::GraduationSucceeded { .. }))
        .count();
    assert_eq!(graduations, 1);

    h.token
        .transfer(&alice(), &bob(), whole_tokens(1))
        .unwrap();
}

#[test]
fn test_buys_landing_on_threshold_graduate_once() {
    let mut h = Harness::configured(CurveParams::default(), 0);

    let mut graduations = Vec::new();
    for _ in 0..10 {
        let outcome = h.buy(alice(), whole_reserve(798)).unwrap();
        if let Some(graduation) = outcome.graduation {
            graduations.push(graduation);
        }
    }

    assert_eq!(graduations.len(), 1);
    assert!(matches!(graduations[0], GraduationOutcome::Graduated(_)));
    assert_eq!(h.curve.status(), CurveStatus::Graduated);
    assert!(h.curve.reserve_raised().is_zero());
    assert_eq!(h.curve.asset_sold(), whole_tokens(700_000_000));
    assert_eq!(h.token.balance_of(&alice()), whole_tokens(700_000_000));

    // 7_980 raised less 6_840 seeded
    assert_eq!(h.purses.balance_of(&treasury()), whole_reserve(1_140));
    assert_eq!(h.purses.balance_of(&POOL), whole_reserve(6_840));
    assert_eq!(h.venue.requests.len(), 1);
}

#[test]
fn test_failed_settlement_restores_ledger_and_purses() {
    let mut h = Harness::new();
    // The pool's purse cannot take the seeded reserve
    h.purses
        .credit(&POOL, U512::MAX - whole_reserve(1))
        .unwrap();

    let outcome = h.buy(alice(), whole_reserve(8_100)).unwrap();
    assert_eq!(
        outcome.graduation,
        Some(GraduationOutcome::SettlementFailed(BondingCurveError::Purse(
            PurseError::Overflow
        )))
    );

    assert_eq!(h.curve.status(), CurveStatus::Trading);
    assert_eq!(h.curve.reserve_raised(), whole_reserve(8_019));
    assert!(!h.token.trading_enabled());
    assert!(h.token.balance_of(&POOL).is_zero());
    assert!(h.token.balance_of(&CURVE).is_zero());
    assert_eq!(h.purses.balance_of(&POOL), U512::MAX - whole_reserve(1));
    h.assert_consistent();

    assert!(h.curve.take_events().contains(&CurveEvent::GraduationSettlementFailed {
        pool: POOL,
        error: BondingCurveError::Purse(PurseError::Overflow),
        allocation_burned: true,
    }));

    // The curve is usable again
    assert!(!h.curve.lock.is_locked());
    h.sell(alice(), whole_tokens(1_000_000), LAUNCH).unwrap();
    h.assert_consistent();
    assert_eq!(
        h.force_graduate().unwrap_err(),
        BondingCurveError::SettlementFailed(Box::new(BondingCurveError::Purse(
            PurseError::Overflow
        )))
    );
    assert_eq!(h.curve.status(), CurveStatus::Trading);
    h.assert_consistent();
}

#[test]
fn test_graduated_curve_rejects_everything() {
    let mut h = Harness::new();
    h.buy(alice(), whole_reserve(8_100)).unwrap();

    assert_eq!(
        h.buy(bob(), whole_reserve(1)).unwrap_err(),
        BondingCurveError::CurveGraduated
    );
    assert_eq!(
        h.sell(alice(), whole_tokens(1), LAUNCH).unwrap_err(),
        BondingCurveError::CurveGraduated
    );
    assert_eq!(
        h.force_graduate().unwrap_err(),
        BondingCurveError::CurveGraduated
    );
    assert_eq!(
        h.curve.preview_buy(whole_reserve(1)).unwrap_err(),
        BondingCurveError::CurveGraduated
    );
    assert_eq!(h.venue.requests.len(), 1);
    assert!(h.curve.token_info(LAUNCH).graduated);
}

#[test]
fn test_partial_receipt_settles_remainder() {
    let mut h = Harness::new();
    h.venue.use_bps = 9_700;
    h.buy(alice(), whole_reserve(8_100)).unwrap();

    let reserve_used = bps_of(whole_reserve(6_840), 9_700);
    assert!(h.curve.is_graduated());
    assert_eq!(h.purses.balance_of(&POOL), reserve_used);
    assert_eq!(
        h.purses.balance_of(&treasury()),
        whole_reserve(8_100) - reserve_used
    );
    // Unused allocation is burned
    assert_eq!(h.token.balance_of(&POOL), whole_tokens(38_800_000));
    assert!(h.token.balance_of(&CURVE).is_zero());
    assert_eq!(
        h.token.total_supply(),
        whole_tokens(700_000_000) + whole_tokens(38_800_000)
    );
}

#[test]
fn test_venue_failure_rolls_back_and_burns_allocation() {
    let mut h = Harness::new();
    h.venue = MockVenue::failing(VenueError::Rejected("paused".into()));

    let outcome = h.buy(alice(), whole_reserve(8_100)).unwrap();
    assert_eq!(
        outcome.graduation,
        Some(GraduationOutcome::RolledBack(BondingCurveError::VenueFailure(
            VenueError::Rejected("paused".into())
        )))
    );

    assert_eq!(h.curve.status(), CurveStatus::Trading);
    assert!(!h.token.trading_enabled());
    assert_eq!(h.curve.reserve_raised(), whole_reserve(8_019));
    h.assert_consistent();

    let events = h.curve.take_events();
    assert!(events.contains(&CurveEvent::GraduationRolledBack {
        reason: VenueError::Rejected("paused".into()),
        allocation_burned: true,
    }));

    // Still trading: the cap blocks buys but sells go through
    assert_eq!(
        h.buy(bob(), whole_reserve(1)).unwrap_err(),
        BondingCurveError::SupplyCapReached
    );
    h.sell(alice(), whole_tokens(1_000_000), LAUNCH).unwrap();
    h.assert_consistent();

    // Retry once the venue is back
    h.venue = MockVenue::accepting();
    let raised = h.curve.reserve_raised();
    let treasury_before = h.purses.balance_of(&treasury());
    h.force_graduate().unwrap();

    assert!(h.curve.is_graduated());
    assert_eq!(
        h.purses.balance_of(&treasury()),
        treasury_before + raised - whole_reserve(6_840)
    );
    assert!(h.token.trading_enabled());
}

#[test]
fn test_rollback_can_leave_allocation_outstanding() {
    let mut h = Harness::with_params(CurveParams {
        rollback: GraduationRollback::LeaveOutstanding,
        ..CurveParams::default()
    });
    h.venue = MockVenue::failing(VenueError::DeadlineExpired {
        deadline: LAUNCH,
        now: LAUNCH + 1,
    });

    let outcome = h.buy(alice(), whole_reserve(8_100)).unwrap();
    assert!(matches!(
        outcome.graduation,
        Some(GraduationOutcome::RolledBack(BondingCurveError::VenueFailure(
            VenueError::DeadlineExpired { .. }
        )))
    ));

    assert_eq!(h.curve.status(), CurveStatus::Trading);
    assert_eq!(h.token.balance_of(&CURVE), whole_tokens(40_000_000));
    assert_eq!(h.token.total_supply(), whole_tokens(740_000_000));
    assert_eq!(h.curve.asset_sold(), whole_tokens(700_000_000));
    assert!(!h.token.trading_enabled());
    assert!(h.curve.take_events().contains(&CurveEvent::GraduationRolledBack {
        reason: VenueError::DeadlineExpired {
            deadline: LAUNCH,
            now: LAUNCH + 1,
        },
        allocation_burned: false,
    }));
}

#[test]
fn test_receipt_below_floor_rolls_back() {
    let mut h = Harness::new();
    h.venue.use_bps = 9_000;

    let outcome = h.buy(alice(), whole_reserve(8_100)).unwrap();
    assert_eq!(
        outcome.graduation,
        Some(GraduationOutcome::RolledBack(BondingCurveError::VenueFailure(
            VenueError::SlippageFloor
        )))
    );
    assert!(h.purses.balance_of(&POOL).is_zero());
    h.assert_consistent();
}

#[test]
fn test_force_graduate_requires_allocation() {
    let mut h = Harness::new();
    h.buy(alice(), whole_reserve(100)).unwrap();
    assert_eq!(
        h.force_graduate().unwrap_err(),
        BondingCurveError::GraduationThresholdNotMet
    );
    assert!(h.venue.requests.is_empty());

    // 6_860.7 raised: enough to seed the pool, short of the threshold
    let outcome = h.buy(alice(), whole_reserve(6_830)).unwrap();
    assert!(outcome.graduation.is_none());

    h.force_graduate().unwrap();
    assert!(h.curve.is_graduated());
    assert_eq!(h.purses.balance_of(&POOL), whole_reserve(6_840));
    assert_eq!(
        h.purses.balance_of(&treasury()) + h.purses.balance_of(&POOL),
        whole_reserve(6_930)
    );
}

#[test]
fn test_force_graduate_reports_venue_failure() {
    let mut h = Harness::new();
    h.buy(alice(), whole_reserve(7_000)).unwrap();
    h.venue = MockVenue::failing(VenueError::Rejected("no pool".into()));

    assert_eq!(
        h.force_graduate().unwrap_err(),
        BondingCurveError::VenueFailure(VenueError::Rejected("no pool".into()))
    );
    assert_eq!(h.curve.status(), CurveStatus::Trading);
    h.assert_consistent();
}

#[test]
fn test_forced_rollback_can_leave_allocation_with_curve() {
    let mut h = Harness::with_params(CurveParams {
        rollback: GraduationRollback::LeaveOutstanding,
        ..CurveParams::default()
    });
    h.buy(alice(), whole_reserve(7_000)).unwrap();
    h.venue = MockVenue::failing(VenueError::Rejected("no pool".into()));

    // The error still leaves the allocation minted and an event recorded
    assert!(matches!(
        h.force_graduate().unwrap_err(),
        BondingCurveError::VenueFailure(_)
    ));
    assert_eq!(h.curve.status(), CurveStatus::Trading);
    assert_eq!(h.token.balance_of(&CURVE), whole_tokens(40_000_000));
    assert_eq!(
        h.token.total_supply(),
        h.curve.asset_sold() + whole_tokens(40_000_000)
    );
    assert!(h.curve.take_events().contains(&CurveEvent::GraduationRolledBack {
        reason: VenueError::Rejected("no pool".into()),
        allocation_burned: false,
    }));
}

// ============ Guards ============

#[test]
fn test_nested_operation_is_rejected() {
    let mut h = Harness::new();
    let guard = h.curve.lock.acquire().unwrap();

    assert_eq!(
        h.buy(alice(), whole_reserve(1)).unwrap_err(),
        BondingCurveError::LockedReentrancy
    );
    assert_eq!(
        h.force_graduate().unwrap_err(),
        BondingCurveError::LockedReentrancy
    );
    drop(guard);

    h.buy(alice(), whole_reserve(1)).unwrap();
    assert!(!h.curve.lock.is_locked());
}

#[test]
fn test_failed_operation_releases_lock() {
    let mut h = Harness::new();
    assert!(h.buy(account(9), whole_reserve(1)).is_err());
    assert!(!h.curve.lock.is_locked());
    h.buy(alice(), whole_reserve(1)).unwrap();
}

#[test]
fn test_graduating_curve_refuses_trades() {
    let mut h = Harness::new();
    h.curve.status = CurveStatus::Graduating;
    assert_eq!(
        h.curve.preview_buy(whole_reserve(1)).unwrap_err(),
        BondingCurveError::LockedReentrancy
    );
}

#[test]
fn test_rejects_foreign_ledger() {
    let mut h = Harness::new();
    let mut other = LaunchToken::new(Key::Hash([12; 32]), "Other", "OTH");
    let ctx = CallContext::new(alice(), LAUNCH);

    let result = h.curve.buy(
        &ctx,
        CurveAccounts {
            token: &mut other,
            purses: &mut h.purses,
            venue: &mut h.venue,
        },
        whole_reserve(1),
        U256::zero(),
    );
    assert_eq!(result.unwrap_err(), BondingCurveError::TokenMismatch);
}

#[test]
fn test_new_validates_binding_and_fee() {
    let mut token = LaunchToken::new(TOKEN, "Moon Cat", "MCAT");
    let minter = token.bind_minter(Key::Hash([99; 32])).unwrap();
    let result = BondingCurve::new(
        CURVE,
        creator(),
        treasury(),
        CurveParams::default(),
        100,
        LAUNCH,
        minter,
    );
    assert!(matches!(result, Err(BondingCurveError::InvalidParams(_))));

    let mut token = LaunchToken::new(TOKEN, "Moon Cat", "MCAT");
    let minter = token.bind_minter(CURVE).unwrap();
    let result = BondingCurve::new(
        CURVE,
        creator(),
        treasury(),
        CurveParams::default(),
        MAX_PLATFORM_FEE_BPS + 1,
        LAUNCH,
        minter,
    );
    assert!(matches!(result, Err(BondingCurveError::InvalidParams(_))));
}

#[test]
fn test_status_from_u8() {
    assert_eq!(CurveStatus::from_u8(0), Some(CurveStatus::Trading));
    assert_eq!(CurveStatus::from_u8(2), Some(CurveStatus::Graduated));
    assert_eq!(CurveStatus::from_u8(3), None);
}
