use casper_types::U512;

use crate::params::BPS_DENOMINATOR;

/// Anti-dump sell fee: decays linearly from `initial_bps` to `final_bps`
/// over `decay_duration_ms` after launch, then stays at `final_bps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellFeeSchedule {
    pub initial_bps: u64,
    pub final_bps: u64,
    pub decay_duration_ms: u64,
}

impl SellFeeSchedule {
    /// Fee rate after `elapsed_ms` since launch
    pub fn fee_bps_at(&self, elapsed_ms: u64) -> u64 {
        if elapsed_ms >= self.decay_duration_ms || self.initial_bps <= self.final_bps {
            return self.final_bps;
        }
        let range = u128::from(self.initial_bps - self.final_bps);
        let decayed = range * u128::from(elapsed_ms) / u128::from(self.decay_duration_ms);
        // decayed < range because elapsed_ms < decay_duration_ms
        self.initial_bps - decayed as u64
    }

    /// Fee rate at `now` for a curve launched at `launch_time`. A clock
    /// reading earlier than launch counts as zero elapsed.
    pub fn current_bps(&self, launch_time: u64, now: u64) -> u64 {
        self.fee_bps_at(now.saturating_sub(launch_time))
    }
}

/// `amount * bps / 10_000`, truncated
pub fn bps_of(amount: U512, bps: u64) -> U512 {
    // amount is bounded well below U512::MAX / 10_000 by every caller
    amount.saturating_mul(U512::from(bps)) / U512::from(BPS_DENOMINATOR)
}
