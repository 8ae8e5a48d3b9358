use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::error::BondingCurveError;

/// Per-curve reentrancy lock. Buy, sell and graduation hold a [`LockGuard`]
/// for their whole duration; the guard releases the lock when dropped, on
/// success and on every error path.
#[derive(Debug, Default)]
pub struct OperationLock {
    locked: Arc<AtomicBool>,
}

impl OperationLock {
    pub fn acquire(&self) -> Result<LockGuard, BondingCurveError> {
        if self.locked.swap(true, Ordering::AcqRel) {
            debug!("rejected nested curve operation");
            return Err(BondingCurveError::LockedReentrancy);
        }
        Ok(LockGuard {
            locked: Arc::clone(&self.locked),
        })
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct LockGuard {
    locked: Arc<AtomicBool>,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        self.locked.store(false, Ordering::Release);
    }
}
