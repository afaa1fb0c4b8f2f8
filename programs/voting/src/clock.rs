use anchor_lang::prelude::*;

/// Source of the ledger's current unix time.
pub trait LedgerClock {
    fn unix_timestamp(&self) -> Result<i64>;
}

/// Reads the Clock sysvar. Only usable inside the runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysvarClock;

impl LedgerClock for SysvarClock {
    fn unix_timestamp(&self) -> Result<i64> {
        Ok(Clock::get()?.unix_timestamp)
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl LedgerClock for FixedClock {
    fn unix_timestamp(&self) -> Result<i64> {
        Ok(self.0)
    }
}
