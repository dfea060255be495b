//! # Rounding Module
//!
//! Conversion between fractional share math and whole-share counts.
//!
//! Valuation math runs in `f64`; the cap table stores whole `u64` shares.
//! Every crossing between the two goes through this module so the rounding
//! policy stays in one place.

use thiserror::Error;

/// Errors from strict share conversion.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ShareMathError {
    /// Value is NaN or infinite.
    #[error("share value is not finite: {0}")]
    NonFinite(f64),
    /// Negative share counts do not exist.
    #[error("share value is negative: {0}")]
    Negative(f64),
    /// Value exceeds what fits in a `u64` share count.
    #[error("share value overflows the share counter: {0}")]
    Overflow(f64),
}

/// Rounding policy for fractional share amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round up. Suits reserved pools that must cover their target.
    Up,
    /// Round down. Suits payouts that must never overshoot.
    Down,
    /// Round half away from zero. The simulator's policy for priced
    /// allocations.
    Nearest,
}

/// Strict conversion from a fractional share amount to a whole count.
///
/// Rejects non-finite, negative, and overflowing values instead of
/// guessing.
pub fn to_shares(value: f64, rounding: Rounding) -> Result<u64, ShareMathError> {
    if !value.is_finite() {
        return Err(ShareMathError::NonFinite(value));
    }
    if value < 0.0 {
        return Err(ShareMathError::Negative(value));
    }
    let rounded = match rounding {
        Rounding::Up => value.ceil(),
        Rounding::Down => value.floor(),
        Rounding::Nearest => value.round(),
    };
    if rounded >= u64::MAX as f64 {
        return Err(ShareMathError::Overflow(value));
    }
    Ok(rounded as u64)
}

/// Total conversion used on the simulation path.
///
/// Garbage degrades instead of erroring: NaN, infinities, and negative
/// values become 0, values past `u64::MAX` saturate. Rounds to nearest.
#[must_use]
pub fn to_shares_lossy(value: f64) -> u64 {
    if !value.is_finite() || value < 0.0 {
        return 0;
    }
    let rounded = value.round();
    if rounded >= u64::MAX as f64 {
        return u64::MAX;
    }
    rounded as u64
}

/// Approximate equality for percentage values.
///
/// Non-finite inputs never compare equal.
#[must_use]
pub fn approx_eq_pct(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

// =============================================================================
// TESTS
// =============================================================================
