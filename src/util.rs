//! Rounding helpers for hour arithmetic.
//!
//! Reported hours are rounded to 2 decimals; intermediate remainders to 4,
//! so repeated chunk subtraction does not accumulate float residue.

/// Rounds to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to 4 decimal places.
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
