//! Money calculation utilities using rust_decimal for precision
//!
//! Every calculation in the engine runs on `Decimal`; `f64` only crosses
//! the API boundary. Exported amounts are rounded to 6 decimal places,
//! which keeps breakdown reconciliation exact at the reporting tolerance.

use rust_decimal::prelude::*;

/// Decimal places kept on exported monetary values
const DECIMAL_PLACES: u32 = 6;

/// Tolerance for monetary comparisons (1e-6)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Convert f64 to Decimal for calculation
///
/// Inputs are validated at the boundary; a non-finite value that still
/// reaches a calculation is logged and treated as zero rather than
/// poisoning a financial figure.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    match Decimal::from_f64(value) {
        Some(decimal) => decimal,
        None => {
            tracing::error!(value, "non-finite amount in money calculation, using zero");
            Decimal::ZERO
        }
    }
}

/// Round a Decimal to the exported precision (half away from zero)
#[inline]
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, at the exported precision
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_amount(value).to_f64().unwrap_or_default()
}

/// Compare two amounts for equality within [`MONEY_TOLERANCE`]
#[inline]
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() <= MONEY_TOLERANCE
}
