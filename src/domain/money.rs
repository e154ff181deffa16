//! Currency helpers. Amounts are `Decimal` with two minor-unit digits.

use rust_decimal::prelude::*;

/// Minor-unit precision of the institute's currency
pub const MONEY_DP: u32 = 2;

/// Rounds to minor units, half away from zero.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders an amount the way the backend expects it on the wire (`"1500.00"`).
pub fn money_string(value: Decimal) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(MONEY_DP);
    rounded.to_string()
}
