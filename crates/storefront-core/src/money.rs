//! Presentation-time currency formatting. Stored totals are never rounded.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, half away from zero.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as dollars with exactly two decimals, e.g. `$179.99`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", round_cents(amount))
}
