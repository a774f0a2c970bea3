use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_SYMBOL: &str = "₹";

/// Two decimal places, halves rounded away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

pub fn format_currency(amount: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{}", format_amount(amount))
}

/// Signed amount, e.g. `+12.50` or `-3.00`.
pub fn format_signed(amount: Decimal) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format_amount(amount)
    } else {
        format!("+{}", format_amount(amount.abs()))
    }
}
