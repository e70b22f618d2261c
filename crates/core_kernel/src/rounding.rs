//! Display rounding rules
//!
//! Amounts and probabilities are carried at full precision through every
//! calculation and only rounded where a value leaves the system. Rounding
//! uses the decimal default strategy (round half to even).

use rust_decimal::Decimal;

/// Decimal places for currency amounts in output
pub const CURRENCY_DP: u32 = 2;

/// Decimal places for probabilities in output
pub const PROBABILITY_DP: u32 = 4;

/// Rounds a currency amount for display
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp(CURRENCY_DP)
}

/// Rounds a probability (or a mean of probabilities) for display
pub fn round_probability(value: Decimal) -> Decimal {
    value.round_dp(PROBABILITY_DP)
}

/// Rounds a binary probability for display
///
/// The exact binary value is rounded, not its shortest decimal form, so
/// `0.51235_f64` (stored just below the tie) gives `0.5123`.
pub fn round_probability_value(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .map(round_probability)
        .unwrap_or(Decimal::ZERO)
}
