use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Static note shown next to every successful prediction.
pub const ADVISORY_NOTE: &str = "Note: This prediction is based on historical data and market trends.
Actual prices may vary based on additional factors like:
- Local market conditions
- Car condition
- Additional features
- Color and interior options";

pub const FOOTER_NOTE: &str =
    "This model is trained on historical car price data. Results should be used as estimates only.";

pub const RETRY_HINT: &str =
    "Please ensure all input features are in the correct format and try again.";

/// A predicted price, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub price: Decimal,
}

impl PredictionResult {
    /// Returns `None` for values that cannot be represented as a price.
    ///
    /// Rounds the exact binary value of `value`, not its shortest decimal
    /// representation, so `2.675` (stored as `2.67499...`) becomes `2.67`.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let price = Decimal::from_f64_retain(value)?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        Some(Self { price })
    }

    pub fn formatted(&self) -> String {
        format_currency(self.price)
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Formats an amount as `$1,234,567.89`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(123456)), "$123,456.00");
        assert_eq!(format_currency(dec!(999.5)), "$999.50");
        assert_eq!(format_currency(dec!(1000)), "$1,000.00");
    }

    #[test]
    fn test_zero_and_negative() {
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert_eq!(format_currency(dec!(-2500.1)), "-$2,500.10");
    }

    #[test]
    fn test_result_rounds_to_cents() {
        let result = PredictionResult::from_f64(18250.456).unwrap();
        assert_eq!(result.price, dec!(18250.46));
        assert_eq!(result.to_string(), "$18,250.46");
    }

    #[test]
    fn test_half_cent_floats_round_their_binary_value() {
        assert_eq!(PredictionResult::from_f64(2.675).unwrap().to_string(), "$2.67");
        assert_eq!(
            PredictionResult::from_f64(12345.675).unwrap().to_string(),
            "$12,345.67"
        );
        // Exactly representable midpoint still rounds half to even
        assert_eq!(PredictionResult::from_f64(0.125).unwrap().price, dec!(0.12));
    }

    #[test]
    fn test_result_rejects_invalid_values() {
        assert!(PredictionResult::from_f64(-1.0).is_none());
        assert!(PredictionResult::from_f64(f64::NAN).is_none());
        assert!(PredictionResult::from_f64(f64::INFINITY).is_none());
        assert!(PredictionResult::from_f64(0.0).is_some());
    }
}
