//! Decimal helpers for monetary amounts
//!
//! Amounts are plain `rust_decimal::Decimal` values in the policy currency.
//! All rounding goes through this module so the rule is defined once.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::DomainError;

/// Decimal places kept on stored amounts
pub const CENT_PLACES: u32 = 2;

/// Rounds to cents, halves away from zero (0.125 becomes 0.13)
pub fn round_half_up_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Rejects zero and negative amounts
pub fn ensure_positive(field: &str, amount: Decimal) -> Result<(), DomainError> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::validation(format!(
            "{field} must be greater than zero, got {amount}"
        )));
    }
    Ok(())
}

/// Rejects negative amounts
pub fn ensure_non_negative(field: &str, amount: Decimal) -> Result<(), DomainError> {
    if amount < Decimal::ZERO {
        return Err(DomainError::validation(format!(
            "{field} cannot be negative, got {amount}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up_cents(dec!(0.125)), dec!(0.13));
        assert_eq!(round_half_up_cents(dec!(0.124)), dec!(0.12));
        assert_eq!(round_half_up_cents(dec!(2.675)), dec!(2.68));
        assert_eq!(round_half_up_cents(dec!(100)), dec!(100));
    }

    #[test]
    fn test_positive_checks() {
        assert!(ensure_positive("amount", dec!(0)).is_err());
        assert!(ensure_positive("amount", dec!(-1)).is_err());
        assert!(ensure_positive("amount", dec!(0.01)).is_ok());
        assert!(ensure_non_negative("premium", dec!(0)).is_ok());
        assert!(ensure_non_negative("premium", dec!(-0.01)).is_err());
    }
}
