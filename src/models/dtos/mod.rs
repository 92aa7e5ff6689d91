pub mod booking_dto;
pub mod chapa;
pub mod listing_dto;
pub mod payment_dto;
pub mod review_dto;

use bigdecimal::BigDecimal;
use std::str::FromStr;
use validator::ValidationError;

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Amounts travel as decimal strings end to end; the gateway expects them
/// that way and it avoids float rounding on the wire.
pub(crate) fn valid_amount(value: &str) -> Result<(), ValidationError> {
    match BigDecimal::from_str(value.trim()) {
        Ok(amount) if amount > BigDecimal::from(0) => Ok(()),
        _ => Err(ValidationError::new("amount must be a positive decimal")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_whitespace_are_rejected() {
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("BK1").is_ok());
    }

    #[test]
    fn amount_must_be_positive_decimal() {
        assert!(valid_amount("100.00").is_ok());
        assert!(valid_amount(" 250 ").is_ok());
        assert!(valid_amount("0").is_err());
        assert!(valid_amount("-3.50").is_err());
        assert!(valid_amount("ten").is_err());
    }
}
