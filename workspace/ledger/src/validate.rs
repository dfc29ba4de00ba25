use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};

/// Rejects amounts that must be strictly positive (expense costs).
pub(crate) fn positive(field: &'static str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

/// Rejects negative money fields.
pub(crate) fn non_negative(field: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}

/// Same as [`non_negative`] for optional fields; absent means zero and is
/// always fine.
pub(crate) fn non_negative_opt(field: &'static str, value: Option<Decimal>) -> Result<()> {
    match value {
        Some(v) => non_negative(field, v),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert!(positive("amount", Decimal::ONE).is_ok());
        assert!(positive("amount", Decimal::ZERO).is_err());
        assert!(positive("amount", Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn non_negative_allows_zero() {
        assert!(non_negative("charge", Decimal::ZERO).is_ok());
        assert!(non_negative("charge", Decimal::NEGATIVE_ONE).is_err());
        assert!(non_negative_opt("charge", None).is_ok());
        assert!(non_negative_opt("charge", Some(Decimal::NEGATIVE_ONE)).is_err());
    }
}
