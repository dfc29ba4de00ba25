//! Contribution formulas: the net effect an entity's current field values
//! have on the capital balance. Costs contribute negatively, collected money
//! positively. The delta applied on any mutation is always
//! `new_contribution - old_contribution`, with an absent entity contributing
//! zero (covers create and soft-delete uniformly).

use model::entities::{expense, order, order_basket};
use rust_decimal::Decimal;

/// Net effect an entity has on the capital balance while it exists.
pub trait CapitalContribution {
    fn contribution(&self) -> Decimal;
}

/// An expense is money out, nothing more.
pub fn expense_contribution(amount: Decimal) -> Decimal {
    -amount
}

/// Delivery cost is money out; the order's price counts only once it has
/// actually been collected from the customer. Price owed but uncollected
/// contributes nothing.
pub fn order_contribution(
    total_price: Decimal,
    has_received_price: bool,
    delivery_charge: Option<Decimal>,
) -> Decimal {
    let received = if has_received_price {
        total_price
    } else {
        Decimal::ZERO
    };
    received - delivery_charge.unwrap_or(Decimal::ZERO)
}

/// A basket's only ledger effect is the freight cost paid out.
pub fn basket_contribution(shipping_charge: Option<Decimal>) -> Decimal {
    -shipping_charge.unwrap_or(Decimal::ZERO)
}

impl CapitalContribution for expense::Model {
    fn contribution(&self) -> Decimal {
        expense_contribution(self.amount)
    }
}

impl CapitalContribution for order::Model {
    fn contribution(&self) -> Decimal {
        order_contribution(self.total_price, self.has_received_price, self.delivery_charge)
    }
}

impl CapitalContribution for order_basket::Model {
    fn contribution(&self) -> Decimal {
        basket_contribution(self.shipping_charge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(units: i64) -> Decimal {
        Decimal::from(units)
    }

    #[test]
    fn expense_contributes_its_negated_amount() {
        assert_eq!(expense_contribution(dec(50)), dec(-50));
        assert_eq!(expense_contribution(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn order_price_is_gated_by_received_flag() {
        // Uncollected price does not count; only the delivery cost does.
        assert_eq!(order_contribution(dec(100), false, Some(dec(10))), dec(-10));
        // Once collected, the price enters in full.
        assert_eq!(order_contribution(dec(100), true, Some(dec(10))), dec(90));
    }

    #[test]
    fn missing_monetary_fields_count_as_zero() {
        assert_eq!(order_contribution(dec(100), false, None), Decimal::ZERO);
        assert_eq!(basket_contribution(None), Decimal::ZERO);
    }

    #[test]
    fn basket_contributes_its_negated_shipping_charge() {
        assert_eq!(basket_contribution(Some(dec(20))), dec(-20));
    }
}
