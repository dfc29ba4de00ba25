use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inclusive datetime range used by the report queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl DateRange {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self { from, to }
    }
}

/// Aggregate money position derived from the current (non-deleted) orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderMoneyTotals {
    /// Sum of `total_price` over orders whose price has not been collected.
    pub missing_from_providers: Decimal,
    /// Sum of `customer_delivery_charge` over orders whose price has been
    /// collected.
    pub received_delivery_charges: Decimal,
}

/// Per shipping provider load over a date range: how many baskets were created
/// and how much weight they carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProviderLoad {
    pub provider_id: i32,
    pub provider_name: String,
    pub basket_count: u64,
    pub total_weight: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn provider_load_round_trips_through_json() {
        let load = ProviderLoad {
            provider_id: 7,
            provider_name: "TransGlobal".to_string(),
            basket_count: 3,
            total_weight: Decimal::new(12345, 2),
        };

        let json = serde_json::to_string(&load).unwrap();
        let back: ProviderLoad = serde_json::from_str(&json).unwrap();
        assert_eq!(back, load);
    }
}
