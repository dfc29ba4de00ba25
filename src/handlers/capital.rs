//! Capital balance and the money reports derived from the live rows. The
//! balance itself is maintained by the ledger crate; these endpoints only
//! read.

use crate::schemas::{ledger_status, AppState, CachedData};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Duration, NaiveDateTime, Utc};
use common::{ApiResponse, DateRange, OrderMoneyTotals, ProviderLoad};
use ledger::reports;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};
use utoipa::ToSchema;

/// Capital balance response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CapitalResponse {
    /// Current capital balance
    pub amount: Decimal,
}

/// Query parameters for the shipping provider load report
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProviderLoadQuery {
    /// Range start (defaults to 30 days ago)
    pub date_from: Option<NaiveDateTime>,
    /// Range end, inclusive (defaults to the end of today)
    pub date_to: Option<NaiveDateTime>,
}

/// Get the current capital balance
#[utoipa::path(
    get,
    path = "/api/v1/capital",
    tag = "capital",
    responses(
        (status = 200, description = "Capital balance retrieved successfully", body = ApiResponse<CapitalResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_capital_balance(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CapitalResponse>>, StatusCode> {
    match reports::get_capital_balance(&state.db).await {
        Ok(amount) => {
            let response = ApiResponse {
                data: CapitalResponse { amount },
                message: "Capital balance retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to retrieve capital balance: {}", e);
            Err(ledger_status(&e))
        }
    }
}

/// Get the order money position
///
/// Splits live order money into what customers still owe and the delivery
/// charges already collected.
#[utoipa::path(
    get,
    path = "/api/v1/reports/order-money",
    tag = "capital",
    responses(
        (status = 200, description = "Order money report retrieved successfully", body = ApiResponse<OrderMoneyTotals>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_order_money_report(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<OrderMoneyTotals>>, StatusCode> {
    let cache_key = "order_money".to_string();
    if let Some(CachedData::OrderMoney(totals)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: totals,
            message: "Order money report retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    match reports::order_money_totals(&state.db).await {
        Ok(totals) => {
            state
                .cache
                .insert(cache_key, CachedData::OrderMoney(totals.clone()))
                .await;
            let response = ApiResponse {
                data: totals,
                message: "Order money report retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to compute order money report: {}", e);
            Err(ledger_status(&e))
        }
    }
}

/// Get basket count and total weight per shipping provider
#[utoipa::path(
    get,
    path = "/api/v1/reports/shipping-provider-load",
    tag = "capital",
    params(
        ("date_from" = Option<String>, Query, description = "Range start (defaults to 30 days ago)"),
        ("date_to" = Option<String>, Query, description = "Range end, inclusive (defaults to end of today)"),
    ),
    responses(
        (status = 200, description = "Provider load retrieved successfully", body = ApiResponse<Vec<ProviderLoad>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_shipping_provider_load(
    Query(query): Query<ProviderLoadQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProviderLoad>>>, StatusCode> {
    let to = query.date_to.unwrap_or_else(|| {
        // End of today, so baskets created later the same day still count.
        Utc::now()
            .date_naive()
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| Utc::now().naive_utc())
    });
    let from = query.date_from.unwrap_or(to - Duration::days(30));
    let range = DateRange { from, to };

    let cache_key = format!("provider_load_{}_{}", range.from, range.to);
    if let Some(CachedData::ProviderLoad(loads)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: loads,
            message: "Provider load retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    match reports::shipping_provider_load(&state.db, &range).await {
        Ok(loads) => {
            state
                .cache
                .insert(cache_key, CachedData::ProviderLoad(loads.clone()))
                .await;
            let response = ApiResponse {
                data: loads,
                message: "Provider load retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to compute provider load: {}", e);
            Err(ledger_status(&e))
        }
    }
}
