use axum::http::StatusCode;
use common::{DateRange, OrderMoneyTotals, ProviderLoad};
use ledger::LedgerError;
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for the report endpoints
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    ProviderLoad(Vec<ProviderLoad>),
    OrderMoney(OrderMoneyTotals),
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Maps a ledger error to the HTTP status the handlers return.
///
/// Validation failures are the caller's fault, missing or soft-deleted rows
/// are 404, anything database-shaped is a 500.
pub fn ledger_status(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::Validation(_) => StatusCode::BAD_REQUEST,
        LedgerError::NotFound { .. } => StatusCode::NOT_FOUND,
        LedgerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::get_expenses,
        crate::handlers::expenses::get_expense,
        crate::handlers::expenses::update_expense,
        crate::handlers::expenses::delete_expense,
        crate::handlers::expenses::create_expense_category,
        crate::handlers::expenses::get_expense_categories,
        crate::handlers::expenses::get_expense_category,
        crate::handlers::expenses::update_expense_category,
        crate::handlers::expenses::delete_expense_category,
        crate::handlers::orders::create_order,
        crate::handlers::orders::get_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::update_order,
        crate::handlers::orders::delete_order,
        crate::handlers::baskets::create_basket,
        crate::handlers::baskets::get_baskets,
        crate::handlers::baskets::get_basket,
        crate::handlers::baskets::update_basket,
        crate::handlers::baskets::delete_basket,
        crate::handlers::baskets::get_basket_orders,
        crate::handlers::customers::create_customer,
        crate::handlers::customers::get_customers,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::update_customer,
        crate::handlers::customers::delete_customer,
        crate::handlers::providers::create_shipping_provider,
        crate::handlers::providers::get_shipping_providers,
        crate::handlers::providers::get_shipping_provider,
        crate::handlers::providers::update_shipping_provider,
        crate::handlers::providers::delete_shipping_provider,
        crate::handlers::providers::create_delivery_provider,
        crate::handlers::providers::get_delivery_providers,
        crate::handlers::providers::get_delivery_provider,
        crate::handlers::providers::update_delivery_provider,
        crate::handlers::providers::delete_delivery_provider,
        crate::handlers::providers::create_shipping_source,
        crate::handlers::providers::get_shipping_sources,
        crate::handlers::providers::get_shipping_source,
        crate::handlers::providers::update_shipping_source,
        crate::handlers::providers::delete_shipping_source,
        crate::handlers::employees::create_employee,
        crate::handlers::employees::get_employees,
        crate::handlers::employees::get_employee,
        crate::handlers::employees::update_employee,
        crate::handlers::employees::delete_employee,
        crate::handlers::capital::get_capital_balance,
        crate::handlers::capital::get_order_money_report,
        crate::handlers::capital::get_shipping_provider_load,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            OrderMoneyTotals,
            ProviderLoad,
            DateRange,
            crate::handlers::expenses::CreateExpenseRequest,
            crate::handlers::expenses::UpdateExpenseRequest,
            crate::handlers::expenses::ExpenseResponse,
            crate::handlers::expenses::CreateExpenseCategoryRequest,
            crate::handlers::expenses::UpdateExpenseCategoryRequest,
            crate::handlers::expenses::ExpenseCategoryResponse,
            crate::handlers::orders::CreateOrderRequest,
            crate::handlers::orders::UpdateOrderRequest,
            crate::handlers::orders::OrderResponse,
            crate::handlers::baskets::CreateBasketRequest,
            crate::handlers::baskets::UpdateBasketRequest,
            crate::handlers::baskets::BasketResponse,
            crate::handlers::customers::CreateCustomerRequest,
            crate::handlers::customers::UpdateCustomerRequest,
            crate::handlers::customers::CustomerResponse,
            crate::handlers::providers::CreateShippingProviderRequest,
            crate::handlers::providers::UpdateShippingProviderRequest,
            crate::handlers::providers::ShippingProviderResponse,
            crate::handlers::providers::CreateDeliveryProviderRequest,
            crate::handlers::providers::UpdateDeliveryProviderRequest,
            crate::handlers::providers::DeliveryProviderResponse,
            crate::handlers::providers::CreateShippingSourceRequest,
            crate::handlers::providers::UpdateShippingSourceRequest,
            crate::handlers::providers::ShippingSourceResponse,
            crate::handlers::employees::CreateEmployeeRequest,
            crate::handlers::employees::UpdateEmployeeRequest,
            crate::handlers::employees::EmployeeResponse,
            crate::handlers::capital::CapitalResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "expenses", description = "Expense and expense category endpoints"),
        (name = "orders", description = "Customer order endpoints"),
        (name = "baskets", description = "Order basket endpoints"),
        (name = "customers", description = "Customer endpoints"),
        (name = "providers", description = "Shipping and delivery provider endpoints"),
        (name = "employees", description = "Employee endpoints"),
        (name = "capital", description = "Capital balance and report endpoints"),
    ),
    info(
        title = "Reship API",
        description = "Reshipping back office - orders, baskets, expenses and a reconciled capital ledger",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
