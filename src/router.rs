use crate::handlers::{
    baskets::{
        create_basket, delete_basket, get_basket, get_basket_orders, get_baskets, update_basket,
    },
    capital::{get_capital_balance, get_order_money_report, get_shipping_provider_load},
    customers::{
        create_customer, delete_customer, get_customer, get_customers, update_customer,
    },
    employees::{
        create_employee, delete_employee, get_employee, get_employees, update_employee,
    },
    expenses::{
        create_expense, create_expense_category, delete_expense, delete_expense_category,
        get_expense, get_expense_categories, get_expense_category, get_expenses, update_expense,
        update_expense_category,
    },
    health::health_check,
    orders::{create_order, delete_order, get_order, get_orders, update_order},
    providers::{
        create_delivery_provider, create_shipping_provider, create_shipping_source,
        delete_delivery_provider, delete_shipping_provider, delete_shipping_source,
        get_delivery_provider, get_delivery_providers, get_shipping_provider,
        get_shipping_providers, get_shipping_source, get_shipping_sources,
        update_delivery_provider, update_shipping_provider, update_shipping_source,
    },
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Expense routes
        .route("/api/v1/expenses", post(create_expense))
        .route("/api/v1/expenses", get(get_expenses))
        .route("/api/v1/expenses/:expense_id", get(get_expense))
        .route("/api/v1/expenses/:expense_id", put(update_expense))
        .route("/api/v1/expenses/:expense_id", delete(delete_expense))
        .route("/api/v1/expense-categories", post(create_expense_category))
        .route("/api/v1/expense-categories", get(get_expense_categories))
        .route(
            "/api/v1/expense-categories/:category_id",
            get(get_expense_category),
        )
        .route(
            "/api/v1/expense-categories/:category_id",
            put(update_expense_category),
        )
        .route(
            "/api/v1/expense-categories/:category_id",
            delete(delete_expense_category),
        )
        // Order routes
        .route("/api/v1/orders", post(create_order))
        .route("/api/v1/orders", get(get_orders))
        .route("/api/v1/orders/:order_id", get(get_order))
        .route("/api/v1/orders/:order_id", put(update_order))
        .route("/api/v1/orders/:order_id", delete(delete_order))
        // Basket routes
        .route("/api/v1/baskets", post(create_basket))
        .route("/api/v1/baskets", get(get_baskets))
        .route("/api/v1/baskets/:basket_id", get(get_basket))
        .route("/api/v1/baskets/:basket_id", put(update_basket))
        .route("/api/v1/baskets/:basket_id", delete(delete_basket))
        .route("/api/v1/baskets/:basket_id/orders", get(get_basket_orders))
        // Customer routes
        .route("/api/v1/customers", post(create_customer))
        .route("/api/v1/customers", get(get_customers))
        .route("/api/v1/customers/:customer_id", get(get_customer))
        .route("/api/v1/customers/:customer_id", put(update_customer))
        .route("/api/v1/customers/:customer_id", delete(delete_customer))
        // Shipping provider routes
        .route("/api/v1/shipping-providers", post(create_shipping_provider))
        .route("/api/v1/shipping-providers", get(get_shipping_providers))
        .route(
            "/api/v1/shipping-providers/:provider_id",
            get(get_shipping_provider),
        )
        .route(
            "/api/v1/shipping-providers/:provider_id",
            put(update_shipping_provider),
        )
        .route(
            "/api/v1/shipping-providers/:provider_id",
            delete(delete_shipping_provider),
        )
        // Delivery provider routes
        .route("/api/v1/delivery-providers", post(create_delivery_provider))
        .route("/api/v1/delivery-providers", get(get_delivery_providers))
        .route(
            "/api/v1/delivery-providers/:provider_id",
            get(get_delivery_provider),
        )
        .route(
            "/api/v1/delivery-providers/:provider_id",
            put(update_delivery_provider),
        )
        .route(
            "/api/v1/delivery-providers/:provider_id",
            delete(delete_delivery_provider),
        )
        // Shipping source routes
        .route("/api/v1/shipping-sources", post(create_shipping_source))
        .route("/api/v1/shipping-sources", get(get_shipping_sources))
        .route(
            "/api/v1/shipping-sources/:source_id",
            get(get_shipping_source),
        )
        .route(
            "/api/v1/shipping-sources/:source_id",
            put(update_shipping_source),
        )
        .route(
            "/api/v1/shipping-sources/:source_id",
            delete(delete_shipping_source),
        )
        // Employee routes
        .route("/api/v1/employees", post(create_employee))
        .route("/api/v1/employees", get(get_employees))
        .route("/api/v1/employees/:employee_id", get(get_employee))
        .route("/api/v1/employees/:employee_id", put(update_employee))
        .route("/api/v1/employees/:employee_id", delete(delete_employee))
        // Capital and reports
        .route("/api/v1/capital", get(get_capital_balance))
        .route("/api/v1/reports/order-money", get(get_order_money_report))
        .route(
            "/api/v1/reports/shipping-provider-load",
            get(get_shipping_provider_load),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
