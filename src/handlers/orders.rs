use crate::schemas::{ledger_status, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use common::ApiResponse;
use ledger::orders::{self, NewOrder, OrderChanges};
use model::entities::order::{self, OrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use utoipa::ToSchema;

/// Request body for placing a new order
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Price of the ordered goods
    pub total_price: Decimal,
    /// Number of items in the order
    pub number_of_items: i32,
    /// Link to the ordered items
    pub items_link: Option<String>,
    /// Delivery cost paid to the delivery provider
    pub delivery_charge: Option<Decimal>,
    /// Delivery fee charged to the customer
    pub customer_delivery_charge: Option<Decimal>,
    /// When the order was placed
    pub ordered_at: Option<NaiveDateTime>,
    /// Whether the customer has already paid the total price
    pub has_received_price: Option<bool>,
    /// External bill identifier
    pub bill_id: Option<String>,
    /// Order status (defaults to pending)
    #[schema(value_type = Option<String>)]
    pub status: Option<OrderStatus>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Owning customer ID
    pub customer_id: i32,
    /// Owning basket ID
    pub order_basket_id: i32,
    /// Delivery provider ID
    pub delivery_provider_id: Option<i32>,
}

/// Request body for updating an order
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateOrderRequest {
    /// Price of the ordered goods
    pub total_price: Option<Decimal>,
    /// Number of items in the order
    pub number_of_items: Option<i32>,
    /// Link to the ordered items
    pub items_link: Option<String>,
    /// Delivery cost paid to the delivery provider
    pub delivery_charge: Option<Decimal>,
    /// Delivery fee charged to the customer
    pub customer_delivery_charge: Option<Decimal>,
    /// When the order was placed
    pub ordered_at: Option<NaiveDateTime>,
    /// When the order was delivered
    pub delivered_at: Option<NaiveDateTime>,
    /// Whether the customer has paid the total price
    pub has_received_price: Option<bool>,
    /// External bill identifier
    pub bill_id: Option<String>,
    /// Order status
    #[schema(value_type = Option<String>)]
    pub status: Option<OrderStatus>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Owning customer ID
    pub customer_id: Option<i32>,
    /// Owning basket ID
    pub order_basket_id: Option<i32>,
    /// Delivery provider ID
    pub delivery_provider_id: Option<i32>,
}

/// Order response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub total_price: Decimal,
    pub number_of_items: i32,
    pub items_link: Option<String>,
    pub delivery_charge: Option<Decimal>,
    pub customer_delivery_charge: Option<Decimal>,
    pub ordered_at: Option<NaiveDateTime>,
    pub delivered_at: Option<NaiveDateTime>,
    pub has_received_price: bool,
    pub bill_id: Option<String>,
    #[schema(value_type = String)]
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub customer_id: i32,
    pub order_basket_id: i32,
    pub delivery_provider_id: Option<i32>,
}

impl From<order::Model> for OrderResponse {
    fn from(model: order::Model) -> Self {
        Self {
            id: model.id,
            total_price: model.total_price,
            number_of_items: model.number_of_items,
            items_link: model.items_link,
            delivery_charge: model.delivery_charge,
            customer_delivery_charge: model.customer_delivery_charge,
            ordered_at: model.ordered_at,
            delivered_at: model.delivered_at,
            has_received_price: model.has_received_price,
            bill_id: model.bill_id,
            status: model.status,
            notes: model.notes,
            customer_id: model.customer_id,
            order_basket_id: model.order_basket_id,
            delivery_provider_id: model.delivery_provider_id,
        }
    }
}

/// Place a new order
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed successfully", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Customer, basket or provider not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), StatusCode> {
    let input = NewOrder {
        total_price: request.total_price,
        number_of_items: request.number_of_items,
        items_link: request.items_link,
        delivery_charge: request.delivery_charge,
        customer_delivery_charge: request.customer_delivery_charge,
        ordered_at: request.ordered_at,
        has_received_price: request.has_received_price.unwrap_or(false),
        bill_id: request.bill_id,
        status: request.status.unwrap_or_default(),
        notes: request.notes,
        customer_id: request.customer_id,
        order_basket_id: request.order_basket_id,
        delivery_provider_id: request.delivery_provider_id,
    };

    match orders::create_order(&state.db, input).await {
        Ok(model) => {
            info!("Order created with ID: {}", model.id);
            let response = ApiResponse {
                data: OrderResponse::from(model),
                message: "Order created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => {
            error!("Failed to create order: {}", e);
            Err(ledger_status(&e))
        }
    }
}

/// Get all orders
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "orders",
    responses(
        (status = 200, description = "Orders retrieved successfully", body = ApiResponse<Vec<OrderResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_orders(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, StatusCode> {
    match orders::list_orders(&state.db).await {
        Ok(models) => {
            let response = ApiResponse {
                data: models.into_iter().map(OrderResponse::from).collect(),
                message: "Orders retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to retrieve orders: {}", e);
            Err(ledger_status(&e))
        }
    }
}

/// Get a specific order by ID
#[utoipa::path(
    get,
    path = "/api/v1/orders/{order_id}",
    tag = "orders",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
    ),
    responses(
        (status = 200, description = "Order retrieved successfully", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_order(
    Path(order_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<OrderResponse>>, StatusCode> {
    match orders::get_order(&state.db, order_id).await {
        Ok(model) => {
            let response = ApiResponse {
                data: OrderResponse::from(model),
                message: "Order retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to retrieve order {}: {}", order_id, e);
            Err(ledger_status(&e))
        }
    }
}

/// Update an order
#[utoipa::path(
    put,
    path = "/api/v1/orders/{order_id}",
    tag = "orders",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated successfully", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_order(
    Path(order_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, StatusCode> {
    let changes = OrderChanges {
        total_price: request.total_price,
        number_of_items: request.number_of_items,
        items_link: request.items_link,
        delivery_charge: request.delivery_charge,
        customer_delivery_charge: request.customer_delivery_charge,
        ordered_at: request.ordered_at,
        delivered_at: request.delivered_at,
        has_received_price: request.has_received_price,
        bill_id: request.bill_id,
        status: request.status,
        notes: request.notes,
        customer_id: request.customer_id,
        order_basket_id: request.order_basket_id,
        delivery_provider_id: request.delivery_provider_id,
    };

    match orders::update_order(&state.db, order_id, changes).await {
        Ok(model) => {
            info!("Order {} updated", order_id);
            let response = ApiResponse {
                data: OrderResponse::from(model),
                message: "Order updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to update order {}: {}", order_id, e);
            Err(ledger_status(&e))
        }
    }
}

/// Soft-delete an order
#[utoipa::path(
    delete,
    path = "/api/v1/orders/{order_id}",
    tag = "orders",
    params(
        ("order_id" = i32, Path, description = "Order ID"),
    ),
    responses(
        (status = 200, description = "Order deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_order(
    Path(order_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match orders::delete_order(&state.db, order_id).await {
        Ok(()) => {
            info!("Order {} deleted", order_id);
            let response = ApiResponse {
                data: format!("Order {} deleted", order_id),
                message: "Order deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to delete order {}: {}", order_id, e);
            Err(ledger_status(&e))
        }
    }
}
