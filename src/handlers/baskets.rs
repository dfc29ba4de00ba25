use crate::handlers::orders::OrderResponse;
use crate::schemas::{ledger_status, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use common::ApiResponse;
use ledger::baskets::{self, NewOrderBasket, OrderBasketChanges};
use ledger::orders;
use model::entities::order_basket::{self, OrderBasketStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use utoipa::ToSchema;

/// Request body for opening a new basket
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateBasketRequest {
    /// Combined price of the goods in the basket
    pub total_price: Decimal,
    /// Amount already paid for the goods
    pub total_paid_price: Option<Decimal>,
    /// Number of items in the basket
    pub number_of_items: i32,
    /// Link to the item manifest
    pub items_link: Option<String>,
    /// Declared weight of the basket
    pub items_weight: Option<Decimal>,
    /// Freight cost paid to the shipping provider
    pub shipping_charge: Option<Decimal>,
    /// When the basket was shipped
    pub shipped_at: Option<NaiveDateTime>,
    /// Basket status (defaults to shipping)
    #[schema(value_type = Option<String>)]
    pub status: Option<OrderBasketStatus>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Shipping provider ID
    pub shipping_provider_id: i32,
    /// Shipping source ID
    pub shipping_source_id: Option<i32>,
}

/// Request body for updating a basket
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateBasketRequest {
    /// Combined price of the goods in the basket
    pub total_price: Option<Decimal>,
    /// Amount already paid for the goods
    pub total_paid_price: Option<Decimal>,
    /// Number of items in the basket
    pub number_of_items: Option<i32>,
    /// Link to the item manifest
    pub items_link: Option<String>,
    /// Declared weight of the basket
    pub items_weight: Option<Decimal>,
    /// Freight cost paid to the shipping provider
    pub shipping_charge: Option<Decimal>,
    /// When the basket was shipped
    pub shipped_at: Option<NaiveDateTime>,
    /// When the basket arrived
    pub received_at: Option<NaiveDateTime>,
    /// Basket status
    #[schema(value_type = Option<String>)]
    pub status: Option<OrderBasketStatus>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Shipping provider ID
    pub shipping_provider_id: Option<i32>,
    /// Shipping source ID
    pub shipping_source_id: Option<i32>,
}

/// Basket response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BasketResponse {
    pub id: i32,
    pub total_price: Decimal,
    pub total_paid_price: Option<Decimal>,
    pub number_of_items: i32,
    pub items_link: Option<String>,
    pub items_weight: Option<Decimal>,
    pub shipping_charge: Option<Decimal>,
    pub shipped_at: Option<NaiveDateTime>,
    pub received_at: Option<NaiveDateTime>,
    #[schema(value_type = String)]
    pub status: OrderBasketStatus,
    pub notes: Option<String>,
    pub shipping_provider_id: i32,
    pub shipping_source_id: Option<i32>,
}

impl From<order_basket::Model> for BasketResponse {
    fn from(model: order_basket::Model) -> Self {
        Self {
            id: model.id,
            total_price: model.total_price,
            total_paid_price: model.total_paid_price,
            number_of_items: model.number_of_items,
            items_link: model.items_link,
            items_weight: model.items_weight,
            shipping_charge: model.shipping_charge,
            shipped_at: model.shipped_at,
            received_at: model.received_at,
            status: model.status,
            notes: model.notes,
            shipping_provider_id: model.shipping_provider_id,
            shipping_source_id: model.shipping_source_id,
        }
    }
}

/// Open a new basket
#[utoipa::path(
    post,
    path = "/api/v1/baskets",
    tag = "baskets",
    request_body = CreateBasketRequest,
    responses(
        (status = 201, description = "Basket opened successfully", body = ApiResponse<BasketResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Shipping provider not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_basket(
    State(state): State<AppState>,
    Json(request): Json<CreateBasketRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BasketResponse>>), StatusCode> {
    let input = NewOrderBasket {
        total_price: request.total_price,
        total_paid_price: request.total_paid_price,
        number_of_items: request.number_of_items,
        items_link: request.items_link,
        items_weight: request.items_weight,
        shipping_charge: request.shipping_charge,
        shipped_at: request.shipped_at,
        status: request.status.unwrap_or_default(),
        notes: request.notes,
        shipping_provider_id: request.shipping_provider_id,
        shipping_source_id: request.shipping_source_id,
    };

    match baskets::create_order_basket(&state.db, input).await {
        Ok(model) => {
            info!("Basket created with ID: {}", model.id);
            let response = ApiResponse {
                data: BasketResponse::from(model),
                message: "Basket created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => {
            error!("Failed to create basket: {}", e);
            Err(ledger_status(&e))
        }
    }
}

/// Get all baskets
#[utoipa::path(
    get,
    path = "/api/v1/baskets",
    tag = "baskets",
    responses(
        (status = 200, description = "Baskets retrieved successfully", body = ApiResponse<Vec<BasketResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_baskets(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BasketResponse>>>, StatusCode> {
    match baskets::list_order_baskets(&state.db).await {
        Ok(models) => {
            let response = ApiResponse {
                data: models.into_iter().map(BasketResponse::from).collect(),
                message: "Baskets retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to retrieve baskets: {}", e);
            Err(ledger_status(&e))
        }
    }
}

/// Get a specific basket by ID
#[utoipa::path(
    get,
    path = "/api/v1/baskets/{basket_id}",
    tag = "baskets",
    params(
        ("basket_id" = i32, Path, description = "Basket ID"),
    ),
    responses(
        (status = 200, description = "Basket retrieved successfully", body = ApiResponse<BasketResponse>),
        (status = 404, description = "Basket not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_basket(
    Path(basket_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BasketResponse>>, StatusCode> {
    match baskets::get_order_basket(&state.db, basket_id).await {
        Ok(model) => {
            let response = ApiResponse {
                data: BasketResponse::from(model),
                message: "Basket retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to retrieve basket {}: {}", basket_id, e);
            Err(ledger_status(&e))
        }
    }
}

/// Update a basket
#[utoipa::path(
    put,
    path = "/api/v1/baskets/{basket_id}",
    tag = "baskets",
    params(
        ("basket_id" = i32, Path, description = "Basket ID"),
    ),
    request_body = UpdateBasketRequest,
    responses(
        (status = 200, description = "Basket updated successfully", body = ApiResponse<BasketResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Basket not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_basket(
    Path(basket_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateBasketRequest>,
) -> Result<Json<ApiResponse<BasketResponse>>, StatusCode> {
    let changes = OrderBasketChanges {
        total_price: request.total_price,
        total_paid_price: request.total_paid_price,
        number_of_items: request.number_of_items,
        items_link: request.items_link,
        items_weight: request.items_weight,
        shipping_charge: request.shipping_charge,
        shipped_at: request.shipped_at,
        received_at: request.received_at,
        status: request.status,
        notes: request.notes,
        shipping_provider_id: request.shipping_provider_id,
        shipping_source_id: request.shipping_source_id,
    };

    match baskets::update_order_basket(&state.db, basket_id, changes).await {
        Ok(model) => {
            info!("Basket {} updated", basket_id);
            let response = ApiResponse {
                data: BasketResponse::from(model),
                message: "Basket updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to update basket {}: {}", basket_id, e);
            Err(ledger_status(&e))
        }
    }
}

/// Soft-delete a basket
#[utoipa::path(
    delete,
    path = "/api/v1/baskets/{basket_id}",
    tag = "baskets",
    params(
        ("basket_id" = i32, Path, description = "Basket ID"),
    ),
    responses(
        (status = 200, description = "Basket deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Basket not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_basket(
    Path(basket_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match baskets::delete_order_basket(&state.db, basket_id).await {
        Ok(()) => {
            info!("Basket {} deleted", basket_id);
            let response = ApiResponse {
                data: format!("Basket {} deleted", basket_id),
                message: "Basket deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to delete basket {}: {}", basket_id, e);
            Err(ledger_status(&e))
        }
    }
}

/// Get the live orders of one basket
#[utoipa::path(
    get,
    path = "/api/v1/baskets/{basket_id}/orders",
    tag = "baskets",
    params(
        ("basket_id" = i32, Path, description = "Basket ID"),
    ),
    responses(
        (status = 200, description = "Basket orders retrieved successfully", body = ApiResponse<Vec<OrderResponse>>),
        (status = 404, description = "Basket not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_basket_orders(
    Path(basket_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OrderResponse>>>, StatusCode> {
    // 404 for a missing basket rather than an empty list.
    if let Err(e) = baskets::get_order_basket(&state.db, basket_id).await {
        error!("Failed to retrieve basket {}: {}", basket_id, e);
        return Err(ledger_status(&e));
    }

    match orders::list_basket_orders(&state.db, basket_id).await {
        Ok(models) => {
            let response = ApiResponse {
                data: models.into_iter().map(OrderResponse::from).collect(),
                message: "Basket orders retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to retrieve orders of basket {}: {}", basket_id, e);
            Err(ledger_status(&e))
        }
    }
}
