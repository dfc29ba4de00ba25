//! CRUD for the three partner directories: shipping providers (freight),
//! delivery providers (last mile) and shipping sources (origin warehouses).
//! None of these touch the capital ledger.

use crate::schemas::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use common::ApiResponse;
use model::entities::{delivery_provider, shipping_provider, shipping_source};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

/// Request body for creating a shipping provider
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateShippingProviderRequest {
    /// Provider name
    pub name: String,
    /// Contact phone number
    pub phone_number: String,
    /// Quoted freight price per kilogram
    pub price_per_kg: Decimal,
    /// Provider address
    pub address: String,
}

/// Request body for updating a shipping provider
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateShippingProviderRequest {
    /// Provider name
    pub name: Option<String>,
    /// Contact phone number
    pub phone_number: Option<String>,
    /// Quoted freight price per kilogram
    pub price_per_kg: Option<Decimal>,
    /// Provider address
    pub address: Option<String>,
}

/// Shipping provider response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShippingProviderResponse {
    pub id: i32,
    pub name: String,
    pub phone_number: String,
    pub price_per_kg: Decimal,
    pub address: String,
    /// Loyalty points accrued from basket weight
    pub points: i64,
}

impl From<shipping_provider::Model> for ShippingProviderResponse {
    fn from(model: shipping_provider::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone_number: model.phone_number,
            price_per_kg: model.price_per_kg,
            address: model.address,
            points: model.points,
        }
    }
}

/// Request body for creating a delivery provider
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateDeliveryProviderRequest {
    /// Provider name
    pub name: String,
    /// Contact phone number
    pub phone_number: String,
}

/// Request body for updating a delivery provider
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateDeliveryProviderRequest {
    /// Provider name
    pub name: Option<String>,
    /// Contact phone number
    pub phone_number: Option<String>,
}

/// Delivery provider response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeliveryProviderResponse {
    pub id: i32,
    pub name: String,
    pub phone_number: String,
    pub points: i64,
}

impl From<delivery_provider::Model> for DeliveryProviderResponse {
    fn from(model: delivery_provider::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone_number: model.phone_number,
            points: model.points,
        }
    }
}

/// Request body for creating a shipping source
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateShippingSourceRequest {
    /// Source name
    pub name: String,
    /// Warehouse address
    pub address: Option<String>,
}

/// Request body for updating a shipping source
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateShippingSourceRequest {
    /// Source name
    pub name: Option<String>,
    /// Warehouse address
    pub address: Option<String>,
}

/// Shipping source response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShippingSourceResponse {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
}

impl From<shipping_source::Model> for ShippingSourceResponse {
    fn from(model: shipping_source::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
        }
    }
}

/// Create a new shipping provider
#[utoipa::path(
    post,
    path = "/api/v1/shipping-providers",
    tag = "providers",
    request_body = CreateShippingProviderRequest,
    responses(
        (status = 201, description = "Shipping provider created successfully", body = ApiResponse<ShippingProviderResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_shipping_provider(
    State(state): State<AppState>,
    Json(request): Json<CreateShippingProviderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShippingProviderResponse>>), StatusCode> {
    let now = Utc::now().naive_utc();
    let new_provider = shipping_provider::ActiveModel {
        name: Set(request.name),
        phone_number: Set(request.phone_number),
        price_per_kg: Set(request.price_per_kg),
        address: Set(request.address),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_provider.insert(&state.db).await {
        Ok(model) => {
            info!("Shipping provider created with ID: {}", model.id);
            let response = ApiResponse {
                data: ShippingProviderResponse::from(model),
                message: "Shipping provider created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create shipping provider: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all shipping providers
#[utoipa::path(
    get,
    path = "/api/v1/shipping-providers",
    tag = "providers",
    responses(
        (status = 200, description = "Shipping providers retrieved successfully", body = ApiResponse<Vec<ShippingProviderResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_shipping_providers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ShippingProviderResponse>>>, StatusCode> {
    match shipping_provider::Entity::find()
        .filter(shipping_provider::Column::DeletedAt.is_null())
        .order_by_asc(shipping_provider::Column::Name)
        .all(&state.db)
        .await
    {
        Ok(models) => {
            let response = ApiResponse {
                data: models
                    .into_iter()
                    .map(ShippingProviderResponse::from)
                    .collect(),
                message: "Shipping providers retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve shipping providers: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific shipping provider by ID
#[utoipa::path(
    get,
    path = "/api/v1/shipping-providers/{provider_id}",
    tag = "providers",
    params(
        ("provider_id" = i32, Path, description = "Shipping provider ID"),
    ),
    responses(
        (status = 200, description = "Shipping provider retrieved successfully", body = ApiResponse<ShippingProviderResponse>),
        (status = 404, description = "Shipping provider not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_shipping_provider(
    Path(provider_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ShippingProviderResponse>>, StatusCode> {
    match shipping_provider::Entity::find_by_id(provider_id)
        .filter(shipping_provider::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => {
            let response = ApiResponse {
                data: ShippingProviderResponse::from(model),
                message: "Shipping provider retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Shipping provider with ID {} not found", provider_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve shipping provider {}: {}",
                provider_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a shipping provider
#[utoipa::path(
    put,
    path = "/api/v1/shipping-providers/{provider_id}",
    tag = "providers",
    params(
        ("provider_id" = i32, Path, description = "Shipping provider ID"),
    ),
    request_body = UpdateShippingProviderRequest,
    responses(
        (status = 200, description = "Shipping provider updated successfully", body = ApiResponse<ShippingProviderResponse>),
        (status = 404, description = "Shipping provider not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_shipping_provider(
    Path(provider_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateShippingProviderRequest>,
) -> Result<Json<ApiResponse<ShippingProviderResponse>>, StatusCode> {
    let existing = match shipping_provider::Entity::find_by_id(provider_id)
        .filter(shipping_provider::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Shipping provider with ID {} not found for update", provider_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup shipping provider {}: {}",
                provider_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: shipping_provider::ActiveModel = existing.into();
    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(phone_number) = request.phone_number {
        active.phone_number = Set(phone_number);
    }
    if let Some(price_per_kg) = request.price_per_kg {
        active.price_per_kg = Set(price_per_kg);
    }
    if let Some(address) = request.address {
        active.address = Set(address);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    match active.update(&state.db).await {
        Ok(model) => {
            info!("Shipping provider {} updated", provider_id);
            let response = ApiResponse {
                data: ShippingProviderResponse::from(model),
                message: "Shipping provider updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update shipping provider {}: {}",
                provider_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Soft-delete a shipping provider
#[utoipa::path(
    delete,
    path = "/api/v1/shipping-providers/{provider_id}",
    tag = "providers",
    params(
        ("provider_id" = i32, Path, description = "Shipping provider ID"),
    ),
    responses(
        (status = 200, description = "Shipping provider deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Shipping provider not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_shipping_provider(
    Path(provider_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    let existing = match shipping_provider::Entity::find_by_id(provider_id)
        .filter(shipping_provider::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!(
                "Shipping provider with ID {} not found for deletion",
                provider_id
            );
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup shipping provider {}: {}",
                provider_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: shipping_provider::ActiveModel = existing.into();
    active.deleted_at = Set(Some(Utc::now().naive_utc()));
    active.updated_at = Set(Utc::now().naive_utc());

    match active.update(&state.db).await {
        Ok(_) => {
            info!("Shipping provider {} deleted", provider_id);
            let response = ApiResponse {
                data: format!("Shipping provider {} deleted", provider_id),
                message: "Shipping provider deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to delete shipping provider {}: {}",
                provider_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Create a new delivery provider
#[utoipa::path(
    post,
    path = "/api/v1/delivery-providers",
    tag = "providers",
    request_body = CreateDeliveryProviderRequest,
    responses(
        (status = 201, description = "Delivery provider created successfully", body = ApiResponse<DeliveryProviderResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_delivery_provider(
    State(state): State<AppState>,
    Json(request): Json<CreateDeliveryProviderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DeliveryProviderResponse>>), StatusCode> {
    let now = Utc::now().naive_utc();
    let new_provider = delivery_provider::ActiveModel {
        name: Set(request.name),
        phone_number: Set(request.phone_number),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_provider.insert(&state.db).await {
        Ok(model) => {
            info!("Delivery provider created with ID: {}", model.id);
            let response = ApiResponse {
                data: DeliveryProviderResponse::from(model),
                message: "Delivery provider created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create delivery provider: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all delivery providers
#[utoipa::path(
    get,
    path = "/api/v1/delivery-providers",
    tag = "providers",
    responses(
        (status = 200, description = "Delivery providers retrieved successfully", body = ApiResponse<Vec<DeliveryProviderResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_delivery_providers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DeliveryProviderResponse>>>, StatusCode> {
    match delivery_provider::Entity::find()
        .filter(delivery_provider::Column::DeletedAt.is_null())
        .order_by_asc(delivery_provider::Column::Name)
        .all(&state.db)
        .await
    {
        Ok(models) => {
            let response = ApiResponse {
                data: models
                    .into_iter()
                    .map(DeliveryProviderResponse::from)
                    .collect(),
                message: "Delivery providers retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve delivery providers: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific delivery provider by ID
#[utoipa::path(
    get,
    path = "/api/v1/delivery-providers/{provider_id}",
    tag = "providers",
    params(
        ("provider_id" = i32, Path, description = "Delivery provider ID"),
    ),
    responses(
        (status = 200, description = "Delivery provider retrieved successfully", body = ApiResponse<DeliveryProviderResponse>),
        (status = 404, description = "Delivery provider not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_delivery_provider(
    Path(provider_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DeliveryProviderResponse>>, StatusCode> {
    match delivery_provider::Entity::find_by_id(provider_id)
        .filter(delivery_provider::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => {
            let response = ApiResponse {
                data: DeliveryProviderResponse::from(model),
                message: "Delivery provider retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Delivery provider with ID {} not found", provider_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve delivery provider {}: {}",
                provider_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a delivery provider
#[utoipa::path(
    put,
    path = "/api/v1/delivery-providers/{provider_id}",
    tag = "providers",
    params(
        ("provider_id" = i32, Path, description = "Delivery provider ID"),
    ),
    request_body = UpdateDeliveryProviderRequest,
    responses(
        (status = 200, description = "Delivery provider updated successfully", body = ApiResponse<DeliveryProviderResponse>),
        (status = 404, description = "Delivery provider not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_delivery_provider(
    Path(provider_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateDeliveryProviderRequest>,
) -> Result<Json<ApiResponse<DeliveryProviderResponse>>, StatusCode> {
    let existing = match delivery_provider::Entity::find_by_id(provider_id)
        .filter(delivery_provider::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Delivery provider with ID {} not found for update", provider_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup delivery provider {}: {}",
                provider_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: delivery_provider::ActiveModel = existing.into();
    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(phone_number) = request.phone_number {
        active.phone_number = Set(phone_number);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    match active.update(&state.db).await {
        Ok(model) => {
            info!("Delivery provider {} updated", provider_id);
            let response = ApiResponse {
                data: DeliveryProviderResponse::from(model),
                message: "Delivery provider updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update delivery provider {}: {}",
                provider_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Soft-delete a delivery provider
#[utoipa::path(
    delete,
    path = "/api/v1/delivery-providers/{provider_id}",
    tag = "providers",
    params(
        ("provider_id" = i32, Path, description = "Delivery provider ID"),
    ),
    responses(
        (status = 200, description = "Delivery provider deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Delivery provider not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_delivery_provider(
    Path(provider_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    let existing = match delivery_provider::Entity::find_by_id(provider_id)
        .filter(delivery_provider::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!(
                "Delivery provider with ID {} not found for deletion",
                provider_id
            );
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup delivery provider {}: {}",
                provider_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: delivery_provider::ActiveModel = existing.into();
    active.deleted_at = Set(Some(Utc::now().naive_utc()));
    active.updated_at = Set(Utc::now().naive_utc());

    match active.update(&state.db).await {
        Ok(_) => {
            info!("Delivery provider {} deleted", provider_id);
            let response = ApiResponse {
                data: format!("Delivery provider {} deleted", provider_id),
                message: "Delivery provider deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to delete delivery provider {}: {}",
                provider_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Create a new shipping source
#[utoipa::path(
    post,
    path = "/api/v1/shipping-sources",
    tag = "providers",
    request_body = CreateShippingSourceRequest,
    responses(
        (status = 201, description = "Shipping source created successfully", body = ApiResponse<ShippingSourceResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_shipping_source(
    State(state): State<AppState>,
    Json(request): Json<CreateShippingSourceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ShippingSourceResponse>>), StatusCode> {
    let now = Utc::now().naive_utc();
    let new_source = shipping_source::ActiveModel {
        name: Set(request.name),
        address: Set(request.address),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_source.insert(&state.db).await {
        Ok(model) => {
            info!("Shipping source created with ID: {}", model.id);
            let response = ApiResponse {
                data: ShippingSourceResponse::from(model),
                message: "Shipping source created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create shipping source: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific shipping source by ID
#[utoipa::path(
    get,
    path = "/api/v1/shipping-sources/{source_id}",
    tag = "providers",
    params(
        ("source_id" = i32, Path, description = "Shipping source ID"),
    ),
    responses(
        (status = 200, description = "Shipping source retrieved successfully", body = ApiResponse<ShippingSourceResponse>),
        (status = 404, description = "Shipping source not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_shipping_source(
    Path(source_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ShippingSourceResponse>>, StatusCode> {
    match shipping_source::Entity::find_by_id(source_id)
        .filter(shipping_source::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => {
            let response = ApiResponse {
                data: ShippingSourceResponse::from(model),
                message: "Shipping source retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Shipping source with ID {} not found", source_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve shipping source {}: {}",
                source_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a shipping source
#[utoipa::path(
    put,
    path = "/api/v1/shipping-sources/{source_id}",
    tag = "providers",
    params(
        ("source_id" = i32, Path, description = "Shipping source ID"),
    ),
    request_body = UpdateShippingSourceRequest,
    responses(
        (status = 200, description = "Shipping source updated successfully", body = ApiResponse<ShippingSourceResponse>),
        (status = 404, description = "Shipping source not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_shipping_source(
    Path(source_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateShippingSourceRequest>,
) -> Result<Json<ApiResponse<ShippingSourceResponse>>, StatusCode> {
    let existing = match shipping_source::Entity::find_by_id(source_id)
        .filter(shipping_source::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Shipping source with ID {} not found for update", source_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup shipping source {}: {}",
                source_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: shipping_source::ActiveModel = existing.into();
    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(address) = request.address {
        active.address = Set(Some(address));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    match active.update(&state.db).await {
        Ok(model) => {
            info!("Shipping source {} updated", source_id);
            let response = ApiResponse {
                data: ShippingSourceResponse::from(model),
                message: "Shipping source updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update shipping source {}: {}",
                source_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Soft-delete a shipping source
#[utoipa::path(
    delete,
    path = "/api/v1/shipping-sources/{source_id}",
    tag = "providers",
    params(
        ("source_id" = i32, Path, description = "Shipping source ID"),
    ),
    responses(
        (status = 200, description = "Shipping source deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Shipping source not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_shipping_source(
    Path(source_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    let existing = match shipping_source::Entity::find_by_id(source_id)
        .filter(shipping_source::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!(
                "Shipping source with ID {} not found for deletion",
                source_id
            );
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup shipping source {}: {}",
                source_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: shipping_source::ActiveModel = existing.into();
    active.deleted_at = Set(Some(Utc::now().naive_utc()));
    active.updated_at = Set(Utc::now().naive_utc());

    match active.update(&state.db).await {
        Ok(_) => {
            info!("Shipping source {} deleted", source_id);
            let response = ApiResponse {
                data: format!("Shipping source {} deleted", source_id),
                message: "Shipping source deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to delete shipping source {}: {}",
                source_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all shipping sources
#[utoipa::path(
    get,
    path = "/api/v1/shipping-sources",
    tag = "providers",
    responses(
        (status = 200, description = "Shipping sources retrieved successfully", body = ApiResponse<Vec<ShippingSourceResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_shipping_sources(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ShippingSourceResponse>>>, StatusCode> {
    match shipping_source::Entity::find()
        .filter(shipping_source::Column::DeletedAt.is_null())
        .order_by_asc(shipping_source::Column::Name)
        .all(&state.db)
        .await
    {
        Ok(models) => {
            let response = ApiResponse {
                data: models
                    .into_iter()
                    .map(ShippingSourceResponse::from)
                    .collect(),
                message: "Shipping sources retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve shipping sources: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
