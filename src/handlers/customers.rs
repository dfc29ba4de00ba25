use crate::schemas::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use common::ApiResponse;
use model::entities::customer;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

/// Request body for creating a new customer
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCustomerRequest {
    /// Customer full name
    pub full_name: String,
    /// Contact phone number
    pub phone_number: Option<String>,
    /// Delivery address
    pub address: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Request body for updating a customer
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateCustomerRequest {
    /// Customer full name
    pub full_name: Option<String>,
    /// Contact phone number
    pub phone_number: Option<String>,
    /// Delivery address
    pub address: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Customer response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i32,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    /// Loyalty points accrued from order price growth
    pub points: i64,
}

impl From<customer::Model> for CustomerResponse {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            phone_number: model.phone_number,
            address: model.address,
            email: model.email,
            notes: model.notes,
            points: model.points,
        }
    }
}

/// Create a new customer
#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created successfully", body = ApiResponse<CustomerResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerResponse>>), StatusCode> {
    let now = Utc::now().naive_utc();
    let new_customer = customer::ActiveModel {
        full_name: Set(request.full_name),
        phone_number: Set(request.phone_number),
        address: Set(request.address),
        email: Set(request.email),
        notes: Set(request.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_customer.insert(&state.db).await {
        Ok(model) => {
            info!("Customer created with ID: {}", model.id);
            let response = ApiResponse {
                data: CustomerResponse::from(model),
                message: "Customer created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create customer: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all customers
#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "customers",
    responses(
        (status = 200, description = "Customers retrieved successfully", body = ApiResponse<Vec<CustomerResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_customers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CustomerResponse>>>, StatusCode> {
    match customer::Entity::find()
        .filter(customer::Column::DeletedAt.is_null())
        .order_by_asc(customer::Column::FullName)
        .all(&state.db)
        .await
    {
        Ok(models) => {
            let response = ApiResponse {
                data: models.into_iter().map(CustomerResponse::from).collect(),
                message: "Customers retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve customers: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific customer by ID
#[utoipa::path(
    get,
    path = "/api/v1/customers/{customer_id}",
    tag = "customers",
    params(
        ("customer_id" = i32, Path, description = "Customer ID"),
    ),
    responses(
        (status = 200, description = "Customer retrieved successfully", body = ApiResponse<CustomerResponse>),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_customer(
    Path(customer_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CustomerResponse>>, StatusCode> {
    match customer::Entity::find_by_id(customer_id)
        .filter(customer::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => {
            let response = ApiResponse {
                data: CustomerResponse::from(model),
                message: "Customer retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Customer with ID {} not found", customer_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve customer {}: {}", customer_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a customer
#[utoipa::path(
    put,
    path = "/api/v1/customers/{customer_id}",
    tag = "customers",
    params(
        ("customer_id" = i32, Path, description = "Customer ID"),
    ),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated successfully", body = ApiResponse<CustomerResponse>),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_customer(
    Path(customer_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerResponse>>, StatusCode> {
    let existing = match customer::Entity::find_by_id(customer_id)
        .filter(customer::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Customer with ID {} not found for update", customer_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup customer {}: {}", customer_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: customer::ActiveModel = existing.into();
    if let Some(full_name) = request.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(phone_number) = request.phone_number {
        active.phone_number = Set(Some(phone_number));
    }
    if let Some(address) = request.address {
        active.address = Set(Some(address));
    }
    if let Some(email) = request.email {
        active.email = Set(Some(email));
    }
    if let Some(notes) = request.notes {
        active.notes = Set(Some(notes));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    match active.update(&state.db).await {
        Ok(model) => {
            info!("Customer {} updated", customer_id);
            let response = ApiResponse {
                data: CustomerResponse::from(model),
                message: "Customer updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update customer {}: {}", customer_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Soft-delete a customer
#[utoipa::path(
    delete,
    path = "/api/v1/customers/{customer_id}",
    tag = "customers",
    params(
        ("customer_id" = i32, Path, description = "Customer ID"),
    ),
    responses(
        (status = 200, description = "Customer deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_customer(
    Path(customer_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    let existing = match customer::Entity::find_by_id(customer_id)
        .filter(customer::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Customer with ID {} not found for deletion", customer_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup customer {}: {}", customer_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: customer::ActiveModel = existing.into();
    active.deleted_at = Set(Some(Utc::now().naive_utc()));
    active.updated_at = Set(Utc::now().naive_utc());

    match active.update(&state.db).await {
        Ok(_) => {
            info!("Customer {} deleted", customer_id);
            let response = ApiResponse {
                data: format!("Customer {} deleted", customer_id),
                message: "Customer deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to delete customer {}: {}", customer_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
