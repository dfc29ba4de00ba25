use crate::schemas::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use common::ApiResponse;
use model::entities::employee;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

/// Request body for creating a new employee
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateEmployeeRequest {
    /// Employee full name
    pub full_name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone number
    pub phone_number: Option<String>,
    /// Monthly salary (informational; payouts are booked as expenses)
    pub salary: Decimal,
}

/// Request body for updating an employee
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateEmployeeRequest {
    /// Employee full name
    pub full_name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone number
    pub phone_number: Option<String>,
    /// Monthly salary
    pub salary: Option<Decimal>,
}

/// Employee response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub salary: Decimal,
}

impl From<employee::Model> for EmployeeResponse {
    fn from(model: employee::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            phone_number: model.phone_number,
            salary: model.salary,
        }
    }
}

/// Create a new employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    tag = "employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created successfully", body = ApiResponse<EmployeeResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EmployeeResponse>>), StatusCode> {
    let now = Utc::now().naive_utc();
    let new_employee = employee::ActiveModel {
        full_name: Set(request.full_name),
        email: Set(request.email),
        phone_number: Set(request.phone_number),
        salary: Set(request.salary),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_employee.insert(&state.db).await {
        Ok(model) => {
            info!("Employee created with ID: {}", model.id);
            let response = ApiResponse {
                data: EmployeeResponse::from(model),
                message: "Employee created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create employee: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all employees
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    tag = "employees",
    responses(
        (status = 200, description = "Employees retrieved successfully", body = ApiResponse<Vec<EmployeeResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_employees(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<EmployeeResponse>>>, StatusCode> {
    match employee::Entity::find()
        .filter(employee::Column::DeletedAt.is_null())
        .order_by_asc(employee::Column::FullName)
        .all(&state.db)
        .await
    {
        Ok(models) => {
            let response = ApiResponse {
                data: models.into_iter().map(EmployeeResponse::from).collect(),
                message: "Employees retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve employees: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    tag = "employees",
    params(
        ("employee_id" = i32, Path, description = "Employee ID"),
    ),
    responses(
        (status = 200, description = "Employee retrieved successfully", body = ApiResponse<EmployeeResponse>),
        (status = 404, description = "Employee not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_employee(
    Path(employee_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, StatusCode> {
    match employee::Entity::find_by_id(employee_id)
        .filter(employee::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => {
            let response = ApiResponse {
                data: EmployeeResponse::from(model),
                message: "Employee retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Employee with ID {} not found", employee_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve employee {}: {}", employee_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update an employee
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}",
    tag = "employees",
    params(
        ("employee_id" = i32, Path, description = "Employee ID"),
    ),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated successfully", body = ApiResponse<EmployeeResponse>),
        (status = 404, description = "Employee not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_employee(
    Path(employee_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, StatusCode> {
    let existing = match employee::Entity::find_by_id(employee_id)
        .filter(employee::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Employee with ID {} not found for update", employee_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup employee {}: {}", employee_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: employee::ActiveModel = existing.into();
    if let Some(full_name) = request.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(email) = request.email {
        active.email = Set(Some(email));
    }
    if let Some(phone_number) = request.phone_number {
        active.phone_number = Set(Some(phone_number));
    }
    if let Some(salary) = request.salary {
        active.salary = Set(salary);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    match active.update(&state.db).await {
        Ok(model) => {
            info!("Employee {} updated", employee_id);
            let response = ApiResponse {
                data: EmployeeResponse::from(model),
                message: "Employee updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update employee {}: {}", employee_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Soft-delete an employee
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{employee_id}",
    tag = "employees",
    params(
        ("employee_id" = i32, Path, description = "Employee ID"),
    ),
    responses(
        (status = 200, description = "Employee deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Employee not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_employee(
    Path(employee_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    let existing = match employee::Entity::find_by_id(employee_id)
        .filter(employee::Column::DeletedAt.is_null())
        .one(&state.db)
        .await
    {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Employee with ID {} not found for deletion", employee_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup employee {}: {}", employee_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut active: employee::ActiveModel = existing.into();
    active.deleted_at = Set(Some(Utc::now().naive_utc()));
    active.updated_at = Set(Utc::now().naive_utc());

    match active.update(&state.db).await {
        Ok(_) => {
            info!("Employee {} deleted", employee_id);
            let response = ApiResponse {
                data: format!("Employee {} deleted", employee_id),
                message: "Employee deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to delete employee {}: {}", employee_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
