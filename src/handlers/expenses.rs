use crate::schemas::{ledger_status, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use common::ApiResponse;
use ledger::expenses::{self, ExpenseChanges, NewExpense};
use model::entities::{expense, expense_category};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use utoipa::ToSchema;

/// Request body for booking a new expense
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateExpenseRequest {
    /// Expense name
    pub name: String,
    /// Amount of money spent (must be positive)
    pub amount: Decimal,
    /// Date the expense occurred
    pub date: Option<NaiveDate>,
    /// Expense category ID
    pub category_id: Option<i32>,
    /// Free-form description
    pub description: Option<String>,
}

/// Request body for updating an expense
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateExpenseRequest {
    /// Expense name
    pub name: Option<String>,
    /// Amount of money spent (must be positive)
    pub amount: Option<Decimal>,
    /// Date the expense occurred
    pub date: Option<NaiveDate>,
    /// Expense category ID
    pub category_id: Option<i32>,
    /// Free-form description
    pub description: Option<String>,
}

/// Expense response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    pub id: i32,
    pub name: String,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub category_id: Option<i32>,
    pub description: Option<String>,
}

impl From<expense::Model> for ExpenseResponse {
    fn from(model: expense::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            amount: model.amount,
            date: model.date,
            category_id: model.category_id,
            description: model.description,
        }
    }
}

/// Request body for creating an expense category
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateExpenseCategoryRequest {
    /// Category name (unique)
    pub name: String,
    /// Category description
    pub description: Option<String>,
}

/// Request body for updating an expense category
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateExpenseCategoryRequest {
    /// Category name (unique)
    pub name: Option<String>,
    /// Category description
    pub description: Option<String>,
}

/// Expense category response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseCategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<expense_category::Model> for ExpenseCategoryResponse {
    fn from(model: expense_category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

/// Book a new expense
#[utoipa::path(
    post,
    path = "/api/v1/expenses",
    tag = "expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense booked successfully", body = ApiResponse<ExpenseResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseResponse>>), StatusCode> {
    let input = NewExpense {
        name: request.name,
        amount: request.amount,
        date: request.date,
        category_id: request.category_id,
        description: request.description,
    };

    match expenses::create_expense(&state.db, input).await {
        Ok(model) => {
            info!("Expense created with ID: {}", model.id);
            let response = ApiResponse {
                data: ExpenseResponse::from(model),
                message: "Expense created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => {
            error!("Failed to create expense: {}", e);
            Err(ledger_status(&e))
        }
    }
}

/// Get all expenses
#[utoipa::path(
    get,
    path = "/api/v1/expenses",
    tag = "expenses",
    responses(
        (status = 200, description = "Expenses retrieved successfully", body = ApiResponse<Vec<ExpenseResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_expenses(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ExpenseResponse>>>, StatusCode> {
    match expenses::list_expenses(&state.db).await {
        Ok(models) => {
            let response = ApiResponse {
                data: models.into_iter().map(ExpenseResponse::from).collect(),
                message: "Expenses retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to retrieve expenses: {}", e);
            Err(ledger_status(&e))
        }
    }
}

/// Get a specific expense by ID
#[utoipa::path(
    get,
    path = "/api/v1/expenses/{expense_id}",
    tag = "expenses",
    params(
        ("expense_id" = i32, Path, description = "Expense ID"),
    ),
    responses(
        (status = 200, description = "Expense retrieved successfully", body = ApiResponse<ExpenseResponse>),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_expense(
    Path(expense_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, StatusCode> {
    match expenses::get_expense(&state.db, expense_id).await {
        Ok(model) => {
            let response = ApiResponse {
                data: ExpenseResponse::from(model),
                message: "Expense retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to retrieve expense {}: {}", expense_id, e);
            Err(ledger_status(&e))
        }
    }
}

/// Update an expense
#[utoipa::path(
    put,
    path = "/api/v1/expenses/{expense_id}",
    tag = "expenses",
    params(
        ("expense_id" = i32, Path, description = "Expense ID"),
    ),
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Expense updated successfully", body = ApiResponse<ExpenseResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_expense(
    Path(expense_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, StatusCode> {
    let changes = ExpenseChanges {
        name: request.name,
        amount: request.amount,
        date: request.date,
        category_id: request.category_id,
        description: request.description,
    };

    match expenses::update_expense(&state.db, expense_id, changes).await {
        Ok(model) => {
            info!("Expense {} updated", expense_id);
            let response = ApiResponse {
                data: ExpenseResponse::from(model),
                message: "Expense updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to update expense {}: {}", expense_id, e);
            Err(ledger_status(&e))
        }
    }
}

/// Soft-delete an expense
#[utoipa::path(
    delete,
    path = "/api/v1/expenses/{expense_id}",
    tag = "expenses",
    params(
        ("expense_id" = i32, Path, description = "Expense ID"),
    ),
    responses(
        (status = 200, description = "Expense deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_expense(
    Path(expense_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match expenses::delete_expense(&state.db, expense_id).await {
        Ok(()) => {
            info!("Expense {} deleted", expense_id);
            let response = ApiResponse {
                data: format!("Expense {} deleted", expense_id),
                message: "Expense deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to delete expense {}: {}", expense_id, e);
            Err(ledger_status(&e))
        }
    }
}

/// Create an expense category
#[utoipa::path(
    post,
    path = "/api/v1/expense-categories",
    tag = "expenses",
    request_body = CreateExpenseCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<ExpenseCategoryResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_expense_category(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseCategoryResponse>>), StatusCode> {
    match expenses::create_expense_category(&state.db, request.name, request.description).await {
        Ok(model) => {
            info!("Expense category created with ID: {}", model.id);
            let response = ApiResponse {
                data: ExpenseCategoryResponse::from(model),
                message: "Expense category created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => {
            error!("Failed to create expense category: {}", e);
            Err(ledger_status(&e))
        }
    }
}

/// Get a specific expense category by ID
#[utoipa::path(
    get,
    path = "/api/v1/expense-categories/{category_id}",
    tag = "expenses",
    params(
        ("category_id" = i32, Path, description = "Expense category ID"),
    ),
    responses(
        (status = 200, description = "Category retrieved successfully", body = ApiResponse<ExpenseCategoryResponse>),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_expense_category(
    Path(category_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ExpenseCategoryResponse>>, StatusCode> {
    match expenses::get_expense_category(&state.db, category_id).await {
        Ok(model) => {
            let response = ApiResponse {
                data: ExpenseCategoryResponse::from(model),
                message: "Expense category retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to retrieve expense category {}: {}", category_id, e);
            Err(ledger_status(&e))
        }
    }
}

/// Update an expense category
#[utoipa::path(
    put,
    path = "/api/v1/expense-categories/{category_id}",
    tag = "expenses",
    params(
        ("category_id" = i32, Path, description = "Expense category ID"),
    ),
    request_body = UpdateExpenseCategoryRequest,
    responses(
        (status = 200, description = "Category updated successfully", body = ApiResponse<ExpenseCategoryResponse>),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_expense_category(
    Path(category_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateExpenseCategoryRequest>,
) -> Result<Json<ApiResponse<ExpenseCategoryResponse>>, StatusCode> {
    match expenses::update_expense_category(&state.db, category_id, request.name, request.description)
        .await
    {
        Ok(model) => {
            info!("Expense category {} updated", category_id);
            let response = ApiResponse {
                data: ExpenseCategoryResponse::from(model),
                message: "Expense category updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to update expense category {}: {}", category_id, e);
            Err(ledger_status(&e))
        }
    }
}

/// Soft-delete an expense category
#[utoipa::path(
    delete,
    path = "/api/v1/expense-categories/{category_id}",
    tag = "expenses",
    params(
        ("category_id" = i32, Path, description = "Expense category ID"),
    ),
    responses(
        (status = 200, description = "Category deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_expense_category(
    Path(category_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match expenses::delete_expense_category(&state.db, category_id).await {
        Ok(()) => {
            info!("Expense category {} deleted", category_id);
            let response = ApiResponse {
                data: format!("Expense category {} deleted", category_id),
                message: "Expense category deleted successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to delete expense category {}: {}", category_id, e);
            Err(ledger_status(&e))
        }
    }
}

/// Get all expense categories
#[utoipa::path(
    get,
    path = "/api/v1/expense-categories",
    tag = "expenses",
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<Vec<ExpenseCategoryResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_expense_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ExpenseCategoryResponse>>>, StatusCode> {
    match expenses::list_expense_categories(&state.db).await {
        Ok(models) => {
            let response = ApiResponse {
                data: models
                    .into_iter()
                    .map(ExpenseCategoryResponse::from)
                    .collect(),
                message: "Expense categories retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to retrieve expense categories: {}", e);
            Err(ledger_status(&e))
        }
    }
}
