//! Common transport-layer types shared between the ledger crate and the HTTP
//! handlers. These are plain data shapes with no persistence logic attached.

mod reports;

pub use reports::{DateRange, OrderMoneyTotals, ProviderLoad};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}
