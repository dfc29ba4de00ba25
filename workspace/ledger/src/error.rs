use thiserror::Error;

/// Error types for the ledger operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The entity does not exist or is soft-deleted.
    ///
    /// Updates read their pre-image with a row lock inside the operation's
    /// transaction, so an entity that vanished concurrently surfaces here and
    /// the whole operation rolls back; the balance is never adjusted against
    /// a guessed pre-image.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// Rejected input; surfaced before any reconciliation is attempted.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Type alias for Result with LedgerError
pub type Result<T> = std::result::Result<T, LedgerError>;
