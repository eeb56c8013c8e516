// Error types shared across the catalog core
use thiserror::Error;

// Every variant is recoverable: a failed operation leaves the ledger,
// favorites set, and session state untouched.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found in catalog: {0}")]
    NotFound(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    // Shorthand used by the catalog store and booking flow
    pub fn not_found(id: u64) -> Self {
        AppError::NotFound(format!("property {}", id))
    }
}
