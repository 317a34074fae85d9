use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Adapter capability not available: {0}")]
    NotAvailable(String),

    #[error("Library store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, AdapterError>;
