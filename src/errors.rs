use thiserror::Error;

use crate::external::resolver::ResolverError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Resolver error: {0}")]
    Resolver(#[from] ResolverError),
}
