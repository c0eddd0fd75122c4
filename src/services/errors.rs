use thiserror::Error;

use crate::domain::errors::ValidationError;
use crate::repository::RepositoryError;
use crate::transfer::TransferError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by the service layer to the command line.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
}
