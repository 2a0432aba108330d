use thiserror::Error;

use crate::repository::RepositoryError;

pub mod blog;
pub mod categories;
pub mod contact;
pub mod main;
pub mod products;
pub mod search;

/// Errors surfaced by the service layer to route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Form(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
