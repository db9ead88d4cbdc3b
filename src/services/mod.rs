//! Page loading and action handling behind the HTTP routes.

use thiserror::Error;

use crate::query::QueryError;
use crate::reports::ReportError;
use crate::repository::errors::RepositoryError;

pub mod customer_groups;
pub mod customers;
pub mod list;
pub mod orders;
pub mod reports;
pub mod sales_channels;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("invalid query string: {0}")]
    Query(#[from] QueryError),

    #[error("backend error: {0}")]
    Backend(RepositoryError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Backend(other),
        }
    }
}
