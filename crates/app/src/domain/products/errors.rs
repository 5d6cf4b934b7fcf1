//! Products service errors.

use kasir::products::ValidationError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid data")]
    InvalidData,

    #[error("product store unavailable")]
    Unavailable(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl ProductsServiceError {
    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<Error> for ProductsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => return Self::NotFound,
            Error::PoolTimedOut | Error::PoolClosed | Error::Io(_) => {
                return Self::Unavailable(error);
            }
            _ => {}
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            ProductsServiceError::from(Error::RowNotFound),
            ProductsServiceError::NotFound
        ));
    }

    #[test]
    fn connection_failures_are_transient() {
        let timed_out = ProductsServiceError::from(Error::PoolTimedOut);
        let io = ProductsServiceError::from(Error::Io(io::Error::from(
            io::ErrorKind::ConnectionRefused,
        )));

        assert!(timed_out.is_transient());
        assert!(io.is_transient());
    }

    #[test]
    fn other_errors_are_not_transient() {
        let error = ProductsServiceError::from(Error::ColumnNotFound("price".to_string()));

        assert!(matches!(error, ProductsServiceError::Sql(_)));
        assert!(!error.is_transient());
        assert!(!ProductsServiceError::NotFound.is_transient());
    }
}
