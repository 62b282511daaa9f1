//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use storefront::order_numbers::AllocationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("no order numbers left")]
    OrderNumbersExhausted,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<AllocationError<Error>> for OrdersServiceError {
    fn from(error: AllocationError<Error>) -> Self {
        match error {
            AllocationError::Exhausted { .. } => Self::OrderNumbersExhausted,
            AllocationError::Registry(error) => error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_allocation_is_reported_as_such() {
        let error = OrdersServiceError::from(AllocationError::Exhausted { attempts: 20 });

        assert!(matches!(error, OrdersServiceError::OrderNumbersExhausted));
    }

    #[test]
    fn registry_failures_map_like_storage_errors() {
        let error = OrdersServiceError::from(AllocationError::Registry(Error::RowNotFound));

        assert!(matches!(error, OrdersServiceError::NotFound));
    }
}
