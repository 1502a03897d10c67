//! Shared Diesel/pool error mapping for persistence adapters.
//!
//! Every repository distinguishes only two failure shapes at its port:
//! connection problems (checkout, closed connections) and query problems
//! (everything else). This module centralises that translation so adapters
//! stay thin.

use tracing::debug;

use super::pool::PoolError;

/// Implemented by port error enums that split into connection/query.
pub(crate) trait PersistenceFailure {
    /// Wrap connection-level diagnostics.
    fn connection_failure(message: String) -> Self;
    /// Wrap query-level diagnostics.
    fn query_failure(message: String) -> Self;
}

macro_rules! persistence_failure {
    ($error:ty) => {
        impl crate::outbound::persistence::diesel_error_mapping::PersistenceFailure for $error {
            fn connection_failure(message: String) -> Self {
                Self::connection(message)
            }

            fn query_failure(message: String) -> Self {
                Self::query(message)
            }
        }
    };
}

persistence_failure!(crate::domain::ports::AttributePersistenceError);
persistence_failure!(crate::domain::ports::UserPersistenceError);
persistence_failure!(crate::domain::ports::CatalogPersistenceError);
persistence_failure!(crate::domain::ports::OrderPersistenceError);

/// Map pool checkout/build failures to a port error.
pub(crate) fn map_pool_error<E: PersistenceFailure>(error: PoolError) -> E {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => {
            E::connection_failure(message)
        }
    }
}

/// Map Diesel execution failures to a port error.
pub(crate) fn map_diesel_error<E: PersistenceFailure>(error: diesel::result::Error) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");

    match error {
        DieselError::NotFound => E::query_failure("record not found".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            E::connection_failure(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => E::query_failure(info.message().to_owned()),
        other => E::query_failure(other.to_string()),
    }
}
