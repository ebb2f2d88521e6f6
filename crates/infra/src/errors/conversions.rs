//! Conversions from external infrastructure errors into domain errors.

use curricula_domain::CurriculaError;
use r2d2::Error as PoolError;
use rusqlite::Error as SqlError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CurriculaError);

impl From<InfraError> for CurriculaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CurriculaError> for InfraError {
    fn from(value: CurriculaError) -> Self {
        InfraError(value)
    }
}

trait IntoCurriculaError {
    fn into_curricula(self) -> CurriculaError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → CurriculaError */
/* -------------------------------------------------------------------------- */

impl IntoCurriculaError for SqlError {
    fn into_curricula(self) -> CurriculaError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        CurriculaError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        CurriculaError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 1555 | 2067) => {
                        CurriculaError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        CurriculaError::Database("foreign key constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 275) => {
                        CurriculaError::InvalidInput(format!("check constraint failed: {message}"))
                    }
                    _ => CurriculaError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => CurriculaError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                CurriculaError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                CurriculaError::Database(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => CurriculaError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => CurriculaError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_curricula())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → CurriculaError */
/* -------------------------------------------------------------------------- */

impl IntoCurriculaError for PoolError {
    fn into_curricula(self) -> CurriculaError {
        CurriculaError::Database(format!("connection pool error: {self}"))
    }
}

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        InfraError(value.into_curricula())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → CurriculaError */
/* -------------------------------------------------------------------------- */

impl IntoCurriculaError for JoinError {
    fn into_curricula(self) -> CurriculaError {
        if self.is_cancelled() {
            CurriculaError::Internal("blocking database task cancelled".into())
        } else {
            CurriculaError::Internal(format!("blocking database task failed: {self}"))
        }
    }
}

impl From<JoinError> for InfraError {
    fn from(value: JoinError) -> Self {
        InfraError(value.into_curricula())
    }
}

/// Shorthand used by repositories inside blocking closures.
pub(crate) fn map_sql_error(err: SqlError) -> CurriculaError {
    CurriculaError::from(InfraError::from(err))
}

pub(crate) fn map_join_error(err: JoinError) -> CurriculaError {
    CurriculaError::from(InfraError::from(err))
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
