//! Database error types
//!
//! Driver errors are classified by PostgreSQL SQLSTATE so that constraint
//! violations keep their identity (and the server's DETAIL text) on the way
//! up to the API boundary.

use core_kernel::PortError;
use sqlx::postgres::PgDatabaseError;
use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {detail}")]
    DuplicateEntry {
        constraint: Option<String>,
        detail: String,
    },

    /// Foreign key constraint violation
    #[error("Foreign key violation: {detail}")]
    ForeignKeyViolation {
        constraint: Option<String>,
        detail: String,
    },

    /// Not-null or check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry { .. }
                | DatabaseError::ForeignKeyViolation { .. }
                | DatabaseError::ConstraintViolation(_)
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Pulls the DETAIL section out of a rendered PostgreSQL error
///
/// Used when the structured field is unavailable, e.g. for errors that were
/// already flattened into text.
pub fn detail_from_message(message: &str) -> Option<&str> {
    message
        .split_once("DETAIL:")
        .map(|(_, detail)| detail.trim())
        .filter(|detail| !detail.is_empty())
}

fn constraint_detail(db_err: &(dyn sqlx::error::DatabaseError + 'static)) -> String {
    db_err
        .try_downcast_ref::<PgDatabaseError>()
        .and_then(|pg| pg.detail())
        .or_else(|| detail_from_message(db_err.message()))
        .unwrap_or_else(|| db_err.message())
        .to_string()
}

/// Converts SQLx errors to more specific DatabaseError variants
///
/// See <https://www.postgresql.org/docs/current/errcodes-appendix.html>.
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed => {
                DatabaseError::ConnectionFailed(error.to_string())
            }
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().map(str::to_string);
                match db_err.code().as_deref() {
                    Some("23505") => DatabaseError::DuplicateEntry {
                        constraint,
                        detail: constraint_detail(&**db_err),
                    },
                    Some("23503") => DatabaseError::ForeignKeyViolation {
                        constraint,
                        detail: constraint_detail(&**db_err),
                    },
                    Some("23502") | Some("23514") => {
                        DatabaseError::ConstraintViolation(db_err.message().to_string())
                    }
                    _ => DatabaseError::QueryFailed(db_err.message().to_string()),
                }
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationFailed(error.to_string())
    }
}

impl From<DatabaseError> for PortError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::ForeignKeyViolation { constraint, detail } => {
                PortError::ForeignKeyViolation { constraint, detail }
            }
            DatabaseError::DuplicateEntry { constraint, detail } => {
                PortError::UniqueViolation { constraint, detail }
            }
            DatabaseError::ConstraintViolation(message) => PortError::Integrity { message },
            e @ (DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted) => {
                PortError::connection(e.to_string())
            }
            other => PortError::Internal {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}
