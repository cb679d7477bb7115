//! Ports and Adapters Infrastructure
//!
//! The domain crate defines repository port traits; the database crate and
//! the in-memory test store implement them. Everything that crosses a port
//! fails with [`PortError`], so callers never see driver-specific errors.
//!
//! ```text
//!   services (domain_cattery)
//!            │
//!            ▼
//!   KittenRepository / BreedRepository   (port traits)
//!        ▲                     ▲
//!        │                     │
//!   PostgreSQL (infra_db)   in-memory (mock feature)
//! ```
//!
//! Absence is not an error at this boundary: lookups return `Option` and
//! deletes return `bool`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// A write referenced a row that does not exist in the parent table
    #[error("Foreign key violation: {detail}")]
    ForeignKeyViolation {
        constraint: Option<String>,
        detail: String,
    },

    /// A write collided with a unique constraint
    #[error("Unique violation: {detail}")]
    UniqueViolation {
        constraint: Option<String>,
        detail: String,
    },

    /// Any other integrity constraint (not null, check) rejected the write
    #[error("Integrity violation: {message}")]
    Integrity {
        message: String,
    },

    /// Connection to the underlying store failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a ForeignKeyViolation error carrying the store's detail text
    pub fn foreign_key(detail: impl Into<String>) -> Self {
        PortError::ForeignKeyViolation {
            constraint: None,
            detail: detail.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if a related row was missing
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, PortError::ForeignKeyViolation { .. })
    }

    /// Returns true for any constraint-level rejection
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            PortError::ForeignKeyViolation { .. }
                | PortError::UniqueViolation { .. }
                | PortError::Integrity { .. }
        )
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared across request tasks behind `Arc<dyn ...>`.
pub trait DomainPort: Send + Sync + 'static {}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Returns true when the adapter reported itself operational
    pub fn is_healthy(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    async fn health_check(&self) -> HealthCheckResult;
}
