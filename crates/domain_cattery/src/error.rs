//! Cattery domain errors

use core_kernel::{KittenId, PortError};
use thiserror::Error;

/// Errors surfaced by the cattery services
///
/// Store failures are carried through untouched so the API boundary can
/// decide how to present them.
#[derive(Debug, Error)]
pub enum CatteryError {
    /// No kitten with the given id exists
    #[error("Kitten not found")]
    KittenNotFound(KittenId),

    /// The repository failed
    #[error(transparent)]
    Store(#[from] PortError),
}

impl CatteryError {
    /// Creates a KittenNotFound error
    pub fn kitten_not_found(id: KittenId) -> Self {
        CatteryError::KittenNotFound(id)
    }

    /// Checks if this error indicates a missing kitten
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatteryError::KittenNotFound(_))
    }
}
