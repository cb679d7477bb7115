//! Breed records

use core_kernel::BreedId;
use serde::{Deserialize, Serialize};

/// A breed row
///
/// Breeds are inserted directly into the store; the service layer only
/// lists them. The `kittens` back-reference is derived from the foreign key
/// and never materialized here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breed {
    pub id: BreedId,
    /// Unique across all breeds
    pub name: String,
}

impl Breed {
    pub fn new(id: BreedId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
