//! Breed view

use core_kernel::BreedId;
use serde::{Deserialize, Serialize};

use crate::breed::Breed;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedView {
    pub id: BreedId,
    pub name: String,
}

impl From<Breed> for BreedView {
    fn from(breed: Breed) -> Self {
        Self {
            id: breed.id,
            name: breed.name,
        }
    }
}
