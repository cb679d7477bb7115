//! Kitten records and the field sets used to write them
//!
//! A [`Kitten`] is what the store hands back: the row plus its resolved
//! [`Breed`]. Writes go through two shapes:
//!
//! - [`KittenFields`]: every writable column, used for inserts and full
//!   replacement
//! - [`KittenChanges`]: only the columns a caller supplied, used for partial
//!   updates
//!
//! Repositories apply whatever they receive unconditionally. Deciding which
//! fields are present is the job of the request schemas.

use core_kernel::{BreedId, KittenId};
use serde::{Deserialize, Serialize};

use crate::breed::Breed;

/// A kitten row with its owning breed loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kitten {
    pub id: KittenId,
    pub color: String,
    pub age: i32,
    pub description: String,
    pub breed_id: BreedId,
    pub breed: Breed,
}

impl Kitten {
    /// Returns the writable columns of this kitten
    pub fn fields(&self) -> KittenFields {
        KittenFields {
            color: self.color.clone(),
            age: self.age,
            description: self.description.clone(),
            breed_id: self.breed_id,
        }
    }
}

/// The complete set of writable kitten columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KittenFields {
    pub color: String,
    pub age: i32,
    pub description: String,
    pub breed_id: BreedId,
}

/// A sparse set of kitten columns to overwrite
///
/// `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KittenChanges {
    pub color: Option<String>,
    pub age: Option<i32>,
    pub description: Option<String>,
    pub breed_id: Option<BreedId>,
}

impl KittenChanges {
    /// Returns true when no column would change
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.age.is_none()
            && self.description.is_none()
            && self.breed_id.is_none()
    }

    /// Overwrites the supplied columns of `fields` in place
    pub fn apply_to(self, fields: &mut KittenFields) {
        if let Some(color) = self.color {
            fields.color = color;
        }
        if let Some(age) = self.age {
            fields.age = age;
        }
        if let Some(description) = self.description {
            fields.description = description;
        }
        if let Some(breed_id) = self.breed_id {
            fields.breed_id = breed_id;
        }
    }
}

impl From<KittenFields> for KittenChanges {
    fn from(fields: KittenFields) -> Self {
        Self {
            color: Some(fields.color),
            age: Some(fields.age),
            description: Some(fields.description),
            breed_id: Some(fields.breed_id),
        }
    }
}
