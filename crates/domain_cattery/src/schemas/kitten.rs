//! Kitten request and view schemas

use std::borrow::Cow;

use core_kernel::{BreedId, KittenId};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::kitten::{Kitten, KittenChanges, KittenFields};
use crate::schemas::breed::BreedView;
use crate::schemas::patch::Patch;

/// Body of `POST /kittens/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct KittenCreate {
    #[validate(length(min = 1, message = "color must not be empty"))]
    pub color: String,
    #[validate(range(min = 0, message = "age must not be negative"))]
    pub age: i32,
    pub description: String,
    #[serde(alias = "breed_id")]
    pub breed_id: BreedId,
}

impl KittenCreate {
    pub fn into_fields(self) -> KittenFields {
        KittenFields {
            color: self.color,
            age: self.age,
            description: self.description,
            breed_id: self.breed_id,
        }
    }
}

/// Body of `PUT /kittens/{id}`
///
/// Every field is required and every field is overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct KittenUpdate {
    #[validate(length(min = 1, message = "color must not be empty"))]
    pub color: String,
    #[validate(range(min = 0, message = "age must not be negative"))]
    pub age: i32,
    pub description: String,
    #[serde(alias = "breed_id")]
    pub breed_id: BreedId,
}

impl KittenUpdate {
    pub fn into_fields(self) -> KittenFields {
        KittenFields {
            color: self.color,
            age: self.age,
            description: self.description,
            breed_id: self.breed_id,
        }
    }
}

/// Body of `PATCH /kittens/{id}`
///
/// Keys left out of the payload stay [`Patch::Unset`] and are not written.
/// Every kitten column is NOT NULL, so an explicit `null` fails validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KittenPatch {
    #[serde(default)]
    pub color: Patch<String>,
    #[serde(default)]
    pub age: Patch<i32>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default, alias = "breed_id")]
    pub breed_id: Patch<BreedId>,
}

impl KittenPatch {
    /// Keeps only the supplied fields
    ///
    /// Call [`Validate::validate`] first; a `null` that slipped through is
    /// treated like a missing key.
    pub fn into_changes(self) -> KittenChanges {
        KittenChanges {
            color: self.color.into_value(),
            age: self.age.into_value(),
            description: self.description.into_value(),
            breed_id: self.breed_id.into_value(),
        }
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn reject_null<T>(errors: &mut ValidationErrors, field: &'static str, value: &Patch<T>) {
    if value.is_null() {
        errors.add(field, field_error("null", "field may not be null"));
    }
}

impl Validate for KittenPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        reject_null(&mut errors, "color", &self.color);
        reject_null(&mut errors, "age", &self.age);
        reject_null(&mut errors, "description", &self.description);
        reject_null(&mut errors, "breedId", &self.breed_id);

        if matches!(self.color.as_value(), Some(color) if color.is_empty()) {
            errors.add("color", field_error("length", "color must not be empty"));
        }
        if matches!(self.age.as_value(), Some(age) if *age < 0) {
            errors.add("age", field_error("range", "age must not be negative"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A kitten as returned by the API, with its breed resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KittenView {
    pub id: KittenId,
    pub color: String,
    pub age: i32,
    pub description: String,
    #[serde(alias = "breed_id")]
    pub breed_id: BreedId,
    pub breed: BreedView,
}

impl From<Kitten> for KittenView {
    fn from(kitten: Kitten) -> Self {
        Self {
            id: kitten.id,
            color: kitten.color,
            age: kitten.age,
            description: kitten.description,
            breed_id: kitten.breed_id,
            breed: kitten.breed.into(),
        }
    }
}
