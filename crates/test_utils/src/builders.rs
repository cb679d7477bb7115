//! Test Data Builders
//!
//! Provides a builder for kitten payloads. Tests set only the fields they
//! care about; the rest default to the black, one-year-old "Fluffy".

use core_kernel::BreedId;
use domain_cattery::{KittenCreate, KittenFields};
use serde_json::{json, Value};

/// Builder for kitten test data
#[derive(Debug, Clone)]
pub struct KittenBuilder {
    color: String,
    age: i32,
    description: String,
    breed_id: BreedId,
}

impl KittenBuilder {
    /// Creates a builder for a kitten of the given breed
    pub fn new(breed_id: BreedId) -> Self {
        Self {
            color: "black".to_string(),
            age: 1,
            description: "Fluffy".to_string(),
            breed_id,
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.age = age;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn breed(mut self, breed_id: BreedId) -> Self {
        self.breed_id = breed_id;
        self
    }

    /// Builds the repository-level field set
    pub fn fields(&self) -> KittenFields {
        KittenFields {
            color: self.color.clone(),
            age: self.age,
            description: self.description.clone(),
            breed_id: self.breed_id,
        }
    }

    /// Builds the create schema
    pub fn create(&self) -> KittenCreate {
        KittenCreate {
            color: self.color.clone(),
            age: self.age,
            description: self.description.clone(),
            breed_id: self.breed_id,
        }
    }

    /// Builds the camelCase JSON body the API expects
    pub fn json(&self) -> Value {
        json!({
            "color": self.color,
            "age": self.age,
            "description": self.description,
            "breedId": self.breed_id,
        })
    }
}
