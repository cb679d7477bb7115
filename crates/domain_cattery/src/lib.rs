//! Cattery Domain
//!
//! This crate holds everything between the HTTP surface and the store:
//!
//! - **Models**: [`Breed`] and [`Kitten`] as read back from the store, with
//!   the kitten's owning breed always resolved
//! - **Schemas**: the create, full-update, partial-update and view shapes
//!   that cross the wire
//! - **Ports**: the [`KittenRepository`] and [`BreedRepository`] traits that
//!   storage adapters implement
//! - **Services**: [`KittenService`] and [`BreedService`], which turn
//!   repository absence into [`CatteryError::KittenNotFound`] and records
//!   into views
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_cattery::{KittenService, KittenCreate};
//!
//! let service = KittenService::new(Arc::new(repository));
//! let view = service.create_kitten(KittenCreate {
//!     color: "black".to_string(),
//!     age: 1,
//!     description: "Fluffy".to_string(),
//!     breed_id: breed.id,
//! }).await?;
//! assert_eq!(view.breed.id, breed.id);
//! ```

pub mod breed;
pub mod kitten;
pub mod schemas;
pub mod error;
pub mod ports;
pub mod services;

pub use breed::Breed;
pub use kitten::{Kitten, KittenFields, KittenChanges};
pub use schemas::{
    BreedView, KittenCreate, KittenUpdate, KittenPatch, KittenView, Patch,
};
pub use error::CatteryError;
pub use ports::{KittenRepository, BreedRepository};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryCattery;
pub use services::{KittenService, BreedService};
