//! Cattery services
//!
//! Services sit between the handlers and the repository ports. They own two
//! translations and nothing else:
//!
//! - repository absence (`None` / `false`) becomes
//!   [`CatteryError::KittenNotFound`]
//! - stored records become view schemas
//!
//! Store errors pass through as [`CatteryError::Store`].

use std::sync::Arc;

use core_kernel::{BreedId, HealthCheckResult, KittenId};
use tracing::debug;

use crate::error::CatteryError;
use crate::ports::{BreedRepository, KittenRepository};
use crate::schemas::{BreedView, KittenCreate, KittenPatch, KittenUpdate, KittenView};

/// Service for kitten CRUD
///
/// Cheap to clone; clones share the repository.
#[derive(Clone)]
pub struct KittenService {
    repository: Arc<dyn KittenRepository>,
}

impl KittenService {
    /// Creates a kitten service over the given repository
    pub fn new(repository: Arc<dyn KittenRepository>) -> Self {
        Self { repository }
    }

    /// Lists kittens, optionally only those of one breed
    pub async fn list_kittens(
        &self,
        breed_id: Option<BreedId>,
    ) -> Result<Vec<KittenView>, CatteryError> {
        let kittens = self.repository.list(breed_id).await?;
        debug!(count = kittens.len(), ?breed_id, "Listed kittens");
        Ok(kittens.into_iter().map(KittenView::from).collect())
    }

    /// Gets one kitten
    ///
    /// # Errors
    ///
    /// [`CatteryError::KittenNotFound`] if no kitten has this id
    pub async fn get_kitten(&self, id: KittenId) -> Result<KittenView, CatteryError> {
        self.repository
            .get_by_id(id)
            .await?
            .map(KittenView::from)
            .ok_or_else(|| CatteryError::kitten_not_found(id))
    }

    /// Creates a kitten
    pub async fn create_kitten(&self, kitten: KittenCreate) -> Result<KittenView, CatteryError> {
        let created = self.repository.create(kitten.into_fields()).await?;
        Ok(created.into())
    }

    /// Replaces every field of a kitten
    pub async fn update_kitten(
        &self,
        id: KittenId,
        kitten: KittenUpdate,
    ) -> Result<KittenView, CatteryError> {
        self.repository
            .full_update(id, kitten.into_fields())
            .await?
            .map(KittenView::from)
            .ok_or_else(|| CatteryError::kitten_not_found(id))
    }

    /// Overwrites only the fields present in the patch
    pub async fn patch_kitten(
        &self,
        id: KittenId,
        patch: KittenPatch,
    ) -> Result<KittenView, CatteryError> {
        self.repository
            .partial_update(id, patch.into_changes())
            .await?
            .map(KittenView::from)
            .ok_or_else(|| CatteryError::kitten_not_found(id))
    }

    /// Deletes a kitten
    ///
    /// # Errors
    ///
    /// [`CatteryError::KittenNotFound`] if there was nothing to delete
    pub async fn delete_kitten(&self, id: KittenId) -> Result<(), CatteryError> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(CatteryError::kitten_not_found(id))
        }
    }

    /// Reports whether the backing store answers
    pub async fn health_check(&self) -> HealthCheckResult {
        self.repository.health_check().await
    }
}

/// Service for listing breeds
#[derive(Clone)]
pub struct BreedService {
    repository: Arc<dyn BreedRepository>,
}

impl BreedService {
    pub fn new(repository: Arc<dyn BreedRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_breeds(&self) -> Result<Vec<BreedView>, CatteryError> {
        let breeds = self.repository.list_all().await?;
        Ok(breeds.into_iter().map(BreedView::from).collect())
    }
}
