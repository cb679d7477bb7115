//! Cattery Repository Ports
//!
//! The services talk to storage only through these traits. Two adapters
//! implement them:
//!
//! - **PostgreSQL**: `infra_db::repositories`, used by the server binary
//! - **In-memory**: [`mock::InMemoryCattery`], behind the `mock` feature,
//!   used by service and API tests
//!
//! # Absence
//!
//! Repositories never fail with "not found". A missing row is `Ok(None)` from
//! lookups and updates and `Ok(false)` from deletes; the service decides what
//! absence means to its caller.
//!
//! # Transactions
//!
//! Each mutating call is one atomic unit: load or miss, apply the change,
//! write, re-read the breed relation, commit. Nothing spans two calls.

use async_trait::async_trait;

use core_kernel::{BreedId, DomainPort, HealthCheckable, KittenId, PortError};

use crate::breed::Breed;
use crate::kitten::{Kitten, KittenChanges, KittenFields};

/// Storage operations for kittens
///
/// Every returned [`Kitten`] has its breed resolved.
#[async_trait]
pub trait KittenRepository: DomainPort + HealthCheckable {
    /// Lists all kittens, optionally only those of one breed, ordered by id
    async fn list(&self, breed_id: Option<BreedId>) -> Result<Vec<Kitten>, PortError>;

    /// Loads one kitten
    async fn get_by_id(&self, id: KittenId) -> Result<Option<Kitten>, PortError>;

    /// Inserts a kitten
    ///
    /// Fails with [`PortError::ForeignKeyViolation`] when the breed is missing.
    async fn create(&self, fields: KittenFields) -> Result<Kitten, PortError>;

    /// Overwrites every column of an existing kitten
    async fn full_update(
        &self,
        id: KittenId,
        fields: KittenFields,
    ) -> Result<Option<Kitten>, PortError>;

    /// Overwrites only the supplied columns of an existing kitten
    async fn partial_update(
        &self,
        id: KittenId,
        changes: KittenChanges,
    ) -> Result<Option<Kitten>, PortError>;

    /// Deletes a kitten, returning whether it existed
    async fn delete(&self, id: KittenId) -> Result<bool, PortError>;
}

/// Storage operations for breeds
#[async_trait]
pub trait BreedRepository: DomainPort {
    /// Lists every breed ordered by id
    async fn list_all(&self) -> Result<Vec<Breed>, PortError>;
}

/// In-memory implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};

    #[derive(Debug, Default)]
    struct State {
        breeds: BTreeMap<BreedId, Breed>,
        kittens: BTreeMap<KittenId, KittenFields>,
        last_breed_id: i32,
        last_kitten_id: i32,
    }

    impl State {
        fn resolve(&self, id: KittenId, fields: &KittenFields) -> Result<Kitten, PortError> {
            let breed = self
                .breeds
                .get(&fields.breed_id)
                .cloned()
                .ok_or_else(|| missing_breed(fields.breed_id))?;

            Ok(Kitten {
                id,
                color: fields.color.clone(),
                age: fields.age,
                description: fields.description.clone(),
                breed_id: fields.breed_id,
                breed,
            })
        }

        fn check_breed(&self, breed_id: BreedId) -> Result<(), PortError> {
            if self.breeds.contains_key(&breed_id) {
                Ok(())
            } else {
                Err(missing_breed(breed_id))
            }
        }
    }

    /// Mirrors the detail PostgreSQL attaches to a kittens FK violation
    fn missing_breed(breed_id: BreedId) -> PortError {
        PortError::ForeignKeyViolation {
            constraint: Some("kittens_breed_id_fkey".to_string()),
            detail: format!(
                "Key (breed_id)=({}) is not present in table \"breeds\".",
                breed_id
            ),
        }
    }

    /// In-memory store implementing both repository ports
    ///
    /// Enforces the same constraints as the SQL schema: kittens must point at
    /// an existing breed and breed names are unique. Clones share state.
    #[derive(Debug, Clone, Default)]
    pub struct InMemoryCattery {
        state: Arc<RwLock<State>>,
        unavailable: Arc<AtomicBool>,
    }

    impl InMemoryCattery {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Inserts a breed directly, the way fixtures seed the database
        pub async fn insert_breed(&self, name: impl Into<String>) -> Result<Breed, PortError> {
            self.ensure_available()?;
            let name = name.into();
            let mut state = self.state.write().await;

            if state.breeds.values().any(|b| b.name == name) {
                return Err(PortError::UniqueViolation {
                    constraint: Some("ix_breeds_name".to_string()),
                    detail: format!("Key (name)=({}) already exists.", name),
                });
            }

            state.last_breed_id += 1;
            let breed = Breed::new(BreedId::new(state.last_breed_id), name);
            state.breeds.insert(breed.id, breed.clone());
            Ok(breed)
        }

        /// Makes every subsequent call fail as if the store were down
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        fn ensure_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                Err(PortError::connection("store unavailable"))
            } else {
                Ok(())
            }
        }

        async fn apply(
            &self,
            id: KittenId,
            changes: KittenChanges,
        ) -> Result<Option<Kitten>, PortError> {
            self.ensure_available()?;
            let mut state = self.state.write().await;

            let Some(current) = state.kittens.get(&id) else {
                return Ok(None);
            };

            let mut fields = current.clone();
            changes.apply_to(&mut fields);
            state.check_breed(fields.breed_id)?;

            let kitten = state.resolve(id, &fields)?;
            state.kittens.insert(id, fields);
            Ok(Some(kitten))
        }
    }

    impl DomainPort for InMemoryCattery {}

    #[async_trait]
    impl HealthCheckable for InMemoryCattery {
        async fn health_check(&self) -> HealthCheckResult {
            let (status, message) = match self.ensure_available() {
                Ok(()) => (AdapterHealth::Healthy, None),
                Err(e) => (AdapterHealth::Unhealthy, Some(e.to_string())),
            };

            HealthCheckResult {
                adapter_id: "in-memory-cattery".to_string(),
                status,
                latency_ms: 0,
                message,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl KittenRepository for InMemoryCattery {
        async fn list(&self, breed_id: Option<BreedId>) -> Result<Vec<Kitten>, PortError> {
            self.ensure_available()?;
            let state = self.state.read().await;

            state
                .kittens
                .iter()
                .filter(|(_, fields)| breed_id.map_or(true, |b| fields.breed_id == b))
                .map(|(id, fields)| state.resolve(*id, fields))
                .collect()
        }

        async fn get_by_id(&self, id: KittenId) -> Result<Option<Kitten>, PortError> {
            self.ensure_available()?;
            let state = self.state.read().await;

            state
                .kittens
                .get(&id)
                .map(|fields| state.resolve(id, fields))
                .transpose()
        }

        async fn create(&self, fields: KittenFields) -> Result<Kitten, PortError> {
            self.ensure_available()?;
            let mut state = self.state.write().await;
            state.check_breed(fields.breed_id)?;

            state.last_kitten_id += 1;
            let id = KittenId::new(state.last_kitten_id);
            let kitten = state.resolve(id, &fields)?;
            state.kittens.insert(id, fields);
            Ok(kitten)
        }

        async fn full_update(
            &self,
            id: KittenId,
            fields: KittenFields,
        ) -> Result<Option<Kitten>, PortError> {
            self.apply(id, fields.into()).await
        }

        async fn partial_update(
            &self,
            id: KittenId,
            changes: KittenChanges,
        ) -> Result<Option<Kitten>, PortError> {
            self.apply(id, changes).await
        }

        async fn delete(&self, id: KittenId) -> Result<bool, PortError> {
            self.ensure_available()?;
            Ok(self.state.write().await.kittens.remove(&id).is_some())
        }
    }

    #[async_trait]
    impl BreedRepository for InMemoryCattery {
        async fn list_all(&self) -> Result<Vec<Breed>, PortError> {
            self.ensure_available()?;
            Ok(self.state.read().await.breeds.values().cloned().collect())
        }
    }
}
