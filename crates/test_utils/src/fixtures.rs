//! Pre-built Test Fixtures
//!
//! Breeds have no creation endpoint, so tests seed them directly: with SQL
//! against a [`TestDatabase`](crate::database::TestDatabase) pool, or through
//! [`InMemoryCattery::insert_breed`] for the in-memory store.

use core_kernel::{BreedId, KittenId};
use domain_cattery::{Breed, InMemoryCattery, KittenFields};
use sqlx::PgPool;

/// Breed names used across the suite
pub struct BreedFixtures;

impl BreedFixtures {
    pub const SIAMESE: &'static str = "Siamese";
    pub const PERSIAN: &'static str = "Persian";
    pub const MAINE_COON: &'static str = "Maine Coon";
}

/// Inserts a breed row and returns it
pub async fn insert_breed(pool: &PgPool, name: &str) -> Result<Breed, sqlx::Error> {
    let id: i32 = sqlx::query_scalar("INSERT INTO breeds (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(Breed::new(BreedId::new(id), name))
}

/// Inserts a kitten row directly, bypassing the repository
pub async fn insert_kitten(pool: &PgPool, fields: &KittenFields) -> Result<KittenId, sqlx::Error> {
    let id: i32 = sqlx::query_scalar(
        "INSERT INTO kittens (color, age, description, breed_id) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&fields.color)
    .bind(fields.age)
    .bind(&fields.description)
    .bind(fields.breed_id.get())
    .fetch_one(pool)
    .await?;
    Ok(KittenId::new(id))
}

/// An in-memory store seeded with the Siamese breed
pub async fn seeded_store() -> (InMemoryCattery, Breed) {
    let store = InMemoryCattery::new();
    let breed = store
        .insert_breed(BreedFixtures::SIAMESE)
        .await
        .expect("fresh store accepts a breed");
    (store, breed)
}
