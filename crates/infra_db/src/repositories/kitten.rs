//! Kitten repository implementation
//!
//! Every operation that returns a kitten reads it back through
//! [`SELECT_KITTEN`], which joins the owning breed. Mutations re-read inside
//! their own transaction so the returned view matches what was committed.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, BreedId, DomainPort, HealthCheckResult, HealthCheckable, KittenId, PortError,
};
use domain_cattery::{Breed, Kitten, KittenChanges, KittenFields, KittenRepository};

use crate::error::DatabaseError;

const SELECT_KITTEN: &str = r#"
    SELECT
        k.id,
        k.color,
        k.age,
        k.description,
        k.breed_id,
        b.name AS breed_name
    FROM kittens k
    JOIN breeds b ON b.id = k.breed_id
    WHERE k.id = $1
"#;

const LIST_KITTENS: &str = r#"
    SELECT
        k.id,
        k.color,
        k.age,
        k.description,
        k.breed_id,
        b.name AS breed_name
    FROM kittens k
    JOIN breeds b ON b.id = k.breed_id
    WHERE ($1::integer IS NULL OR k.breed_id = $1)
    ORDER BY k.id
"#;

/// A kitten joined with its breed name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct KittenRow {
    pub id: i32,
    pub color: String,
    pub age: i32,
    pub description: String,
    pub breed_id: i32,
    pub breed_name: String,
}

impl From<KittenRow> for Kitten {
    fn from(row: KittenRow) -> Self {
        let breed_id = BreedId::new(row.breed_id);
        Kitten {
            id: KittenId::new(row.id),
            color: row.color,
            age: row.age,
            description: row.description,
            breed_id,
            breed: Breed::new(breed_id, row.breed_name),
        }
    }
}

/// The writable columns of a `kittens` row
#[derive(Debug, Clone, sqlx::FromRow)]
struct KittenColumns {
    color: String,
    age: i32,
    description: String,
    breed_id: i32,
}

impl From<KittenColumns> for KittenFields {
    fn from(columns: KittenColumns) -> Self {
        KittenFields {
            color: columns.color,
            age: columns.age,
            description: columns.description,
            breed_id: BreedId::new(columns.breed_id),
        }
    }
}

async fn load_kitten(conn: &mut PgConnection, id: i32) -> Result<Option<KittenRow>, sqlx::Error> {
    sqlx::query_as::<_, KittenRow>(SELECT_KITTEN)
        .bind(id)
        .fetch_optional(conn)
        .await
}

fn vanished(id: i32) -> DatabaseError {
    DatabaseError::QueryFailed(format!("kitten {} not readable after write", id))
}

/// Repository for kittens backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PostgresKittenRepository {
    pool: PgPool,
}

impl PostgresKittenRepository {
    /// Creates a new PostgresKittenRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self, breed_id: Option<i32>) -> Result<Vec<KittenRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, KittenRow>(LIST_KITTENS)
            .bind(breed_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_one(&self, id: i32) -> Result<Option<KittenRow>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        Ok(load_kitten(&mut conn, id).await?)
    }

    async fn insert(&self, fields: KittenFields) -> Result<KittenRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO kittens (color, age, description, breed_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&fields.color)
        .bind(fields.age)
        .bind(&fields.description)
        .bind(fields.breed_id.get())
        .fetch_one(&mut *tx)
        .await?;

        let row = load_kitten(&mut tx, id).await?.ok_or_else(|| vanished(id))?;
        tx.commit().await?;
        Ok(row)
    }

    /// Loads the row, overwrites the supplied columns and writes every column
    /// back. A miss returns `None` and rolls back the empty transaction.
    ///
    /// The row stays locked from the read to the commit, so concurrent
    /// updates of the same kitten apply one after the other and each merges
    /// onto the other's committed columns.
    async fn update(&self, id: i32, changes: KittenChanges) -> Result<Option<KittenRow>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, KittenColumns>(
            "SELECT color, age, description, breed_id FROM kittens WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Ok(None);
        };

        let mut fields = KittenFields::from(current);
        changes.apply_to(&mut fields);

        sqlx::query(
            r#"
            UPDATE kittens
            SET color = $2, age = $3, description = $4, breed_id = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&fields.color)
        .bind(fields.age)
        .bind(&fields.description)
        .bind(fields.breed_id.get())
        .execute(&mut *tx)
        .await?;

        let row = load_kitten(&mut tx, id).await?.ok_or_else(|| vanished(id))?;
        tx.commit().await?;
        Ok(Some(row))
    }

    async fn remove(&self, id: i32) -> Result<bool, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM kittens WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM kittens WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

impl DomainPort for PostgresKittenRepository {}

#[async_trait]
impl HealthCheckable for PostgresKittenRepository {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: "postgres-kitten-repository".to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl KittenRepository for PostgresKittenRepository {
    #[instrument(skip(self))]
    async fn list(&self, breed_id: Option<BreedId>) -> Result<Vec<Kitten>, PortError> {
        let rows = self.fetch_all(breed_id.map(|b| b.get())).await?;
        debug!(count = rows.len(), "Fetched kittens");
        Ok(rows.into_iter().map(Kitten::from).collect())
    }

    #[instrument(skip(self), fields(kitten_id = %id))]
    async fn get_by_id(&self, id: KittenId) -> Result<Option<Kitten>, PortError> {
        Ok(self.fetch_one(id.get()).await?.map(Kitten::from))
    }

    #[instrument(skip(self, kitten), fields(breed_id = %kitten.breed_id))]
    async fn create(&self, kitten: KittenFields) -> Result<Kitten, PortError> {
        let row = self.insert(kitten).await?;
        debug!(kitten_id = row.id, "Inserted kitten");
        Ok(row.into())
    }

    #[instrument(skip(self, replacement), fields(kitten_id = %id))]
    async fn full_update(
        &self,
        id: KittenId,
        replacement: KittenFields,
    ) -> Result<Option<Kitten>, PortError> {
        Ok(self.update(id.get(), replacement.into()).await?.map(Kitten::from))
    }

    #[instrument(skip(self, changes), fields(kitten_id = %id))]
    async fn partial_update(
        &self,
        id: KittenId,
        changes: KittenChanges,
    ) -> Result<Option<Kitten>, PortError> {
        Ok(self.update(id.get(), changes).await?.map(Kitten::from))
    }

    #[instrument(skip(self), fields(kitten_id = %id))]
    async fn delete(&self, id: KittenId) -> Result<bool, PortError> {
        let deleted = self.remove(id.get()).await?;
        debug!(deleted, "Delete finished");
        Ok(deleted)
    }
}
