//! Breed repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{BreedId, DomainPort, PortError};
use domain_cattery::{Breed, BreedRepository};

use crate::error::DatabaseError;

/// A row of the `breeds` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BreedRow {
    pub id: i32,
    pub name: String,
}

impl From<BreedRow> for Breed {
    fn from(row: BreedRow) -> Self {
        Breed::new(BreedId::new(row.id), row.name)
    }
}

/// Read-only access to breeds
#[derive(Debug, Clone)]
pub struct PostgresBreedRepository {
    pool: PgPool,
}

impl PostgresBreedRepository {
    /// Creates a new PostgresBreedRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self) -> Result<Vec<BreedRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, BreedRow>("SELECT id, name FROM breeds ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

impl DomainPort for PostgresBreedRepository {}

#[async_trait]
impl BreedRepository for PostgresBreedRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Breed>, PortError> {
        let rows = self.fetch_all().await?;
        debug!(count = rows.len(), "Fetched breeds");
        Ok(rows.into_iter().map(Breed::from).collect())
    }
}
