//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL side of the cattery service using SQLx:
//!
//! - Connection pool configuration and creation
//! - The embedded schema migrations
//! - Repository implementations of the `domain_cattery` ports
//! - Classification of driver errors into [`DatabaseError`] and from there
//!   into `core_kernel::PortError`
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::repositories::PostgresKittenRepository;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/cattery")).await?;
//! run_migrations(&pool).await?;
//! let repo = PostgresKittenRepository::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
