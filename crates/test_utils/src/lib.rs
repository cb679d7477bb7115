//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! cattery test suite.
//!
//! # Modules
//!
//! - `fixtures`: Seeding breeds and kittens into PostgreSQL or the
//!   in-memory store
//! - `builders`: Builder for kitten payloads with sensible defaults
//! - `database`: PostgreSQL testcontainer management

pub mod fixtures;
pub mod builders;
pub mod database;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
