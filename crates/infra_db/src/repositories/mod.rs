//! PostgreSQL implementations of the cattery repository ports
//!
//! Each repository holds a clone of the pool and takes a connection per call.
//! Mutations run inside one `sqlx::Transaction`; returning early (a miss or
//! an error) drops the transaction, which rolls it back and releases the
//! connection.
//!
//! Reads join `breeds` so every kitten comes back with its breed in a single
//! query.

pub mod breed;
pub mod kitten;

pub use breed::PostgresBreedRepository;
pub use kitten::PostgresKittenRepository;
