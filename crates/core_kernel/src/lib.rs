//! Core Kernel - Foundational types shared by every cattery crate
//!
//! This crate provides the building blocks used across the domain, database
//! and API layers:
//! - Strongly-typed integer identifiers for store-generated keys
//! - Port infrastructure (error type, marker trait, health checks)

pub mod identifiers;
pub mod ports;

pub use identifiers::{BreedId, KittenId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
