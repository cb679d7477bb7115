//! Request handlers, one module per resource

pub mod breed;
pub mod health;
pub mod kitten;
