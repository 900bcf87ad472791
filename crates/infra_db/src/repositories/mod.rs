//! Repository implementations
//!
//! Repositories encapsulate SQL and map between database rows and plain
//! data; adapters translate those rows into domain types.
//!
//! # Architecture
//!
//! - Runtime-checked queries (`sqlx::query`, `query_as` with `FromRow`)
//! - One transaction per recorded stage, audit entry included

pub mod claims;

pub use claims::ClaimsRepository;
