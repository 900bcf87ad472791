//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Architecture
//!
//! Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimsStore;
//! use domain_claims::ClaimRecordPort;
//!
//! let store = PostgresClaimsStore::new(pool);
//! let shops = store.approved_repair_shops().await?;
//! ```

pub mod claims;

pub use claims::PostgresClaimsStore;
