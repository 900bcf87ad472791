//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for the claims intake
//! system using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: `repositories` hold the SQL,
//! `adapters` implement the domain's `ClaimRecordPort` on top of them.
//!
//! # Audit Trail
//!
//! Every recorded stage (analysis, estimate, approval, denial) appends a
//! `system_logs` entry in the same transaction as the stage record.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresClaimsStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresClaimsStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::PostgresClaimsStore;
