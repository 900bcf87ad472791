//! Core Kernel - Foundational types and utilities for the claims intake system
//!
//! This crate provides the building blocks shared by the domain, persistence
//! and API layers:
//! - Strongly-typed identifiers for claims and their pipeline records
//! - Port infrastructure (errors, health checks, operation metadata)
//! - A portable string hash for reproducible selections

pub mod identifiers;
pub mod error;
pub mod ports;
pub mod stable_hash;

pub use identifiers::{ClaimId, AssessmentId, EstimateId, ReviewId, RepairShopId, AuditEventId};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth, OperationMetadata,
};
pub use stable_hash::fnv1a_32;
