//! Claims Intake Domain
//!
//! This crate implements the vehicle-damage intake pipeline: a photo is
//! classified into damage findings, the findings are priced against a static
//! cost reference table, and the estimate is approved or denied.
//!
//! # Pipeline
//!
//! ```text
//! photo -> signals -> classifier -> reasoning   => DamageAssessmentResult
//!       -> estimate (cost_table)                 => EstimateResult
//!       -> review                                => ReviewDecision
//! ```
//!
//! Every stage is a pure function; persistence sits behind [`ports::ClaimRecordPort`].

pub mod agent;
pub mod audit;
pub mod claim;
pub mod classifier;
pub mod cost_table;
pub mod damage;
pub mod error;
pub mod estimate;
pub mod ports;
pub mod reasoning;
pub mod review;
pub mod shop;
pub mod signals;

pub use agent::{ClaimsAgent, HeuristicAgent};
pub use audit::{AuditEvent, AuditLogType};
pub use claim::DamageSubmission;
pub use cost_table::{CostReferenceRow, CostTable, LABOR_RATE_PER_HOUR};
pub use damage::{DamageAssessmentResult, DamageFinding, DamageType, Severity};
pub use error::ClaimError;
pub use estimate::{EstimateLineItem, EstimateRequest, EstimateResult, RawAssessment};
pub use ports::ClaimRecordPort;
pub use review::{ReviewDecision, DEFAULT_APPROVED_AMOUNT};
pub use shop::RepairShop;
pub use signals::DamageSignal;
