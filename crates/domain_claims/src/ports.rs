//! Claims Intake Ports
//!
//! The `ClaimRecordPort` trait is everything the intake pipeline needs from
//! persistence: recording each stage's outcome with its audit entry, and
//! reading the reference data the estimator and the approval screen use.
//!
//! # Adapters
//!
//! - **PostgreSQL**: `infra_db::PostgresClaimsStore`
//! - **Mock**: [`mock::MockClaimRecordPort`], in-memory, for tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::ports::{ClaimRecordPort, NewAnalysis};
//! use std::sync::Arc;
//!
//! async fn record(store: Arc<dyn ClaimRecordPort>, analysis: NewAnalysis) {
//!     let record = store.record_analysis(analysis, None).await?;
//!     tracing::info!(claim_id = %record.claim_id, "claim opened");
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{
    AssessmentId, ClaimId, DomainPort, EstimateId, HealthCheckable, OperationMetadata, PortError,
    ReviewId,
};

use crate::cost_table::CostReferenceRow;
use crate::damage::DamageAssessmentResult;
use crate::estimate::EstimateResult;
use crate::review::ReviewDecision;
use crate::shop::RepairShop;

/// A finished damage analysis to be recorded under a new claim
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub policy_number: Option<String>,
    pub image_filename: String,
    pub result: DamageAssessmentResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisRecord {
    pub claim_id: ClaimId,
    pub assessment_id: AssessmentId,
}

/// A priced estimate, optionally linked to the assessment it was built from
#[derive(Debug, Clone)]
pub struct NewEstimate {
    pub damage_assessment_id: Option<AssessmentId>,
    pub result: EstimateResult,
}

/// `claim_id` is `None` when the linked assessment is absent or unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateRecord {
    pub estimate_id: EstimateId,
    pub claim_id: Option<ClaimId>,
}

/// An approval or denial, optionally linked to the estimate it reviews
#[derive(Debug, Clone)]
pub struct NewReview {
    pub estimate_id: Option<EstimateId>,
    pub decision: ReviewDecision,
}

/// `claim_id` is `None` when the linked estimate is absent, unknown, or itself unlinked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewRecord {
    pub review_id: ReviewId,
    pub claim_id: Option<ClaimId>,
}

/// Persistence for the claims intake pipeline
///
/// Every `record_*` call writes the stage record and its audit event in one
/// atomic unit; either both are stored or neither is. Links to a previous
/// stage that does not exist are stored as absent rather than rejected.
#[async_trait]
pub trait ClaimRecordPort: DomainPort + HealthCheckable {
    /// Opens a claim and stores its damage assessment
    async fn record_analysis(
        &self,
        analysis: NewAnalysis,
        metadata: Option<OperationMetadata>,
    ) -> Result<AnalysisRecord, PortError>;

    /// Stores an estimate, resolving its claim through the assessment link
    async fn record_estimate(
        &self,
        estimate: NewEstimate,
        metadata: Option<OperationMetadata>,
    ) -> Result<EstimateRecord, PortError>;

    /// Stores an approval or denial, resolving its claim through the estimate link
    async fn record_review(
        &self,
        review: NewReview,
        metadata: Option<OperationMetadata>,
    ) -> Result<ReviewRecord, PortError>;

    /// Loads all cost reference rows in table order
    async fn cost_reference(&self) -> Result<Vec<CostReferenceRow>, PortError>;

    /// Lists repair shops approved for claim work
    async fn approved_repair_shops(&self) -> Result<Vec<RepairShop>, PortError>;
}

/// Mock implementation of ClaimRecordPort for testing
///
/// Keeps every record and audit event in memory so tests can inspect what
/// the pipeline stored.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use chrono::Utc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    use crate::audit::AuditEvent;

    #[derive(Debug, Clone)]
    pub struct StoredAnalysis {
        pub claim_id: ClaimId,
        pub policy_number: Option<String>,
        pub result: DamageAssessmentResult,
    }

    #[derive(Debug, Clone)]
    pub struct StoredEstimate {
        pub claim_id: Option<ClaimId>,
        pub damage_assessment_id: Option<AssessmentId>,
        pub result: EstimateResult,
    }

    #[derive(Debug, Clone)]
    pub struct StoredReview {
        pub claim_id: Option<ClaimId>,
        pub estimate_id: Option<EstimateId>,
        pub decision: ReviewDecision,
    }

    /// In-memory mock implementation of ClaimRecordPort
    #[derive(Debug, Default)]
    pub struct MockClaimRecordPort {
        cost_rows: Vec<CostReferenceRow>,
        shops: Vec<RepairShop>,
        unhealthy: bool,
        assessments: Arc<RwLock<HashMap<AssessmentId, StoredAnalysis>>>,
        estimates: Arc<RwLock<HashMap<EstimateId, StoredEstimate>>>,
        reviews: Arc<RwLock<HashMap<ReviewId, StoredReview>>>,
        audit_log: Arc<RwLock<Vec<AuditEvent>>>,
    }

    impl MockClaimRecordPort {
        /// Creates a new mock port with no reference data
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the reference data
        pub fn with_reference(cost_rows: Vec<CostReferenceRow>, shops: Vec<RepairShop>) -> Self {
            Self {
                cost_rows,
                shops,
                ..Self::default()
            }
        }

        /// Makes the health check report the adapter as down
        pub fn unhealthy(mut self) -> Self {
            self.unhealthy = true;
            self
        }

        pub async fn audit_log(&self) -> Vec<AuditEvent> {
            self.audit_log.read().await.clone()
        }

        pub async fn assessment(&self, id: AssessmentId) -> Option<StoredAnalysis> {
            self.assessments.read().await.get(&id).cloned()
        }

        pub async fn estimate(&self, id: EstimateId) -> Option<StoredEstimate> {
            self.estimates.read().await.get(&id).cloned()
        }

        pub async fn review(&self, id: ReviewId) -> Option<StoredReview> {
            self.reviews.read().await.get(&id).cloned()
        }
    }

    impl DomainPort for MockClaimRecordPort {}

    #[async_trait]
    impl HealthCheckable for MockClaimRecordPort {
        async fn health_check(&self) -> HealthCheckResult {
            let (status, message) = if self.unhealthy {
                (AdapterHealth::Unhealthy, "Mock adapter marked unhealthy")
            } else {
                (AdapterHealth::Healthy, "Mock adapter always healthy")
            };
            HealthCheckResult {
                adapter_id: "mock-claim-record-port".to_string(),
                status,
                latency_ms: 0,
                message: Some(message.to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClaimRecordPort for MockClaimRecordPort {
        async fn record_analysis(
            &self,
            analysis: NewAnalysis,
            _metadata: Option<OperationMetadata>,
        ) -> Result<AnalysisRecord, PortError> {
            let record = AnalysisRecord {
                claim_id: ClaimId::new_v7(),
                assessment_id: AssessmentId::new_v7(),
            };
            let event =
                AuditEvent::damage_analysis(record.claim_id, &analysis.result, &analysis.image_filename);

            self.assessments.write().await.insert(
                record.assessment_id,
                StoredAnalysis {
                    claim_id: record.claim_id,
                    policy_number: analysis.policy_number,
                    result: analysis.result,
                },
            );
            self.audit_log.write().await.push(event);
            Ok(record)
        }

        async fn record_estimate(
            &self,
            estimate: NewEstimate,
            _metadata: Option<OperationMetadata>,
        ) -> Result<EstimateRecord, PortError> {
            let claim_id = match estimate.damage_assessment_id {
                Some(id) => self.assessments.read().await.get(&id).map(|a| a.claim_id),
                None => None,
            };
            let record = EstimateRecord {
                estimate_id: EstimateId::new_v7(),
                claim_id,
            };
            let event = AuditEvent::estimate_generation(record.estimate_id, &estimate.result);

            self.estimates.write().await.insert(
                record.estimate_id,
                StoredEstimate {
                    claim_id,
                    damage_assessment_id: estimate.damage_assessment_id,
                    result: estimate.result,
                },
            );
            self.audit_log.write().await.push(event);
            Ok(record)
        }

        async fn record_review(
            &self,
            review: NewReview,
            _metadata: Option<OperationMetadata>,
        ) -> Result<ReviewRecord, PortError> {
            let claim_id = match review.estimate_id {
                Some(id) => self.estimates.read().await.get(&id).and_then(|e| e.claim_id),
                None => None,
            };
            let record = ReviewRecord {
                review_id: ReviewId::new_v7(),
                claim_id,
            };
            let event = AuditEvent::review(record.review_id, &review.decision);

            self.reviews.write().await.insert(
                record.review_id,
                StoredReview {
                    claim_id,
                    estimate_id: review.estimate_id,
                    decision: review.decision,
                },
            );
            self.audit_log.write().await.push(event);
            Ok(record)
        }

        async fn cost_reference(&self) -> Result<Vec<CostReferenceRow>, PortError> {
            Ok(self.cost_rows.clone())
        }

        async fn approved_repair_shops(&self) -> Result<Vec<RepairShop>, PortError> {
            Ok(self.shops.clone())
        }
    }
}
