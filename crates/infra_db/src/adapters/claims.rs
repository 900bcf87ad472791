//! PostgreSQL Claims Intake Adapter
//!
//! Implements `ClaimRecordPort` on top of the `ClaimsRepository`. The adapter
//! generates identifiers, serialises domain results into their JSON blobs,
//! builds the audit entry for each stage and converts reference rows back
//! into domain types.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimsStore;
//! use domain_claims::ClaimRecordPort;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn ClaimRecordPort> = Arc::new(PostgresClaimsStore::new(pool));
//! let rows = store.cost_reference().await?;
//! ```

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, instrument};

use core_kernel::{
    AdapterHealth, AssessmentId, ClaimId, DomainPort, EstimateId, HealthCheckResult,
    HealthCheckable, OperationMetadata, PortError, RepairShopId, ReviewId,
};
use domain_claims::ports::{
    AnalysisRecord, EstimateRecord, NewAnalysis, NewEstimate, NewReview, ReviewRecord,
};
use domain_claims::{
    AuditEvent, ClaimRecordPort, CostReferenceRow, DamageType, RepairShop, Severity,
};

use crate::repositories::claims::{
    ClaimsRepository, CostReferenceDbRow, NewAssessmentRecord, NewEstimateRecord,
    NewReviewRecord, NewSystemLog, RepairShopRow,
};

/// PostgreSQL-backed implementation of the ClaimRecordPort trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` through
/// `From<DatabaseError>`; stored rows that no longer parse into domain types
/// surface as `PortError::Transformation`.
#[derive(Debug, Clone)]
pub struct PostgresClaimsStore {
    repository: ClaimsRepository,
    pool: PgPool,
}

impl PostgresClaimsStore {
    /// Creates a new PostgreSQL claims store
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn repository(&self) -> &ClaimsRepository {
        &self.repository
    }
}

impl DomainPort for PostgresClaimsStore {}

#[async_trait]
impl HealthCheckable for PostgresClaimsStore {
    /// Checks database connectivity with `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "postgres-claims-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "postgres-claims-store".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl ClaimRecordPort for PostgresClaimsStore {
    #[instrument(skip_all, fields(correlation_id = correlation(&metadata)))]
    async fn record_analysis(
        &self,
        analysis: NewAnalysis,
        metadata: Option<OperationMetadata>,
    ) -> Result<AnalysisRecord, PortError> {
        let record = AnalysisRecord {
            claim_id: ClaimId::new_v7(),
            assessment_id: AssessmentId::new_v7(),
        };
        let event =
            AuditEvent::damage_analysis(record.claim_id, &analysis.result, &analysis.image_filename);

        self.repository
            .create_claim_with_assessment(
                NewAssessmentRecord {
                    claim_id: record.claim_id.into(),
                    assessment_id: record.assessment_id.into(),
                    policy_number: analysis.policy_number,
                    assessment_data: to_json(&analysis.result)?,
                },
                system_log(event),
            )
            .await?;

        info!(claim_id = %record.claim_id, assessment_id = %record.assessment_id, "damage analysis recorded");
        Ok(record)
    }

    #[instrument(skip_all, fields(correlation_id = correlation(&metadata)))]
    async fn record_estimate(
        &self,
        estimate: NewEstimate,
        metadata: Option<OperationMetadata>,
    ) -> Result<EstimateRecord, PortError> {
        let estimate_id = EstimateId::new_v7();
        let event = AuditEvent::estimate_generation(estimate_id, &estimate.result);

        let claim_id = self
            .repository
            .create_estimate(
                NewEstimateRecord {
                    estimate_id: estimate_id.into(),
                    damage_assessment_id: estimate.damage_assessment_id.map(Into::into),
                    estimate_data: to_json(&estimate.result)?,
                },
                system_log(event),
            )
            .await?
            .map(ClaimId::from_uuid);

        info!(%estimate_id, claim_id = ?claim_id, "repair estimate recorded");
        Ok(EstimateRecord { estimate_id, claim_id })
    }

    #[instrument(skip_all, fields(correlation_id = correlation(&metadata)))]
    async fn record_review(
        &self,
        review: NewReview,
        metadata: Option<OperationMetadata>,
    ) -> Result<ReviewRecord, PortError> {
        let review_id = ReviewId::new_v7();
        let event = AuditEvent::review(review_id, &review.decision);

        let claim_id = self
            .repository
            .create_review(
                NewReviewRecord {
                    review_id: review_id.into(),
                    repair_estimate_id: review.estimate_id.map(Into::into),
                    review_data: to_json(&review.decision)?,
                },
                system_log(event),
            )
            .await?
            .map(ClaimId::from_uuid);

        info!(%review_id, claim_id = ?claim_id, status = review.decision.status(), "review recorded");
        Ok(ReviewRecord { review_id, claim_id })
    }

    async fn cost_reference(&self) -> Result<Vec<CostReferenceRow>, PortError> {
        self.repository
            .cost_reference()
            .await?
            .into_iter()
            .map(row_to_cost_reference)
            .collect()
    }

    async fn approved_repair_shops(&self) -> Result<Vec<RepairShop>, PortError> {
        Ok(self
            .repository
            .approved_repair_shops()
            .await?
            .into_iter()
            .map(row_to_repair_shop)
            .collect())
    }
}

// =============================================================================
// Conversion Functions
// =============================================================================

fn correlation(metadata: &Option<OperationMetadata>) -> Option<&str> {
    metadata.as_ref().and_then(|m| m.correlation_id.as_deref())
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, PortError> {
    serde_json::to_value(value).map_err(|e| PortError::transformation(e.to_string()))
}

fn system_log(event: AuditEvent) -> NewSystemLog {
    NewSystemLog {
        log_type: event.log_type.as_str().to_string(),
        log_data: event.log_data,
    }
}

/// Converts a stored reference row into its domain form
fn row_to_cost_reference(row: CostReferenceDbRow) -> Result<CostReferenceRow, PortError> {
    let damage_type = DamageType::from_label(&row.damage_type).ok_or_else(|| {
        PortError::transformation(format!("unknown damage_type '{}' in damage_cost_reference", row.damage_type))
    })?;
    let damage_severity = Severity::from_label(&row.damage_severity).ok_or_else(|| {
        PortError::transformation(format!(
            "unknown damage_severity '{}' in damage_cost_reference",
            row.damage_severity
        ))
    })?;

    Ok(CostReferenceRow {
        damage_type,
        damage_severity,
        base_cost: row.base_cost,
        parts_cost: row.parts_cost,
        labor_hours: row.labor_hours,
        notes: row.notes,
    })
}

fn row_to_repair_shop(row: RepairShopRow) -> RepairShop {
    RepairShop {
        id: RepairShopId::from_uuid(row.shop_id),
        name: row.name,
        address: row.address,
        phone: row.phone,
    }
}
