//! Claims intake repository implementation
//!
//! This module provides database access for the intake pipeline: claims with
//! their damage assessments, repair estimates, senior reviews, the audit log,
//! and the read-only reference tables.
//!
//! Every write runs in one transaction together with its `system_logs` entry.

use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use core_kernel::AuditEventId;

use crate::error::DatabaseError;

/// Repository for the claims intake tables
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a claim with its damage assessment and audit entry
    ///
    /// # Arguments
    ///
    /// * `record` - Claim and assessment data with pre-generated identifiers
    /// * `log` - The audit entry describing the analysis
    pub async fn create_claim_with_assessment(
        &self,
        record: NewAssessmentRecord,
        log: NewSystemLog,
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO claims (claim_id, policy_number) VALUES ($1, $2)")
            .bind(record.claim_id)
            .bind(record.policy_number.as_deref())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO damage_assessments (assessment_id, claim_id, assessment_data)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(record.assessment_id)
        .bind(record.claim_id)
        .bind(&record.assessment_data)
        .execute(&mut *tx)
        .await?;

        insert_log(&mut tx, log).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Stores an estimate and its audit entry
    ///
    /// # Returns
    ///
    /// The claim of the linked assessment, if that assessment exists
    pub async fn create_estimate(
        &self,
        record: NewEstimateRecord,
        log: NewSystemLog,
    ) -> Result<Option<Uuid>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let claim_id = match record.damage_assessment_id {
            Some(assessment_id) => sqlx::query_scalar::<_, Option<Uuid>>(
                "SELECT claim_id FROM damage_assessments WHERE assessment_id = $1",
            )
            .bind(assessment_id)
            .fetch_optional(&mut *tx)
            .await?
            .flatten(),
            None => None,
        };

        sqlx::query(
            r#"
            INSERT INTO repair_estimates (estimate_id, claim_id, damage_assessment_id, estimate_data)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.estimate_id)
        .bind(claim_id)
        .bind(record.damage_assessment_id)
        .bind(&record.estimate_data)
        .execute(&mut *tx)
        .await?;

        insert_log(&mut tx, log).await?;
        tx.commit().await?;
        Ok(claim_id)
    }

    /// Stores a review decision and its audit entry
    ///
    /// # Returns
    ///
    /// The claim of the linked estimate, if that estimate exists and has one
    pub async fn create_review(
        &self,
        record: NewReviewRecord,
        log: NewSystemLog,
    ) -> Result<Option<Uuid>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let claim_id = match record.repair_estimate_id {
            Some(estimate_id) => sqlx::query_scalar::<_, Option<Uuid>>(
                "SELECT claim_id FROM repair_estimates WHERE estimate_id = $1",
            )
            .bind(estimate_id)
            .fetch_optional(&mut *tx)
            .await?
            .flatten(),
            None => None,
        };

        sqlx::query(
            r#"
            INSERT INTO senior_reviews (review_id, claim_id, repair_estimate_id, review_data)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.review_id)
        .bind(claim_id)
        .bind(record.repair_estimate_id)
        .bind(&record.review_data)
        .execute(&mut *tx)
        .await?;

        insert_log(&mut tx, log).await?;
        tx.commit().await?;
        Ok(claim_id)
    }

    /// Loads the cost reference table in insertion order
    pub async fn cost_reference(&self) -> Result<Vec<CostReferenceDbRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CostReferenceDbRow>(
            r#"
            SELECT damage_type, damage_severity, base_cost, parts_cost, labor_hours, notes
            FROM damage_cost_reference
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists approved repair shops by name
    pub async fn approved_repair_shops(&self) -> Result<Vec<RepairShopRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, RepairShopRow>(
            r#"
            SELECT shop_id, name, address, phone
            FROM repair_shops
            WHERE is_approved = TRUE
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

async fn insert_log(
    tx: &mut Transaction<'_, Postgres>,
    log: NewSystemLog,
) -> Result<(), DatabaseError> {
    sqlx::query("INSERT INTO system_logs (log_id, log_type, log_data) VALUES ($1, $2, $3)")
        .bind(Uuid::from(AuditEventId::new_v7()))
        .bind(log.log_type)
        .bind(log.log_data)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Database row for a cost reference entry
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CostReferenceDbRow {
    pub damage_type: String,
    pub damage_severity: String,
    pub base_cost: i64,
    pub parts_cost: i64,
    pub labor_hours: Decimal,
    pub notes: Option<String>,
}

/// Database row for a repair shop
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RepairShopRow {
    pub shop_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Data for creating a claim with its assessment
#[derive(Debug, Clone)]
pub struct NewAssessmentRecord {
    pub claim_id: Uuid,
    pub assessment_id: Uuid,
    pub policy_number: Option<String>,
    pub assessment_data: Value,
}

/// Data for creating a repair estimate
#[derive(Debug, Clone)]
pub struct NewEstimateRecord {
    pub estimate_id: Uuid,
    pub damage_assessment_id: Option<Uuid>,
    pub estimate_data: Value,
}

/// Data for creating a senior review
#[derive(Debug, Clone)]
pub struct NewReviewRecord {
    pub review_id: Uuid,
    pub repair_estimate_id: Option<Uuid>,
    pub review_data: Value,
}

/// Data for an audit log entry
#[derive(Debug, Clone)]
pub struct NewSystemLog {
    pub log_type: String,
    pub log_data: Value,
}
