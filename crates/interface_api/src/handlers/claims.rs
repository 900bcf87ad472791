//! Claims pipeline handlers
//!
//! Each stage runs the agent, then records the outcome and its audit event
//! through the claim store.

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;
use tracing::{debug, info};

use core_kernel::OperationMetadata;
use domain_claims::claim::UNKNOWN_FILENAME;
use domain_claims::ports::{NewAnalysis, NewEstimate, NewReview};
use domain_claims::{review, DamageSubmission, EstimateRequest};

use crate::dto::claims::*;
use crate::middleware::REQUEST_ID_HEADER;
use crate::{error::ApiError, AppState};

/// Message returned when the upload is not declared as an image
pub const NOT_AN_IMAGE: &str = "File must be an image";

/// Analyses an uploaded damage photo and opens a claim for it
///
/// Multipart fields: `image` (required), `policy_number`, `accident_description`.
pub async fn analyze_damage(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeDamageResponse>, ApiError> {
    let mut submission: Option<DamageSubmission> = None;
    let mut policy_number = None;
    let mut accident_description = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let filename = field.file_name().unwrap_or(UNKNOWN_FILENAME).to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;

                let upload = DamageSubmission::new(bytes.to_vec()).with_filename(filename);
                submission = Some(match content_type {
                    Some(content_type) => upload.with_content_type(content_type),
                    None => upload,
                });
            }
            Some("policy_number") => policy_number = Some(field.text().await?),
            Some("accident_description") => accident_description = Some(field.text().await?),
            other => debug!(field = ?other, "ignoring multipart field"),
        }
    }

    let mut submission =
        submission.ok_or_else(|| ApiError::BadRequest("image file is required".to_string()))?;
    if !submission.has_image_content_type() {
        return Err(ApiError::BadRequest(NOT_AN_IMAGE.to_string()));
    }
    submission.policy_number = policy_number;
    submission.accident_description = accident_description;

    let agent = state.agent.clone();
    let (submission, result) = tokio::task::spawn_blocking(move || {
        let result = agent.analyze_damage(&submission);
        (submission, result)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("damage analysis task failed: {e}")))?;

    let record = state
        .store
        .record_analysis(
            NewAnalysis {
                policy_number: submission.policy_number.clone(),
                image_filename: submission.filename().to_string(),
                result: result.clone(),
            },
            operation_metadata(&headers, "analyze_damage"),
        )
        .await?;

    info!(claim_id = %record.claim_id, labels = ?result.damage_labels, "claim opened");

    Ok(Json(AnalyzeDamageResponse {
        success: true,
        assessment_id: record.assessment_id,
        claim_id: record.claim_id,
        result,
    }))
}

/// Prices the assessed damage against the cost reference table
pub async fn generate_estimate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerateEstimateRequest>,
) -> Result<Json<GenerateEstimateResponse>, ApiError> {
    let estimate_request = EstimateRequest::select(
        request.damage_assessments,
        request.damage_labels,
        request.damage_severity,
    );
    let result = state.agent.generate_estimate(&estimate_request)?;

    let record = state
        .store
        .record_estimate(
            NewEstimate {
                damage_assessment_id: request.damage_assessment_id,
                result: result.clone(),
            },
            operation_metadata(&headers, "generate_estimate"),
        )
        .await?;

    Ok(Json(GenerateEstimateResponse {
        success: true,
        estimate_id: record.estimate_id,
        claim_id: record.claim_id,
        result,
    }))
}

/// Approves an estimate as the senior reviewer
pub async fn review_estimate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ReviewEstimateRequest>,
) -> Result<Json<ReviewEstimateResponse>, ApiError> {
    let decision = state
        .agent
        .review_estimate(request.estimate_data.as_ref(), Utc::now());

    let record = state
        .store
        .record_review(
            NewReview {
                estimate_id: request.estimate_id,
                decision: decision.clone(),
            },
            operation_metadata(&headers, "review_estimate"),
        )
        .await?;

    Ok(Json(ReviewEstimateResponse {
        success: true,
        review_id: record.review_id,
        claim_id: record.claim_id,
        result: decision,
    }))
}

/// Records a denial with the reviewer's comments
pub async fn deny_claim(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<DenyClaimRequest>,
) -> Result<Json<DenyClaimResponse>, ApiError> {
    let decision = review::deny(request.denial_comments, Utc::now());
    let status = decision.status().to_string();

    let record = state
        .store
        .record_review(
            NewReview {
                estimate_id: request.estimate_id,
                decision,
            },
            operation_metadata(&headers, "deny_claim"),
        )
        .await?;

    Ok(Json(DenyClaimResponse {
        success: true,
        review_id: record.review_id,
        claim_id: record.claim_id,
        status,
    }))
}

fn operation_metadata(headers: &HeaderMap, stage: &str) -> Option<OperationMetadata> {
    let request_id = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?;
    Some(OperationMetadata::with_correlation_id(request_id).with_context("stage", stage))
}
