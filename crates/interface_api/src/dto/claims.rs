//! Claims pipeline DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::{AssessmentId, ClaimId, EstimateId, ReviewId};
use domain_claims::{DamageAssessmentResult, EstimateResult, RawAssessment, ReviewDecision};

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeDamageResponse {
    pub success: bool,
    pub assessment_id: AssessmentId,
    pub claim_id: ClaimId,
    pub result: DamageAssessmentResult,
}

/// Estimate request
///
/// `damage_assessments` wins when non-empty; otherwise the label form
/// (`damage_labels` with one `damage_severity`) is priced.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerateEstimateRequest {
    pub damage_assessment_id: Option<AssessmentId>,
    pub damage_labels: Option<Vec<String>>,
    pub damage_severity: Option<String>,
    pub damage_assessments: Option<Vec<RawAssessment>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateEstimateResponse {
    pub success: bool,
    pub estimate_id: EstimateId,
    pub claim_id: Option<ClaimId>,
    pub result: EstimateResult,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ReviewEstimateRequest {
    pub estimate_id: Option<EstimateId>,
    /// Estimate snapshot as shown to the reviewer
    pub estimate_data: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewEstimateResponse {
    pub success: bool,
    pub review_id: ReviewId,
    pub claim_id: Option<ClaimId>,
    pub result: ReviewDecision,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DenyClaimRequest {
    pub estimate_id: Option<EstimateId>,
    pub denial_comments: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DenyClaimResponse {
    pub success: bool,
    pub review_id: ReviewId,
    pub claim_id: Option<ClaimId>,
    pub status: String,
}
