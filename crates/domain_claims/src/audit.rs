//! Append-only audit trail entries, one per recorded pipeline stage

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use core_kernel::{ClaimId, EstimateId, ReviewId};

use crate::damage::DamageAssessmentResult;
use crate::estimate::EstimateResult;
use crate::review::ReviewDecision;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditLogType {
    DamageAnalysis,
    EstimateGeneration,
    ClaimApprovalAuthorization,
    ClaimDenial,
}

impl AuditLogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditLogType::DamageAnalysis => "damage_analysis",
            AuditLogType::EstimateGeneration => "estimate_generation",
            AuditLogType::ClaimApprovalAuthorization => "claim_approval_authorization",
            AuditLogType::ClaimDenial => "claim_denial",
        }
    }
}

impl fmt::Display for AuditLogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `system_logs` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub log_type: AuditLogType,
    pub log_data: Value,
}

impl AuditEvent {
    pub fn damage_analysis(
        claim_id: ClaimId,
        result: &DamageAssessmentResult,
        image_filename: &str,
    ) -> Self {
        Self {
            log_type: AuditLogType::DamageAnalysis,
            log_data: json!({
                "claim_id": claim_id,
                "result": result,
                "image_filename": image_filename,
            }),
        }
    }

    pub fn estimate_generation(estimate_id: EstimateId, result: &EstimateResult) -> Self {
        Self {
            log_type: AuditLogType::EstimateGeneration,
            log_data: json!({
                "estimate_id": estimate_id,
                "result": result,
            }),
        }
    }

    /// Approvals log the full decision; denials log only the comments
    pub fn review(review_id: ReviewId, decision: &ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approved(_) => Self {
                log_type: AuditLogType::ClaimApprovalAuthorization,
                log_data: json!({
                    "review_id": review_id,
                    "result": decision,
                }),
            },
            ReviewDecision::Denied(denial) => Self {
                log_type: AuditLogType::ClaimDenial,
                log_data: json!({
                    "review_id": review_id,
                    "comments": denial.denial_comments,
                }),
            },
        }
    }
}
