//! The claims agent: the three pipeline stages behind one capability set

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

use crate::claim::DamageSubmission;
use crate::classifier;
use crate::cost_table::CostTable;
use crate::damage::DamageAssessmentResult;
use crate::error::ClaimError;
use crate::estimate::{self, EstimateRequest, EstimateResult};
use crate::review::{self, ReviewDecision};
use crate::signals;

/// Damage analysis, estimation and review
///
/// All three operations are synchronous and CPU-bound; async callers should
/// move `analyze_damage` off the runtime threads.
pub trait ClaimsAgent: Send + Sync {
    /// Classifies the submitted photo. Never fails.
    fn analyze_damage(&self, submission: &DamageSubmission) -> DamageAssessmentResult;

    /// Prices damage against the cost reference table
    fn generate_estimate(&self, request: &EstimateRequest) -> Result<EstimateResult, ClaimError>;

    /// Approves an estimate snapshot. Never fails.
    fn review_estimate(&self, snapshot: Option<&Value>, reviewed_at: DateTime<Utc>) -> ReviewDecision;
}

/// Deterministic threshold-based agent
#[derive(Debug, Clone)]
pub struct HeuristicAgent {
    cost_table: Arc<CostTable>,
}

impl HeuristicAgent {
    pub fn new(cost_table: Arc<CostTable>) -> Self {
        Self { cost_table }
    }

    pub fn cost_table(&self) -> &CostTable {
        &self.cost_table
    }
}

impl ClaimsAgent for HeuristicAgent {
    fn analyze_damage(&self, submission: &DamageSubmission) -> DamageAssessmentResult {
        let signal = signals::extract_signals(submission.image());
        let result = classifier::assess(signal.as_ref(), submission.image_filename.as_deref());
        info!(
            filename = submission.filename(),
            policy_number = submission.policy_number.as_deref(),
            accident_description = submission.accident_description.as_deref(),
            labels = ?result.damage_labels,
            from_signals = signal.is_some(),
            "damage analysed"
        );
        result
    }

    fn generate_estimate(&self, request: &EstimateRequest) -> Result<EstimateResult, ClaimError> {
        let result = estimate::estimate(&self.cost_table, request)?;
        info!(
            line_items = result.line_items.len(),
            total_base_cost = result.total_base_cost,
            "estimate generated"
        );
        Ok(result)
    }

    fn review_estimate(&self, snapshot: Option<&Value>, reviewed_at: DateTime<Utc>) -> ReviewDecision {
        review::approve(snapshot, reviewed_at)
    }
}
