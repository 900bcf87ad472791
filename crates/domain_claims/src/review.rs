//! Claim approval and denial decisions

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Amount approved when the estimate snapshot carries no usable totals
pub const DEFAULT_APPROVED_AMOUNT: Decimal = dec!(2450.00);

pub const REVIEWER_ID: &str = "senior_reviewer_001";

pub const APPROVAL_NOTES: &str = "Estimate within acceptable range. Approved for processing.";

/// Outcome of the approval and authorization stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReviewDecision {
    Approved(Approval),
    Denied(Denial),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    pub reviewer_id: String,
    pub review_timestamp: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub approved_amount: Decimal,
    pub notes: String,
    pub requires_additional_approval: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denial {
    pub denial_comments: String,
    pub review_timestamp: DateTime<Utc>,
}

impl ReviewDecision {
    pub fn status(&self) -> &'static str {
        match self {
            ReviewDecision::Approved(_) => "approved",
            ReviewDecision::Denied(_) => "denied",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ReviewDecision::Approved(_))
    }

    pub fn review_timestamp(&self) -> DateTime<Utc> {
        match self {
            ReviewDecision::Approved(a) => a.review_timestamp,
            ReviewDecision::Denied(d) => d.review_timestamp,
        }
    }
}

/// Reads a JSON number or numeric string as a decimal
///
/// Anything else (null, bool, arrays, garbage strings) counts as absent.
pub fn json_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Derives the approved amount from an estimate snapshot
///
/// Parts plus labor wins when either is non-zero; otherwise the base total;
/// otherwise [`DEFAULT_APPROVED_AMOUNT`]. A parts plus labor sum that
/// overflows `Decimal` is treated as absent.
pub fn approved_amount(snapshot: Option<&Value>) -> Decimal {
    let Some(Value::Object(fields)) = snapshot else {
        return DEFAULT_APPROVED_AMOUNT;
    };
    let total = |key: &str| fields.get(key).and_then(json_decimal);

    let parts = total("total_parts_cost").unwrap_or_default();
    let labor = total("total_labor_cost").unwrap_or_default();
    if !parts.is_zero() || !labor.is_zero() {
        match parts.checked_add(labor) {
            Some(sum) => return sum,
            None => warn!(%parts, %labor, "parts plus labor overflows, ignoring"),
        }
    }

    total("total_base_cost").unwrap_or(DEFAULT_APPROVED_AMOUNT)
}

/// Approves an estimate snapshot
///
/// Never fails; malformed snapshots fall through to the default amount.
pub fn approve(snapshot: Option<&Value>, reviewed_at: DateTime<Utc>) -> ReviewDecision {
    let approved_amount = approved_amount(snapshot);
    debug!(%approved_amount, has_snapshot = snapshot.is_some(), "estimate approved");
    ReviewDecision::Approved(Approval {
        reviewer_id: REVIEWER_ID.to_string(),
        review_timestamp: reviewed_at,
        approved_amount,
        notes: APPROVAL_NOTES.to_string(),
        requires_additional_approval: false,
    })
}

/// Records a denial with the reviewer's comments
pub fn deny(comments: impl Into<String>, reviewed_at: DateTime<Utc>) -> ReviewDecision {
    ReviewDecision::Denied(Denial {
        denial_comments: comments.into(),
        review_timestamp: reviewed_at,
    })
}
