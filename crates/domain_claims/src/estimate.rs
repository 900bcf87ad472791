//! Repair cost estimation
//!
//! Prices damage against the [`CostTable`]. Two request shapes are accepted:
//!
//! - **Assessments**: explicit `(damage_type, severity)` pairs, as produced by
//!   the classifier. Each pair is priced on its own, so repeated pairs are
//!   counted once per occurrence.
//! - **Labels**: a flat label list sharing one severity. Each matching
//!   reference row is priced at most once, in table order.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cost_table::{labor_cost, CostReferenceRow, CostTable};
use crate::damage::{DamageType, Severity};
use crate::error::ClaimError;

pub const LABELS_REQUIRED: &str = "damage_labels or damage_assessments are required";
pub const SEVERITY_REQUIRED: &str =
    "damage_severity must be 'minor' or 'major' when using damage_labels";
pub const NO_VALID_LABELS: &str =
    "No valid damage labels provided. Must be: scratches, dents, or structural damage";

/// Caller-supplied (damage type, severity) pair, not yet validated
///
/// Both fields must be present; their values are checked by [`RawAssessment::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAssessment {
    pub damage_type: String,
    pub severity: String,
}

impl RawAssessment {
    pub fn new(damage_type: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            damage_type: damage_type.into(),
            severity: severity.into(),
        }
    }

    /// The validated pair, or `None` if either side is outside the vocabulary
    pub fn resolve(&self) -> Option<(DamageType, Severity)> {
        Some((
            DamageType::from_label(&self.damage_type)?,
            Severity::from_label(&self.severity)?,
        ))
    }
}

/// What to price
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimateRequest {
    Assessments(Vec<RawAssessment>),
    Labels {
        labels: Option<Vec<String>>,
        severity: Option<String>,
    },
}

impl EstimateRequest {
    /// Picks the request shape from the optional inputs of an API call
    ///
    /// A non-empty assessment list always wins; anything else falls back to
    /// the label form, which then validates its own inputs.
    pub fn select(
        assessments: Option<Vec<RawAssessment>>,
        labels: Option<Vec<String>>,
        severity: Option<String>,
    ) -> Self {
        match assessments {
            Some(list) if !list.is_empty() => EstimateRequest::Assessments(list),
            _ => EstimateRequest::Labels { labels, severity },
        }
    }
}

/// One priced entry of an estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateLineItem {
    pub damage_type: DamageType,
    pub damage_severity: Severity,
    pub base_cost: i64,
    pub parts_cost: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub labor_hours: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub labor_cost: Decimal,
    pub notes: Option<String>,
}

impl From<&CostReferenceRow> for EstimateLineItem {
    fn from(row: &CostReferenceRow) -> Self {
        Self {
            damage_type: row.damage_type,
            damage_severity: row.damage_severity,
            base_cost: row.base_cost,
            parts_cost: row.parts_cost,
            labor_hours: row.labor_hours,
            labor_cost: row.labor_cost(),
            notes: row.notes.clone(),
        }
    }
}

/// A priced repair estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub total_base_cost: i64,
    pub total_parts_cost: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_labor_hours: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_labor_cost: Decimal,
    pub line_items: Vec<EstimateLineItem>,
}

/// Sums matched reference rows into an estimate
///
/// # Errors
///
/// `ClaimError::NoCostReference` when no rows were matched.
pub fn aggregate<'a, I>(rows: I) -> Result<EstimateResult, ClaimError>
where
    I: IntoIterator<Item = &'a CostReferenceRow>,
{
    let line_items: Vec<EstimateLineItem> = rows.into_iter().map(EstimateLineItem::from).collect();
    if line_items.is_empty() {
        return Err(ClaimError::NoCostReference);
    }

    let total_base_cost = line_items.iter().map(|l| l.base_cost).sum();
    let total_parts_cost = line_items.iter().map(|l| l.parts_cost).sum();
    let total_labor_hours: Decimal = line_items.iter().map(|l| l.labor_hours).sum();

    Ok(EstimateResult {
        total_base_cost,
        total_parts_cost,
        total_labor_hours,
        total_labor_cost: labor_cost(total_labor_hours),
        line_items,
    })
}

/// Prices explicit pairs; invalid pairs are dropped and unpriced pairs skipped
pub fn estimate_from_assessments(
    table: &CostTable,
    assessments: &[RawAssessment],
) -> Result<EstimateResult, ClaimError> {
    let mut matched = Vec::with_capacity(assessments.len());
    for raw in assessments {
        let Some((damage_type, severity)) = raw.resolve() else {
            warn!(
                damage_type = %raw.damage_type,
                severity = %raw.severity,
                "dropping assessment outside the damage vocabulary"
            );
            continue;
        };
        match table.lookup(damage_type, severity) {
            Some(row) => matched.push(row),
            None => debug!(%damage_type, %severity, "no cost reference row for assessment"),
        }
    }
    aggregate(matched)
}

/// Prices a label list under one shared severity
///
/// # Errors
///
/// * `ClaimError::Validation` for missing labels, a missing or unknown
///   severity, or when no label survives normalisation
/// * `ClaimError::NoCostReference` when nothing matched
pub fn estimate_from_labels(
    table: &CostTable,
    labels: Option<&[String]>,
    severity: Option<&str>,
) -> Result<EstimateResult, ClaimError> {
    let labels = match labels {
        Some(labels) if !labels.is_empty() => labels,
        _ => return Err(ClaimError::validation(LABELS_REQUIRED)),
    };
    let severity = severity
        .and_then(Severity::from_label)
        .ok_or_else(|| ClaimError::validation(SEVERITY_REQUIRED))?;

    let types: HashSet<DamageType> = labels
        .iter()
        .filter_map(|label| {
            let parsed = DamageType::from_label(&label.to_lowercase());
            if parsed.is_none() {
                warn!(label = %label, "dropping unknown damage label");
            }
            parsed
        })
        .collect();
    if types.is_empty() {
        return Err(ClaimError::validation(NO_VALID_LABELS));
    }

    aggregate(table.matching(&types, severity))
}

/// Prices either request shape
pub fn estimate(table: &CostTable, request: &EstimateRequest) -> Result<EstimateResult, ClaimError> {
    match request {
        EstimateRequest::Assessments(list) => estimate_from_assessments(table, list),
        EstimateRequest::Labels { labels, severity } => {
            estimate_from_labels(table, labels.as_deref(), severity.as_deref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> CostTable {
        CostTable::load(vec![
            CostReferenceRow::priced(DamageType::Scratches, Severity::Minor, 500, dec!(1.00), None),
            CostReferenceRow::priced(DamageType::Scratches, Severity::Major, 1200, dec!(3.00), None),
            CostReferenceRow::priced(DamageType::Dents, Severity::Minor, 600, dec!(2.00), None),
            CostReferenceRow::priced(DamageType::Dents, Severity::Major, 900, dec!(2.00), None),
            CostReferenceRow::priced(
                DamageType::StructuralDamage,
                Severity::Major,
                6000,
                dec!(20.00),
                Some("Frame work".to_string()),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_assessment_pairs_are_summed() {
        let result = estimate_from_assessments(
            &table(),
            &[RawAssessment::new("scratches", "minor"), RawAssessment::new("dents", "major")],
        )
        .unwrap();

        assert_eq!(result.total_base_cost, 1400);
        assert_eq!(result.total_parts_cost, 1100);
        assert_eq!(result.total_labor_hours, dec!(3.00));
        assert_eq!(result.total_labor_cost, dec!(300));
        assert_eq!(result.line_items.len(), 2);
        assert_eq!(result.line_items[1].labor_cost, dec!(200));
    }

    #[test]
    fn test_spaced_structural_label() {
        let result = estimate_from_assessments(
            &table(),
            &[RawAssessment::new("structural damage", "major")],
        )
        .unwrap();
        assert_eq!(result.line_items[0].damage_type, DamageType::StructuralDamage);
        assert_eq!(result.line_items[0].notes.as_deref(), Some("Frame work"));
    }

    #[test]
    fn test_invalid_pairs_dropped_and_misses_skipped() {
        let result = estimate_from_assessments(
            &table(),
            &[
                RawAssessment::new("rust", "minor"),
                RawAssessment::new("dents", "severe"),
                RawAssessment::new("structural_damage", "minor"),
                RawAssessment::new("dents", "minor"),
            ],
        )
        .unwrap();
        assert_eq!(result.line_items.len(), 1);
        assert_eq!(result.total_base_cost, 600);
    }

    #[test]
    fn test_duplicate_pairs_counted_twice() {
        let result = estimate_from_assessments(
            &table(),
            &[RawAssessment::new("dents", "minor"), RawAssessment::new("dents", "minor")],
        )
        .unwrap();
        assert_eq!(result.total_base_cost, 1200);
        assert_eq!(result.line_items.len(), 2);
    }

    #[test]
    fn test_nothing_priced_is_not_found() {
        let err = estimate_from_assessments(&table(), &[RawAssessment::new("nope", "minor")]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_labels_require_labels_and_severity() {
        let t = table();
        let err = estimate_from_labels(&t, None, Some("minor")).unwrap_err();
        assert_eq!(err.to_string(), LABELS_REQUIRED);

        let err = estimate_from_labels(&t, Some(&[]), Some("minor")).unwrap_err();
        assert!(err.is_validation());

        let labels = vec!["dents".to_string()];
        let err = estimate_from_labels(&t, Some(&labels), None).unwrap_err();
        assert_eq!(err.to_string(), SEVERITY_REQUIRED);

        let err = estimate_from_labels(&t, Some(&labels), Some("Major")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_labels_without_valid_entries() {
        let labels = vec!["rust".to_string(), "glass".to_string()];
        let err = estimate_from_labels(&table(), Some(&labels), Some("minor")).unwrap_err();
        assert_eq!(err.to_string(), NO_VALID_LABELS);
    }

    #[test]
    fn test_labels_are_case_folded_and_deduplicated() {
        let labels = vec![
            "Dents".to_string(),
            "SCRATCHES".to_string(),
            "dents".to_string(),
            "rust".to_string(),
        ];
        let result = estimate_from_labels(&table(), Some(&labels), Some("major")).unwrap();
        let types: Vec<_> = result.line_items.iter().map(|l| l.damage_type).collect();
        // table order, each row once
        assert_eq!(types, vec![DamageType::Scratches, DamageType::Dents]);
        assert_eq!(result.total_base_cost, 2100);
    }

    #[test]
    fn test_labels_with_no_matching_rows() {
        let labels = vec!["structural damage".to_string()];
        let err = estimate_from_labels(&table(), Some(&labels), Some("minor")).unwrap_err();
        assert!(matches!(err, ClaimError::NoCostReference));
    }

    #[test]
    fn test_request_selection() {
        let pairs = vec![RawAssessment::new("dents", "minor")];
        assert_eq!(
            EstimateRequest::select(Some(pairs.clone()), Some(vec!["scratches".into()]), None),
            EstimateRequest::Assessments(pairs)
        );
        assert!(matches!(
            EstimateRequest::select(Some(vec![]), None, Some("minor".into())),
            EstimateRequest::Labels { .. }
        ));
    }

    #[test]
    fn test_estimate_dispatch() {
        let request = EstimateRequest::Labels {
            labels: Some(vec!["dents".to_string()]),
            severity: Some("minor".to_string()),
        };
        assert_eq!(estimate(&table(), &request).unwrap().total_base_cost, 600);
    }

    #[test]
    fn test_raw_assessment_requires_both_fields() {
        let parsed: RawAssessment =
            serde_json::from_value(serde_json::json!({"damage_type": "dents", "severity": "minor"})).unwrap();
        assert_eq!(parsed, RawAssessment::new("dents", "minor"));

        assert!(serde_json::from_value::<RawAssessment>(serde_json::json!({"damage_type": "dents"})).is_err());
        assert!(serde_json::from_value::<RawAssessment>(serde_json::json!({"severity": "major"})).is_err());
    }

    #[test]
    fn test_json_numbers() {
        let result = estimate_from_assessments(&table(), &[RawAssessment::new("scratches", "major")]).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_labor_hours"], serde_json::json!(3.0));
        assert_eq!(json["total_labor_cost"], serde_json::json!(300.0));
        assert_eq!(json["line_items"][0]["damage_severity"], "major");
    }
}
