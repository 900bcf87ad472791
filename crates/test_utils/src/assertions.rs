//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use rust_decimal::Decimal;

use domain_claims::{
    DamageAssessmentResult, DamageType, EstimateResult, ReviewDecision, LABOR_RATE_PER_HOUR,
};

/// Asserts that line-item labor sums to the total and totals match their parts
///
/// # Panics
///
/// Panics if any total differs from the sum over line items, or if a labor
/// cost is not hours times the labor rate.
pub fn assert_estimate_consistent(estimate: &EstimateResult) {
    let line_labor: Decimal = estimate.line_items.iter().map(|l| l.labor_cost).sum();
    assert_eq!(
        line_labor, estimate.total_labor_cost,
        "Line labor {} does not sum to total labor {}",
        line_labor, estimate.total_labor_cost
    );

    let hours: Decimal = estimate.line_items.iter().map(|l| l.labor_hours).sum();
    assert_eq!(hours, estimate.total_labor_hours, "Line hours do not sum to total hours");
    assert_eq!(
        estimate.total_labor_cost,
        estimate.total_labor_hours * LABOR_RATE_PER_HOUR,
        "Total labor cost is not hours x rate"
    );

    let base: i64 = estimate.line_items.iter().map(|l| l.base_cost).sum();
    let parts: i64 = estimate.line_items.iter().map(|l| l.parts_cost).sum();
    assert_eq!(base, estimate.total_base_cost, "Line base costs do not sum to total");
    assert_eq!(parts, estimate.total_parts_cost, "Line parts costs do not sum to total");

    for line in &estimate.line_items {
        assert_eq!(
            line.labor_cost,
            line.labor_hours * LABOR_RATE_PER_HOUR,
            "Line {}/{} labor cost is not hours x rate",
            line.damage_type,
            line.damage_severity
        );
    }
}

/// Asserts the four estimate totals
pub fn assert_estimate_totals(
    estimate: &EstimateResult,
    base: i64,
    parts: i64,
    hours: Decimal,
    labor: Decimal,
) {
    assert_eq!(estimate.total_base_cost, base, "total_base_cost");
    assert_eq!(estimate.total_parts_cost, parts, "total_parts_cost");
    assert_eq!(estimate.total_labor_hours, hours, "total_labor_hours");
    assert_eq!(estimate.total_labor_cost, labor, "total_labor_cost");
}

/// Asserts that labels mirror findings and both follow check order
pub fn assert_findings_in_check_order(result: &DamageAssessmentResult) {
    let types: Vec<DamageType> = result.damage_assessments.iter().map(|f| f.damage_type).collect();
    assert_eq!(result.damage_labels, types, "Labels do not mirror findings");

    let mut sorted = types.clone();
    sorted.sort();
    assert_eq!(types, sorted, "Findings are not in check order: {:?}", types);
}

/// Asserts that a decision approved exactly `expected`
pub fn assert_approved_amount(decision: &ReviewDecision, expected: Decimal) {
    match decision {
        ReviewDecision::Approved(approval) => assert_eq!(
            approval.approved_amount, expected,
            "Approved amount mismatch: actual={}, expected={}",
            approval.approved_amount, expected
        ),
        ReviewDecision::Denied(denial) => {
            panic!("Expected an approval, got a denial: {}", denial.denial_comments)
        }
    }
}
