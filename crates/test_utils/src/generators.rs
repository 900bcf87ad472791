//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::{CostReferenceRow, DamageFinding, DamageSignal, DamageType, RawAssessment, Severity};

pub fn damage_type_strategy() -> impl Strategy<Value = DamageType> {
    prop_oneof![
        Just(DamageType::Scratches),
        Just(DamageType::Dents),
        Just(DamageType::StructuralDamage),
    ]
}

pub fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![Just(Severity::Minor), Just(Severity::Major)]
}

pub fn finding_strategy() -> impl Strategy<Value = DamageFinding> {
    (damage_type_strategy(), severity_strategy())
        .prop_map(|(damage_type, severity)| DamageFinding::new(damage_type, severity))
}

/// Signals spanning both sides of every classifier threshold
pub fn damage_signal_strategy() -> impl Strategy<Value = DamageSignal> {
    (0.0f64..255.0, 0.0f64..=1.0, 0.0f64..5000.0, 0.0f64..=1.0).prop_map(
        |(edge_intensity, dark_ratio, contrast_variance, edge_ratio)| DamageSignal {
            edge_intensity,
            dark_ratio,
            contrast_variance,
            edge_ratio,
        },
    )
}

/// Labor hours with two decimal places, 0.25 to 40.00
pub fn labor_hours_strategy() -> impl Strategy<Value = Decimal> {
    (25i64..=4000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// A reference row satisfying the pricing invariant
pub fn cost_row_strategy() -> impl Strategy<Value = CostReferenceRow> {
    (damage_type_strategy(), severity_strategy(), 25i64..=4000i64, 0i64..10_000)
        .prop_map(|(damage_type, severity, hour_cents, parts)| {
            // at 100 per hour, labor in whole units equals the hours in cents
            let hours = Decimal::new(hour_cents, 2);
            CostReferenceRow::priced(damage_type, severity, parts + hour_cents, hours, None)
        })
}

/// Assessment pairs mixing valid vocabulary with junk
pub fn raw_assessment_strategy() -> impl Strategy<Value = RawAssessment> {
    let damage_type = prop_oneof![
        Just("scratches".to_string()),
        Just("dents".to_string()),
        Just("structural_damage".to_string()),
        Just("structural damage".to_string()),
        "[a-z ]{0,12}",
    ];
    let severity = prop_oneof![
        Just("minor".to_string()),
        Just("major".to_string()),
        "[a-zA-Z]{0,6}",
    ];
    (damage_type, severity).prop_map(|(damage_type, severity)| RawAssessment::new(damage_type, severity))
}

/// Filenames as uploads carry them
pub fn filename_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,16}\\.(jpg|jpeg|png|webp)"
}
