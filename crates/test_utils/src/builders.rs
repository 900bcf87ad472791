//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Map, Value};

use domain_claims::{CostReferenceRow, DamageType, Severity};

/// Builder for cost reference rows that satisfy the pricing invariant
pub struct CostReferenceRowBuilder {
    damage_type: DamageType,
    severity: Severity,
    base_cost: i64,
    labor_hours: Decimal,
    notes: Option<String>,
}

impl Default for CostReferenceRowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CostReferenceRowBuilder {
    /// Creates a new builder for a minor scratches row at 500 / 1.00 h
    pub fn new() -> Self {
        Self {
            damage_type: DamageType::Scratches,
            severity: Severity::Minor,
            base_cost: 500,
            labor_hours: dec!(1.00),
            notes: None,
        }
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = damage_type;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_base_cost(mut self, base_cost: i64) -> Self {
        self.base_cost = base_cost;
        self
    }

    pub fn with_labor_hours(mut self, labor_hours: Decimal) -> Self {
        self.labor_hours = labor_hours;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builds the row with `parts_cost` derived from base cost and labor
    pub fn build(self) -> CostReferenceRow {
        CostReferenceRow::priced(
            self.damage_type,
            self.severity,
            self.base_cost,
            self.labor_hours,
            self.notes,
        )
    }
}

/// Builder for estimate snapshots as the review stage receives them
#[derive(Default)]
pub struct EstimateSnapshotBuilder {
    fields: Map<String, Value>,
}

impl EstimateSnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary field, e.g. a numeric string or garbage value
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn with_base_cost(self, amount: impl Into<Value>) -> Self {
        self.with_field("total_base_cost", amount)
    }

    pub fn with_parts_cost(self, amount: impl Into<Value>) -> Self {
        self.with_field("total_parts_cost", amount)
    }

    pub fn with_labor_cost(self, amount: impl Into<Value>) -> Self {
        self.with_field("total_labor_cost", amount)
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}
