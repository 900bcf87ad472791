//! Static repair cost reference data
//!
//! The table is loaded once at startup and only read afterwards. Loading is
//! where the pricing invariant `base_cost == parts_cost + labor_hours * rate`
//! is enforced; estimates trust the stored `parts_cost` and never re-derive it.

use std::collections::HashSet;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::damage::{DamageType, Severity};
use crate::error::ClaimError;

/// Fixed labor rate in currency units per hour
pub const LABOR_RATE_PER_HOUR: Decimal = dec!(100);

/// Labor cost for a number of hours at [`LABOR_RATE_PER_HOUR`]
pub fn labor_cost(hours: Decimal) -> Decimal {
    hours * LABOR_RATE_PER_HOUR
}

/// Priced template for one (damage type, severity) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostReferenceRow {
    pub damage_type: DamageType,
    pub damage_severity: Severity,
    pub base_cost: i64,
    pub parts_cost: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub labor_hours: Decimal,
    pub notes: Option<String>,
}

impl CostReferenceRow {
    /// Builds a row whose `parts_cost` is derived from the pricing invariant
    ///
    /// Mirrors how reference data is seeded: `parts_cost = base_cost - labor_hours * rate`.
    pub fn priced(
        damage_type: DamageType,
        damage_severity: Severity,
        base_cost: i64,
        labor_hours: Decimal,
        notes: Option<String>,
    ) -> Self {
        let labor = labor_cost(labor_hours).round().to_i64().unwrap_or(0);
        Self {
            damage_type,
            damage_severity,
            base_cost,
            parts_cost: base_cost - labor,
            labor_hours,
            notes,
        }
    }

    pub fn labor_cost(&self) -> Decimal {
        labor_cost(self.labor_hours)
    }

    /// True when `base_cost == parts_cost + labor_hours * rate`
    pub fn is_consistent(&self) -> bool {
        Decimal::from(self.base_cost) == Decimal::from(self.parts_cost) + self.labor_cost()
    }

    pub fn key(&self) -> (DamageType, Severity) {
        (self.damage_type, self.damage_severity)
    }
}

/// Validated, read-only cost reference table
#[derive(Debug, Clone, Default)]
pub struct CostTable {
    rows: Vec<CostReferenceRow>,
}

impl CostTable {
    /// Validates and loads reference rows, keeping their order
    ///
    /// # Errors
    ///
    /// * `ClaimError::InconsistentReference` if a row breaks the pricing invariant
    /// * `ClaimError::DuplicateReference` if a (type, severity) pair appears twice
    pub fn load(rows: Vec<CostReferenceRow>) -> Result<Self, ClaimError> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !row.is_consistent() {
                return Err(ClaimError::InconsistentReference {
                    damage_type: row.damage_type.to_string(),
                    severity: row.damage_severity.to_string(),
                    base_cost: row.base_cost,
                    parts_cost: row.parts_cost,
                });
            }
            if !seen.insert(row.key()) {
                return Err(ClaimError::DuplicateReference {
                    damage_type: row.damage_type.to_string(),
                    severity: row.damage_severity.to_string(),
                });
            }
        }

        info!(rows = rows.len(), "cost reference table loaded");
        Ok(Self { rows })
    }

    /// Exact-match lookup
    pub fn lookup(&self, damage_type: DamageType, severity: Severity) -> Option<&CostReferenceRow> {
        self.rows
            .iter()
            .find(|row| row.damage_type == damage_type && row.damage_severity == severity)
    }

    /// Rows of one severity whose type is among `types`, in table order
    pub fn matching<'a>(
        &'a self,
        types: &'a HashSet<DamageType>,
        severity: Severity,
    ) -> impl Iterator<Item = &'a CostReferenceRow> + 'a {
        self.rows
            .iter()
            .filter(move |row| row.damage_severity == severity && types.contains(&row.damage_type))
    }

    pub fn rows(&self) -> &[CostReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
