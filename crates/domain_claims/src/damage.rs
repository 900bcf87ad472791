//! Damage vocabulary shared by the classifier, the cost table and the estimate

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClaimError;

/// Kind of vehicle damage the pipeline recognises
///
/// Variants are declared in check order; every ordered output of the
/// classifier and the reasoning text follows this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Scratches,
    Dents,
    StructuralDamage,
}

impl DamageType {
    /// All damage types in check order
    pub const ALL: [DamageType; 3] = [
        DamageType::Scratches,
        DamageType::Dents,
        DamageType::StructuralDamage,
    ];

    /// Stored/serialized label
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Scratches => "scratches",
            DamageType::Dents => "dents",
            DamageType::StructuralDamage => "structural_damage",
        }
    }

    /// Parses a caller-supplied label
    ///
    /// Accepts the stored labels plus the spaced spelling `"structural damage"`.
    /// Matching is exact; callers that want case folding lowercase first.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "scratches" => Some(DamageType::Scratches),
            "dents" => Some(DamageType::Dents),
            "structural_damage" | "structural damage" => Some(DamageType::StructuralDamage),
            _ => None,
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DamageType {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DamageType::from_label(s)
            .ok_or_else(|| ClaimError::UnknownReference(format!("damage type '{}'", s)))
    }
}

/// Two-level damage magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Major,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Major => "major",
        }
    }

    /// Parses `"minor"` or `"major"` exactly
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "minor" => Some(Severity::Minor),
            "major" => Some(Severity::Major),
            _ => None,
        }
    }

    /// Picks `Major` when the escalation condition holds
    pub fn escalate_if(major: bool) -> Self {
        if major {
            Severity::Major
        } else {
            Severity::Minor
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::from_label(s)
            .ok_or_else(|| ClaimError::UnknownReference(format!("severity '{}'", s)))
    }
}

/// One (damage type, severity) classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DamageFinding {
    pub damage_type: DamageType,
    pub severity: Severity,
}

impl DamageFinding {
    pub fn new(damage_type: DamageType, severity: Severity) -> Self {
        Self { damage_type, severity }
    }
}

/// Outcome status of a damage analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Success,
}

/// Structured result of one damage analysis
///
/// Persisted verbatim as the assessment blob of a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageAssessmentResult {
    pub status: AnalysisStatus,
    pub damage_labels: Vec<DamageType>,
    pub damage_assessments: Vec<DamageFinding>,
    pub reasoning: String,
}

impl DamageAssessmentResult {
    /// Builds a successful result; labels are derived from the findings in order
    pub fn from_findings(findings: Vec<DamageFinding>, reasoning: impl Into<String>) -> Self {
        Self {
            status: AnalysisStatus::Success,
            damage_labels: findings.iter().map(|f| f.damage_type).collect(),
            damage_assessments: findings,
            reasoning: reasoning.into(),
        }
    }
}
