//! Human-readable explanation of classifier findings

use crate::damage::{DamageFinding, DamageType, Severity};

/// Emitted when there are no findings at all
pub const NO_DAMAGE_SENTENCE: &str =
    "Image analysis completed. No significant damage patterns detected.";

fn sentence(damage_type: DamageType, severity: Severity) -> &'static str {
    match (damage_type, severity) {
        (DamageType::Scratches, Severity::Major) => {
            "Extensive paint scratches detected across the vehicle surface, indicating significant contact damage."
        }
        (DamageType::Scratches, Severity::Minor) => {
            "Surface-level scratches identified, primarily affecting the paint layer."
        }
        (DamageType::Dents, Severity::Major) => {
            "Substantial dents detected in multiple areas, suggesting significant impact."
        }
        (DamageType::Dents, Severity::Minor) => "Minor dents identified in localized areas.",
        (DamageType::StructuralDamage, Severity::Major) => {
            "Major structural damage detected, requiring professional evaluation and extensive repair work."
        }
        (DamageType::StructuralDamage, Severity::Minor) => {
            "Minor structural concerns identified that may require professional assessment."
        }
    }
}

/// Composes one sentence per damage type present, in check order
///
/// If a type appears more than once, its first finding decides the wording.
pub fn synthesize(findings: &[DamageFinding]) -> String {
    let parts: Vec<&str> = DamageType::ALL
        .iter()
        .filter_map(|&damage_type| {
            findings
                .iter()
                .find(|f| f.damage_type == damage_type)
                .map(|f| sentence(damage_type, f.severity))
        })
        .collect();

    if parts.is_empty() {
        NO_DAMAGE_SENTENCE.to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_findings() {
        assert_eq!(synthesize(&[]), NO_DAMAGE_SENTENCE);
    }

    #[test]
    fn test_major_scratches_wording() {
        let text = synthesize(&[DamageFinding::new(DamageType::Scratches, Severity::Major)]);
        assert!(text.contains("significant contact damage"));
    }

    #[test]
    fn test_check_order_regardless_of_input_order() {
        let text = synthesize(&[
            DamageFinding::new(DamageType::StructuralDamage, Severity::Minor),
            DamageFinding::new(DamageType::Scratches, Severity::Minor),
        ]);
        assert_eq!(
            text,
            "Surface-level scratches identified, primarily affecting the paint layer. \
Minor structural concerns identified that may require professional assessment."
        );
    }

    #[test]
    fn test_first_duplicate_wins() {
        let text = synthesize(&[
            DamageFinding::new(DamageType::Dents, Severity::Minor),
            DamageFinding::new(DamageType::Dents, Severity::Major),
        ]);
        assert_eq!(text, "Minor dents identified in localized areas.");
    }
}
