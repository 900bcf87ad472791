//! Unit tests for the identifiers module
//!
//! Covers creation, ordering, parsing, conversion and display of the
//! pipeline identifiers.

use core_kernel::{AssessmentId, AuditEventId, ClaimId, EstimateId, RepairShopId, ReviewId};
use uuid::Uuid;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ClaimId::new();
        let id2 = ClaimId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ClaimId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ClaimId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ClaimId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_parse_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: ClaimId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("CLM-not-a-uuid".parse::<ClaimId>().is_err());
    }
}

mod prefix_tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(ClaimId::prefix(), "CLM");
        assert_eq!(AssessmentId::prefix(), "DMG");
        assert_eq!(EstimateId::prefix(), "EST");
        assert_eq!(ReviewId::prefix(), "REV");
        assert_eq!(RepairShopId::prefix(), "SHOP");
        assert_eq!(AuditEventId::prefix(), "AUD");
    }

    #[test]
    fn test_display_round_trip() {
        let id = AssessmentId::new_v7();
        let display = id.to_string();
        assert!(display.starts_with("DMG-"));
        assert_eq!(display.parse::<AssessmentId>().unwrap(), id);
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_serializes_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id = ReviewId::from(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));

        let back: ReviewId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
