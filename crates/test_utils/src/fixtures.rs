//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the claims intake pipeline. Photos are
//! synthesised and PNG-encoded so their decoded pixels, and therefore their
//! damage signals, are known exactly.

use std::io::Cursor;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use domain_claims::{CostReferenceRow, CostTable, DamageType, RepairShop, Severity};

/// Fixture for the cost reference table
pub struct CostFixtures;

impl CostFixtures {
    /// The six seeded reference rows, in table order
    pub fn reference_rows() -> Vec<CostReferenceRow> {
        vec![
            CostReferenceRow::priced(
                DamageType::Scratches,
                Severity::Minor,
                500,
                dec!(1.00),
                Some("Touch-up paint and polish".to_string()),
            ),
            CostReferenceRow::priced(
                DamageType::Scratches,
                Severity::Major,
                1200,
                dec!(3.00),
                Some("Panel respray".to_string()),
            ),
            CostReferenceRow::priced(
                DamageType::Dents,
                Severity::Minor,
                600,
                dec!(2.00),
                Some("Paintless dent repair".to_string()),
            ),
            CostReferenceRow::priced(
                DamageType::Dents,
                Severity::Major,
                900,
                dec!(2.00),
                Some("Panel beating and refinish".to_string()),
            ),
            CostReferenceRow::priced(
                DamageType::StructuralDamage,
                Severity::Minor,
                2500,
                dec!(8.00),
                Some("Frame alignment check and minor straightening".to_string()),
            ),
            CostReferenceRow::priced(
                DamageType::StructuralDamage,
                Severity::Major,
                6000,
                dec!(20.00),
                Some("Frame straightening and structural member replacement".to_string()),
            ),
        ]
    }

    /// The reference rows loaded into a table
    pub fn table() -> Arc<CostTable> {
        match CostTable::load(Self::reference_rows()) {
            Ok(table) => Arc::new(table),
            Err(err) => panic!("reference fixture rows must load: {}", err),
        }
    }
}

/// Fixture for approved repair shops
pub struct ShopFixtures;

impl ShopFixtures {
    pub fn approved_shops() -> Vec<RepairShop> {
        vec![
            RepairShop::new("Downtown Collision Center")
                .with_address("120 Main St")
                .with_phone("555-0101"),
            RepairShop::new("Northside Auto Body")
                .with_address("48 Elm Ave")
                .with_phone("555-0142"),
        ]
    }
}

/// Fixture for synthetic, losslessly encoded vehicle photos
pub struct ImageFixtures;

impl ImageFixtures {
    /// Encodes an RGB bitmap as PNG
    pub fn encode_png(rgb: RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        if let Err(err) = DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png) {
            panic!("PNG encoding of a fixture image failed: {}", err);
        }
        bytes
    }

    /// A single-colour photo
    pub fn solid_png(width: u32, height: u32, value: u8) -> Vec<u8> {
        Self::encode_png(RgbImage::from_pixel(width, height, Rgb([value, value, value])))
    }

    /// Mid-grey 64x64 photo; no rule fires, so the filename fallback decides
    pub fn plain_png() -> Vec<u8> {
        Self::solid_png(64, 64, 90)
    }

    /// Near-black 64x64 photo; classifies as major dents only
    pub fn dark_png() -> Vec<u8> {
        Self::solid_png(64, 64, 10)
    }

    /// Black and white vertical stripes, 4 px wide; major on every rule
    pub fn striped_png() -> Vec<u8> {
        let rgb = RgbImage::from_fn(64, 64, |x, _| {
            if (x / 4) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        Self::encode_png(rgb)
    }

    /// Large photo that must be thumbnailed before analysis
    pub fn oversized_png() -> Vec<u8> {
        Self::solid_png(1600, 900, 10)
    }

    pub fn not_an_image() -> Vec<u8> {
        b"%PDF-1.4 definitely not a bitmap".to_vec()
    }
}

/// Fixture for estimate snapshots handed to the review stage
pub struct SnapshotFixtures;

impl SnapshotFixtures {
    /// Parts 1100 and labor 300; approves 1400
    pub fn parts_and_labor() -> Value {
        json!({
            "total_base_cost": 1400,
            "total_parts_cost": 1100,
            "total_labor_hours": 3.0,
            "total_labor_cost": 300.0,
            "line_items": []
        })
    }

    /// Only a base total; approves 1400
    pub fn base_only() -> Value {
        json!({"total_base_cost": 1400})
    }

    /// No usable totals; approves the default
    pub fn empty() -> Value {
        json!({})
    }
}

/// Fixture for timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    pub fn review_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// Fixture for filenames with known fallback bundles
pub struct FilenameFixtures;

impl FilenameFixtures {
    /// `fnv1a_32 % 4 == 0`
    pub fn bundle_0() -> &'static str {
        "car.jpg"
    }

    /// `fnv1a_32 % 4 == 1`
    pub fn bundle_1() -> &'static str {
        "front.jpg"
    }

    /// `fnv1a_32 % 4 == 2`
    pub fn bundle_2() -> &'static str {
        "rear.jpg"
    }

    /// `fnv1a_32 % 4 == 3`
    pub fn bundle_3() -> &'static str {
        "default.jpg"
    }
}
