//! HTTP tests for the claims API, wired to the in-memory claim store

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use domain_claims::ports::mock::MockClaimRecordPort;
use domain_claims::{
    AuditLogType, DamageFinding, DamageType, HeuristicAgent, ReviewDecision, Severity,
    DEFAULT_APPROVED_AMOUNT,
};
use interface_api::config::ApiConfig;
use interface_api::dto::claims::{
    AnalyzeDamageResponse, DenyClaimResponse, GenerateEstimateResponse, ReviewEstimateResponse,
};
use interface_api::dto::shops::RepairShopsResponse;
use interface_api::handlers::health::{HealthResponse, RootResponse};
use interface_api::{create_router, AppState};
use test_utils::{
    assert_approved_amount, assert_estimate_consistent, assert_estimate_totals, CostFixtures,
    FilenameFixtures, ImageFixtures, ShopFixtures, SnapshotFixtures,
};

fn mock_store() -> Arc<MockClaimRecordPort> {
    Arc::new(MockClaimRecordPort::with_reference(
        CostFixtures::reference_rows(),
        ShopFixtures::approved_shops(),
    ))
}

fn server_with(store: Arc<MockClaimRecordPort>, config: ApiConfig) -> TestServer {
    let agent = Arc::new(HeuristicAgent::new(CostFixtures::table()));
    TestServer::new(create_router(AppState::new(store, agent, config))).unwrap()
}

fn server(store: Arc<MockClaimRecordPort>) -> TestServer {
    server_with(store, ApiConfig::default())
}

fn photo_form(bytes: Vec<u8>, filename: &str, mime: &str) -> MultipartForm {
    MultipartForm::new().add_part("image", Part::bytes(bytes).file_name(filename).mime_type(mime))
}

// ============================================================================
// Health Tests
// ============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_root_banner() {
        let response = server(mock_store()).get("/").await;

        response.assert_status_ok();
        assert_eq!(response.json::<RootResponse>().message, "Claims Processing API");
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = server(mock_store()).get("/health").await;

        response.assert_status_ok();
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_readiness_with_healthy_store() {
        let response = server(mock_store()).get("/health/ready").await;

        response.assert_status_ok();
        assert_eq!(response.json::<HealthResponse>().status, "ready");
    }

    #[tokio::test]
    async fn test_readiness_with_unhealthy_store() {
        let store = Arc::new(
            MockClaimRecordPort::with_reference(CostFixtures::reference_rows(), vec![]).unhealthy(),
        );
        let response = server(store).get("/health/ready").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = response.json();
        assert_eq!(body["error"], "unavailable");
    }
}

// ============================================================================
// Damage Analysis Tests
// ============================================================================

mod analyze_damage_tests {
    use super::*;

    #[tokio::test]
    async fn test_dark_photo_opens_claim() {
        let store = mock_store();
        let form = photo_form(ImageFixtures::dark_png(), "front.jpg", "image/png")
            .add_text("policy_number", "POL-2024-001")
            .add_text("accident_description", "Reversed into a bollard");

        let response = server(store.clone()).post("/api/analyze-damage").multipart(form).await;

        response.assert_status_ok();
        let body: AnalyzeDamageResponse = response.json();
        assert!(body.success);
        assert_eq!(
            body.result.damage_assessments,
            vec![DamageFinding::new(DamageType::Dents, Severity::Major)]
        );

        let stored = store.assessment(body.assessment_id).await.unwrap();
        assert_eq!(stored.claim_id, body.claim_id);
        assert_eq!(stored.policy_number.as_deref(), Some("POL-2024-001"));
        assert_eq!(stored.result, body.result);

        let audit = store.audit_log().await;
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].log_type, AuditLogType::DamageAnalysis);
        assert_eq!(audit[0].log_data["image_filename"], "front.jpg");
    }

    #[tokio::test]
    async fn test_plain_photo_uses_filename_fallback() {
        let form = photo_form(ImageFixtures::plain_png(), FilenameFixtures::bundle_0(), "image/png");

        let response = server(mock_store()).post("/api/analyze-damage").multipart(form).await;

        response.assert_status_ok();
        let body: AnalyzeDamageResponse = response.json();
        assert_eq!(
            body.result.damage_assessments,
            vec![
                DamageFinding::new(DamageType::Scratches, Severity::Minor),
                DamageFinding::new(DamageType::Dents, Severity::Major),
            ]
        );
    }

    #[tokio::test]
    async fn test_undecodable_upload_still_succeeds() {
        let form = photo_form(ImageFixtures::not_an_image(), FilenameFixtures::bundle_1(), "image/jpeg");

        let response = server(mock_store()).post("/api/analyze-damage").multipart(form).await;

        response.assert_status_ok();
        let body: AnalyzeDamageResponse = response.json();
        assert_eq!(
            body.result.damage_assessments,
            vec![DamageFinding::new(DamageType::Scratches, Severity::Major)]
        );
    }

    #[tokio::test]
    async fn test_missing_image_is_rejected() {
        let store = mock_store();
        let form = MultipartForm::new().add_text("policy_number", "POL-2024-001");

        let response = server(store.clone()).post("/api/analyze-damage").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(store.audit_log().await.is_empty());
    }

    #[tokio::test]
    async fn test_non_image_content_type_is_rejected() {
        let store = mock_store();
        let form = photo_form(ImageFixtures::dark_png(), "claim.pdf", "application/pdf");

        let response = server(store.clone()).post("/api/analyze-damage").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "bad_request");
        assert_eq!(body["message"], "File must be an image");
        assert!(store.audit_log().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_over_body_limit_is_rejected() {
        let config = ApiConfig {
            max_upload_bytes: 1024,
            ..ApiConfig::default()
        };
        let form = photo_form(vec![0u8; 8 * 1024], "car.jpg", "image/jpeg");

        let response = server_with(mock_store(), config)
            .post("/api/analyze-damage")
            .multipart(form)
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }
}

// ============================================================================
// Estimate Tests
// ============================================================================

mod generate_estimate_tests {
    use super::*;

    #[tokio::test]
    async fn test_estimate_from_assessments() {
        let response = server(mock_store())
            .post("/api/generate-estimate")
            .json(&json!({
                "damage_assessments": [
                    {"damage_type": "scratches", "severity": "minor"},
                    {"damage_type": "dents", "severity": "major"}
                ]
            }))
            .await;

        response.assert_status_ok();
        let body: GenerateEstimateResponse = response.json();
        assert!(body.success);
        assert_eq!(body.claim_id, None);
        assert_estimate_totals(&body.result, 1400, 1100, dec!(3.0), dec!(300));
        assert_estimate_consistent(&body.result);
    }

    #[tokio::test]
    async fn test_estimate_from_labels() {
        let response = server(mock_store())
            .post("/api/generate-estimate")
            .json(&json!({
                "damage_labels": ["Dents", "structural damage", "rust"],
                "damage_severity": "minor"
            }))
            .await;

        response.assert_status_ok();
        let body: GenerateEstimateResponse = response.json();
        assert_estimate_totals(&body.result, 3100, 2100, dec!(10.0), dec!(1000));
    }

    #[tokio::test]
    async fn test_estimate_links_to_analysed_claim() {
        let store = mock_store();
        let server = server(store.clone());

        let analysis: AnalyzeDamageResponse = server
            .post("/api/analyze-damage")
            .multipart(photo_form(ImageFixtures::striped_png(), "side.png", "image/png"))
            .await
            .json();

        let response = server
            .post("/api/generate-estimate")
            .json(&json!({
                "damage_assessment_id": analysis.assessment_id,
                "damage_assessments": analysis.result.damage_assessments,
            }))
            .await;

        response.assert_status_ok();
        let body: GenerateEstimateResponse = response.json();
        assert_eq!(body.claim_id, Some(analysis.claim_id));
        assert_estimate_totals(&body.result, 8100, 5600, dec!(25.0), dec!(2500));

        let stored = store.estimate(body.estimate_id).await.unwrap();
        assert_eq!(stored.damage_assessment_id, Some(analysis.assessment_id));
    }

    #[tokio::test]
    async fn test_missing_severity_is_bad_request() {
        let response = server(mock_store())
            .post("/api/generate-estimate")
            .json(&json!({"damage_labels": ["dents"]}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(
            body["message"],
            "damage_severity must be 'minor' or 'major' when using damage_labels"
        );
    }

    #[tokio::test]
    async fn test_assessment_without_severity_is_rejected() {
        let store = mock_store();
        let response = server(store.clone())
            .post("/api/generate-estimate")
            .json(&json!({"damage_assessments": [{"damage_type": "dents"}]}))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(store.audit_log().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_request_is_bad_request() {
        let response = server(mock_store())
            .post("/api/generate-estimate")
            .json(&json!({}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unpriced_assessments_are_not_found() {
        let store = mock_store();
        let response = server(store.clone())
            .post("/api/generate-estimate")
            .json(&json!({
                "damage_assessments": [{"damage_type": "rust", "severity": "minor"}]
            }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(store.audit_log().await.is_empty());
    }
}

// ============================================================================
// Review Tests
// ============================================================================

mod review_tests {
    use super::*;

    #[tokio::test]
    async fn test_review_approves_snapshot_total() {
        let store = mock_store();
        let response = server(store.clone())
            .post("/api/review-estimate")
            .json(&json!({"estimate_data": SnapshotFixtures::parts_and_labor()}))
            .await;

        response.assert_status_ok();
        let body: ReviewEstimateResponse = response.json();
        assert!(body.success);
        assert_eq!(body.claim_id, None);
        assert_approved_amount(&body.result, dec!(1400));

        let audit = store.audit_log().await;
        assert_eq!(audit[0].log_type, AuditLogType::ClaimApprovalAuthorization);
    }

    #[tokio::test]
    async fn test_review_without_snapshot_uses_default_amount() {
        let response = server(mock_store())
            .post("/api/review-estimate")
            .json(&json!({}))
            .await;

        response.assert_status_ok();
        let body: ReviewEstimateResponse = response.json();
        assert_approved_amount(&body.result, DEFAULT_APPROVED_AMOUNT);
    }

    #[tokio::test]
    async fn test_full_pipeline_links_review_to_claim() {
        let store = mock_store();
        let server = server(store.clone());

        let analysis: AnalyzeDamageResponse = server
            .post("/api/analyze-damage")
            .multipart(photo_form(ImageFixtures::dark_png(), "car.jpg", "image/png"))
            .await
            .json();
        let estimate: GenerateEstimateResponse = server
            .post("/api/generate-estimate")
            .json(&json!({
                "damage_assessment_id": analysis.assessment_id,
                "damage_assessments": analysis.result.damage_assessments,
            }))
            .await
            .json();
        let review: ReviewEstimateResponse = server
            .post("/api/review-estimate")
            .json(&json!({
                "estimate_id": estimate.estimate_id,
                "estimate_data": estimate.result,
            }))
            .await
            .json();

        assert_eq!(review.claim_id, Some(analysis.claim_id));
        assert_approved_amount(&review.result, dec!(900));

        let log_types: Vec<AuditLogType> =
            store.audit_log().await.into_iter().map(|e| e.log_type).collect();
        assert_eq!(
            log_types,
            vec![
                AuditLogType::DamageAnalysis,
                AuditLogType::EstimateGeneration,
                AuditLogType::ClaimApprovalAuthorization,
            ]
        );
    }

    #[tokio::test]
    async fn test_deny_claim_records_comments() {
        let store = mock_store();
        let response = server(store.clone())
            .post("/api/deny-claim")
            .json(&json!({"denial_comments": "Damage predates the policy start date"}))
            .await;

        response.assert_status_ok();
        let body: DenyClaimResponse = response.json();
        assert!(body.success);
        assert_eq!(body.status, "denied");

        let stored = store.review(body.review_id).await.unwrap();
        match stored.decision {
            ReviewDecision::Denied(denial) => {
                assert_eq!(denial.denial_comments, "Damage predates the policy start date")
            }
            other => panic!("expected a denial, got {:?}", other),
        }

        let audit = store.audit_log().await;
        assert_eq!(audit[0].log_type, AuditLogType::ClaimDenial);
        assert_eq!(audit[0].log_data["comments"], "Damage predates the policy start date");
    }
}

// ============================================================================
// Reference Data and Middleware Tests
// ============================================================================

mod reference_tests {
    use super::*;

    #[tokio::test]
    async fn test_approved_repair_shops() {
        let response = server(mock_store()).get("/api/approved-repair-shops").await;

        response.assert_status_ok();
        let body: RepairShopsResponse = response.json();
        assert!(body.success);
        let names: Vec<String> = body.repair_shops.into_iter().map(|shop| shop.name).collect();
        let expected: Vec<String> =
            ShopFixtures::approved_shops().into_iter().map(|shop| shop.name).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let response = server(mock_store()).get("/health").await;

        let request_id = response.header("x-request-id");
        assert!(!request_id.is_empty());
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let response = server(mock_store())
            .get("/health")
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("http://localhost:3000"),
            )
            .await;

        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "http://localhost:3000"
        );
        assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS), "true");
    }
}
