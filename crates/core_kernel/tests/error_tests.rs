//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::PortError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("damage_severity must be 'minor' or 'major'");

    match error {
        CoreError::Validation(msg) => assert!(msg.contains("damage_severity")),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_not_found() {
    let error = CoreError::not_found("No cost reference found");

    assert!(error.is_not_found());
    match error {
        CoreError::NotFound(msg) => assert_eq!(msg, "No cost reference found"),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_core_error_display() {
    let error = CoreError::validation("Test error");
    let display = format!("{}", error);

    assert!(display.contains("Validation error"));
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("Missing database url");

    assert!(!error.is_not_found());
    match error {
        CoreError::Configuration(msg) => assert_eq!(msg, "Missing database url"),
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_port_error_display_variants() {
    assert!(PortError::internal("boom").to_string().contains("Internal error"));
    assert!(PortError::transformation("bad json").to_string().contains("bad json"));
    assert!(PortError::Conflict { message: "dup".to_string() }
        .to_string()
        .starts_with("Conflict"));
}
