//! Tests for core error conversions and messages

use core_kernel::{ClaimId, CoreError, Money, Probability};

#[test]
fn test_money_error_converts() {
    let err: CoreError = Money::parse_non_negative("abc").unwrap_err().into();
    assert!(matches!(err, CoreError::Money(_)));
    assert_eq!(err.to_string(), "Money error: Invalid amount: abc");
}

#[test]
fn test_probability_error_converts() {
    let err: CoreError = Probability::new(2.0).unwrap_err().into();
    assert!(err.to_string().contains("within [0, 1]"));
}

#[test]
fn test_identifier_error_converts() {
    let err: CoreError = ClaimId::new("").unwrap_err().into();
    assert_eq!(err.to_string(), "Identifier error: Identifier must not be blank");
}

#[test]
fn test_constructors() {
    assert_eq!(
        CoreError::validation("bad row").to_string(),
        "Validation error: bad row"
    );
    assert_eq!(
        CoreError::configuration("missing port").to_string(),
        "Configuration error: missing port"
    );
}
