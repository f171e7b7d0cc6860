mod common;

use common::{BASE, BOUNDED, DERIVED, LIMITS, inspector};
use jbind_api::DirectoryError;
use jbind_core::JbindError;

#[test]
fn test_non_public_redeclaration_hides_inherited_field() {
    let inspector = inspector();

    let err = inspector.find_field(DERIVED, "x", false).unwrap_err();
    assert_eq!(err.sql_state(), Some("42X68"));
    assert_eq!(
        err.to_string(),
        "No instance field 'x' was found belonging to class 'com.acme.Derived'"
    );

    let field = inspector.find_field(BASE, "x", false).unwrap();
    assert_eq!(field.declaring_type.name(), BASE);
}

#[test]
fn test_inherited_fields_without_redeclaration() {
    let inspector = inspector();
    let y = inspector.find_field(DERIVED, "y", false).unwrap();
    assert_eq!(y.declaring_type.name(), BASE);

    let origin = inspector.find_field(DERIVED, "ORIGIN", true).unwrap();
    assert!(origin.is_static);
}

#[test]
fn test_static_lookup_rejects_instance_fields() {
    let inspector = inspector();
    let err = inspector.find_field(BASE, "y", true).unwrap_err();
    assert_eq!(err.sql_state(), Some("42X72"));
    assert!(matches!(err, JbindError::NoField { cause: None, .. }));

    // Instance lookups accept static fields.
    assert!(inspector.find_field(BASE, "ORIGIN", false).is_ok());
}

#[test]
fn test_interface_fields() {
    let inspector = inspector();
    let ceiling = inspector.find_field(LIMITS, "CEILING", true).unwrap();
    assert!(ceiling.is_public() && ceiling.is_static);

    let through_class = inspector.find_field(BOUNDED, "CEILING", true).unwrap();
    assert_eq!(through_class.declaring_type.name(), LIMITS);

    let max = inspector.find_field("java.lang.Integer", "MAX_VALUE", true).unwrap();
    assert_eq!(max.field_type.name(), "int");
}

#[test]
fn test_every_failure_is_a_field_error() {
    let inspector = inspector();

    let err = inspector.find_field("com.acme.Missing", "x", false).unwrap_err();
    assert!(matches!(
        err,
        JbindError::NoField {
            cause: Some(DirectoryError::NotFound(_)),
            ..
        }
    ));

    let err = inspector.find_field(DERIVED, "z", true).unwrap_err();
    assert_eq!(err.sql_state(), Some("42X72"));
    assert!(matches!(err, JbindError::NoField { cause: Some(_), .. }));

    for receiver in ["int", "java.lang.String[]", "bad name"] {
        let err = inspector.find_field(receiver, "length", false).unwrap_err();
        assert_eq!(err.sql_state(), Some("42X68"), "{receiver}");
    }
}
