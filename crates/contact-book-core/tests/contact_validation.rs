// crates/contact-book-core/tests/contact_validation.rs
// ============================================================================
// Module: Contact Validation Tests
// Description: Field validation for create and edit submissions.
// Purpose: Ensure rejected submissions keep their values and map every field.
// Dependencies: contact-book-core
// ============================================================================

//! ## Overview
//! Validates required-field and email-shape checks and the error map shape.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use contact_book_core::ContactField;
use contact_book_core::ContactFields;
use contact_book_core::ContactId;

fn complete() -> ContactFields {
    ContactFields::new("Ada", "Lovelace", "ada@example.com", "555-0100")
}

#[test]
fn complete_submission_validates() {
    let valid = complete().validate().expect("valid contact");
    assert_eq!(valid.fields(), &complete());
}

#[test]
fn empty_first_name_only_flags_first_name() {
    let mut fields = complete();
    fields.first_name = String::new();
    let rejected = fields.clone().validate().expect_err("missing first name");
    assert_eq!(rejected.errors.first_name, "First Name is required");
    assert!(rejected.errors.last_name.is_empty());
    assert!(rejected.errors.email.is_empty());
    assert!(rejected.errors.phone_number.is_empty());
    assert_eq!(rejected.values, fields);
}

#[test]
fn whitespace_only_values_are_rejected() {
    let fields = ContactFields::new("  ", "\t", " ", "\n");
    let rejected = fields.validate().expect_err("blank values");
    for field in ContactField::ALL {
        assert_eq!(rejected.errors.get(field), format!("{} is required", field.label()));
    }
}

#[test]
fn malformed_email_is_rejected_with_format_message() {
    let mut fields = complete();
    fields.email = "not-an-email".to_string();
    let rejected = fields.validate().expect_err("malformed email");
    assert_eq!(rejected.errors.email, "Email must be a valid email address");
    assert!(rejected.errors.first_name.is_empty());
}

#[test]
fn missing_form_fields_deserialize_as_empty_strings() {
    let fields: ContactFields = serde_json::from_str(r#"{"first_name":"Ada"}"#).unwrap();
    assert_eq!(fields.first_name, "Ada");
    assert!(fields.last_name.is_empty());
    let rejected = fields.validate().expect_err("incomplete submission");
    assert!(rejected.errors.first_name.is_empty());
    assert!(!rejected.errors.last_name.is_empty());
}

#[test]
fn valid_contact_attaches_identifier() {
    let id = ContactId::from_raw(9).unwrap();
    let record = complete().validate().unwrap().with_id(id);
    assert_eq!(record.id, id);
    assert_eq!(record.fields(), complete());
    assert_eq!(record.display_name(), "Ada Lovelace");
}

#[test]
fn accepted_values_are_stored_trimmed() {
    let padded = ContactFields::new(" Ada ", "Lovelace\t", "  ada@example.com ", " 555-0100");
    let valid = padded.validate().expect("padded contact");
    assert_eq!(valid.fields(), &complete());
}

#[test]
fn rejected_values_are_returned_as_submitted() {
    let padded = ContactFields::new(" Ada ", "", "  ada@example.com ", "555-0100");
    let rejected = padded.clone().validate().expect_err("missing last name");
    assert_eq!(rejected.values, padded);
}
