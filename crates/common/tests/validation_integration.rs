//! Integration tests for validation module
//!
//! Composes the field validators the way form schemas do: one validator per
//! field, errors collected under dotted paths.

use agenda_common::validation::{
    CollectionValidator, FieldValidator, PatternValidator, StringValidator, ValidationError,
};

struct Recipient {
    name: String,
    phone: String,
}

fn validate_recipients(recipients: &[Recipient]) -> ValidationError {
    let name = StringValidator::new().not_empty_with("Name is required").max_length(100);
    let phone = StringValidator::new().not_empty_with("Phone is required").max_length(20);
    let list = CollectionValidator::new().min_size_with(1, "Add at least one contact");

    let mut errors = ValidationError::new();
    if let Err(message) = list.validate(recipients) {
        errors.add_field_error("contacts", message);
    }
    for (index, recipient) in recipients.iter().enumerate() {
        if let Err(message) = name.validate(recipient.name.as_str()) {
            errors.add_field_error(format!("contacts.{index}.name"), message);
        }
        if let Err(message) = phone.validate(recipient.phone.as_str()) {
            errors.add_field_error(format!("contacts.{index}.phone"), message);
        }
    }
    errors
}

#[test]
fn test_nested_errors_use_dotted_paths() {
    let recipients = vec![
        Recipient { name: "Ana".into(), phone: "+55 11 99999-0000".into() },
        Recipient { name: " ".into(), phone: "1".repeat(21) },
    ];

    let errors = validate_recipients(&recipients);

    assert_eq!(errors.error_count(), 2);
    assert_eq!(errors.first_message("contacts.1.name"), Some("Name is required"));
    assert_eq!(
        errors.first_message("contacts.1.phone"),
        Some("Length must not exceed 20 characters")
    );
    assert!(errors.field_errors("contacts.0.name").is_empty());
}

#[test]
fn test_empty_collection_reports_on_list_field() {
    let errors = validate_recipients(&[]);

    assert_eq!(errors.error_count(), 1);
    assert_eq!(errors.first_message("contacts"), Some("Add at least one contact"));
}

#[test]
fn test_merge_and_into_result() {
    let mut errors = ValidationError::new();
    assert!(errors.clone().into_result().is_ok());

    let time = PatternValidator::time_of_day("Time must use HH:MM");
    if let Err(message) = time.validate("7:5") {
        errors.merge(ValidationError::field("time", message));
    }

    let err = errors.into_result().expect_err("time should be rejected");
    assert_eq!(err.to_string(), "Validation failed: time: Time must use HH:MM");
}

#[test]
fn test_custom_pattern_validator() {
    let digits = PatternValidator::new(r"^\+?[0-9 ()-]+$", "Invalid phone").expect("pattern");
    assert!(digits.validate("+55 (11) 4002-8922").is_ok());
    assert_eq!(digits.validate("call me"), Err("Invalid phone".to_string()));
}
