use std::time::Duration;

use regex::Regex;
use vform::validation::{
    DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, ErrorMessages, Validatable, ValidationResult, Validator,
};
use vform::{Field, FieldValue, Mark};

fn messages() -> ErrorMessages {
    ErrorMessages::default()
}

// =============================================================================
// Built-in Rule Tests
// =============================================================================

#[test]
fn test_required_text() {
    let m = messages();
    let name = Field::text("name");
    let validator = Validator::new().field(&name, "name").required(&m.required).build();

    let result = validator.validate();
    assert_eq!(result.message_for("name"), Some("Field is required"));
    assert_eq!(name.mark(), Mark::Invalid);

    name.set_text("Ada");
    assert!(validator.validate().is_valid());
    assert_eq!(name.mark(), Mark::Valid);
    assert_eq!(name.error(), None);
}

#[test]
fn test_number_rule() {
    let m = messages();
    let age = Field::text("age");
    let validator = Validator::new().field(&age, "age").number(&m.number).build();

    age.set_text("42");
    assert!(validator.validate().is_valid());

    age.set_text("4.2");
    assert_eq!(validator.validate().message_for("age"), Some("Only numbers"));

    age.set_text("");
    assert!(validator.validate().is_invalid());
}

#[test]
fn test_email_rule() {
    let m = messages();
    let email = Field::text("email");
    let validator = Validator::new().field(&email, "email").email(&m.email).build();

    email.set_text("Someone@Example.com");
    assert!(validator.validate().is_valid());

    email.set_text("not-an-email");
    assert_eq!(validator.validate().message_for("email"), Some("Incorrect email"));

    email.set_text("");
    assert!(validator.validate().is_invalid());
}

#[test]
fn test_checked_rule() {
    let m = messages();
    let terms = Field::checkbox("terms");
    let plan = Field::radio("plan");
    let validator = Validator::new()
        .field(&terms, "terms")
        .checked(&m.checkbox)
        .field(&plan, "plan")
        .checked(&m.radio)
        .build();

    let result = validator.validate();
    assert_eq!(result.errors().len(), 2);
    assert_eq!(result.message_for("terms"), Some("Field(s) not checked"));

    terms.set_checked(true);
    plan.set_checked(true);
    assert!(validator.validate().is_valid());
}

#[test]
fn test_selected_rule_on_field() {
    let m = messages();
    let country = Field::select("country");
    let validator = Validator::new()
        .field(&country, "country")
        .selected(&m.select)
        .build();

    assert_eq!(
        validator.validate().message_for("country"),
        Some("Please select something")
    );

    country.set_selected(Some(0));
    assert!(validator.validate().is_invalid());

    country.set_selected(Some(3));
    assert!(validator.validate().is_valid());
}

#[test]
fn test_equals_rule() {
    let m = messages();
    let password = Field::text("password");
    let confirm = Field::text("confirm");
    let validator = Validator::new()
        .field(&confirm, "confirm")
        .equals(&password, &m.equal)
        .build();

    password.set_text("hunter22");
    confirm.set_text("hunter23");
    assert_eq!(validator.validate().message_for("confirm"), Some("Fields aren't equal"));

    confirm.set_text("hunter22");
    assert!(validator.validate().is_valid());
}

#[test]
fn test_length_rules() {
    let m = messages();
    let login = Field::text("login");
    let validator = Validator::new()
        .field(&login, "login")
        .min_length(DEFAULT_MIN_LENGTH, &m.min_len)
        .max_length(DEFAULT_MAX_LENGTH, &m.max_len)
        .build();

    login.set_text("abcd");
    assert_eq!(validator.validate().message_for("login"), Some("Min length is 5 symbols"));

    login.set_text("abcde");
    assert!(validator.validate().is_valid());

    login.set_text("a".repeat(16));
    assert_eq!(validator.validate().message_for("login"), Some("Max length is 15 symbols"));

    // Length counts characters, not bytes
    login.set_text("ééééé");
    assert!(validator.validate().is_valid());
}

#[test]
fn test_pattern_rule() {
    let code = Field::text("code");
    let validator = Validator::new()
        .field(&code, "code")
        .pattern(Regex::new(r"^[A-Z]{3}$").unwrap(), "Three capitals")
        .build();

    code.set_text("ABC");
    assert!(validator.validate().is_valid());
    code.set_text("abc");
    assert!(validator.validate().is_invalid());
}

#[test]
fn test_rules_ignore_other_shapes() {
    let m = messages();
    let terms = Field::checkbox("terms");
    terms.set_checked(true);
    let validator = Validator::new()
        .field(&terms, "terms")
        .number(&m.number)
        .email(&m.email)
        .min_length(5, &m.min_len)
        .build();
    assert!(validator.validate().is_valid());
}

// =============================================================================
// Reporting Tests
// =============================================================================

#[test]
fn test_only_first_error_reported() {
    let m = messages();
    let email = Field::text("email");
    let validator = Validator::new()
        .field(&email, "email")
        .required(&m.required)
        .email(&m.email)
        .min_length(5, &m.min_len)
        .build();

    let result = validator.validate();
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.first_error().unwrap().message, "Field is required");

    email.set_text("someone@");
    let result = validator.validate();
    assert_eq!(result.first_error().unwrap().message, "Incorrect email");
}

#[test]
fn test_errors_in_field_order() {
    let m = messages();
    let first = Field::text("first");
    let second = Field::text("second");
    let result = Validator::new()
        .field(&first, "first")
        .required(&m.required)
        .field(&second, "second")
        .required(&m.required)
        .validate();

    let names: Vec<_> = result.errors().iter().map(|e| e.field_name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
    assert_eq!(result.errors()[0].field_id, first.field_id());
}

#[test]
fn test_validate_single_field() {
    let m = messages();
    let a = Field::text("a");
    let b = Field::text("b");
    let validator = Validator::new()
        .field(&a, "a")
        .required(&m.required)
        .field(&b, "b")
        .required(&m.required)
        .build();

    let result = validator.validate_field("a").unwrap();
    assert!(result.is_invalid());
    assert_eq!(a.mark(), Mark::Invalid);
    assert_eq!(b.mark(), Mark::Unmarked);
    assert!(validator.validate_field("missing").is_none());
}

#[test]
fn test_custom_rule() {
    let nickname = Field::text("nickname");
    let validator = Validator::new()
        .field(&nickname, "nickname")
        .rule(
            |v: &FieldValue| v != &FieldValue::Text("admin".into()),
            "Reserved name",
        )
        .build();

    nickname.set_text("admin");
    assert_eq!(validator.validate(), ValidationResult::Invalid(validator_errors(&nickname)));
}

fn validator_errors(field: &Field) -> Vec<vform::validation::FieldError> {
    vec![vform::validation::FieldError {
        field_name: "nickname".into(),
        field_id: field.field_id(),
        message: "Reserved name".into(),
    }]
}

#[test]
fn test_reset_restores_initial_values() {
    let m = messages();
    let name = Field::text("name");
    let terms = Field::checkbox("terms");
    let validator = Validator::new()
        .field(&name, "name")
        .required(&m.required)
        .field(&terms, "terms")
        .checked(&m.checkbox)
        .build();

    name.set_text("Ada");
    terms.set_checked(true);
    validator.validate();
    validator.reset();

    assert_eq!(name.text_value(), "");
    assert!(!terms.is_checked());
    assert_eq!(name.mark(), Mark::Unmarked);
}

// =============================================================================
// Async Rule Tests
// =============================================================================

#[tokio::test]
async fn test_async_rule_runs_after_sync_rules() {
    let m = messages();
    let username = Field::text("username");
    let validator = Validator::new()
        .field(&username, "username")
        .required(&m.required)
        .rule_async(
            |v: FieldValue| async move {
                tokio::time::sleep(Duration::from_millis(1)).await;
                v != FieldValue::Text("taken".into())
            },
            "Username is taken",
        )
        .build();

    let result = validator.validate_async().await;
    assert_eq!(result.message_for("username"), Some("Field is required"));

    username.set_text("taken");
    let result = validator.validate_async().await;
    assert_eq!(result.message_for("username"), Some("Username is taken"));

    // Sync validation skips async rules
    assert!(validator.validate().is_valid());

    username.set_text("free");
    assert!(validator.validate_async().await.is_valid());
}
