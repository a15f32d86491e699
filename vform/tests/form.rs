use std::time::Duration;

use vform::validation::{ErrorMessages, Rule, Validatable, Validator};
use vform::{Field, Form, FormOptions, Mark, NativeSelect, Select, SelectOptions};

struct SignupForm {
    name: Field,
    email: Field,
    terms: Field,
    plan: Select,
}

impl SignupForm {
    fn new() -> Self {
        Self {
            name: Field::text("name"),
            email: Field::text("email"),
            terms: Field::checkbox("terms"),
            plan: Select::new(
                NativeSelect::new("plan", ["-", "Free", "Pro"]).with_placeholder("Plan"),
                SelectOptions::default(),
            ),
        }
    }

    fn form(&self, options: FormOptions) -> Form {
        let m = options.errors.clone();
        let validator = Validator::new()
            .field(&self.name, "name")
            .required(&m.required)
            .field(&self.email, "email")
            .required(&m.required)
            .email(&m.email)
            .field(&self.terms, "terms")
            .checked(&m.checkbox)
            .field(&self.plan, "plan")
            .selected(&m.select)
            .build();
        Form::new(options, validator)
    }

    fn fill(&self) {
        self.name.set_text("Ada");
        self.email.set_text("ada@example.com");
        self.terms.set_checked(true);
        self.plan.choose(2);
    }
}

// =============================================================================
// Options Tests
// =============================================================================

#[test]
fn test_form_options_defaults() {
    let options = FormOptions::default();
    assert!(!options.keypress);
    assert!(!options.show_errors);
    assert!(options.submit);
    assert!(options.submit_delay);
    assert_eq!(options.delay, 3000);
    assert!(!options.reset_form);
    assert!(!options.success_msg);
    assert_eq!(options.msg, "Form has been successfully sent!");
    assert_eq!(options.redirect, None);
    assert!(!options.parent);
    assert_eq!(options.close_text, "\u{2717}");
    assert_eq!(options.errors, ErrorMessages::default());
}

#[test]
fn test_form_options_from_json() {
    let options = FormOptions::from_json(
        r#"{
            "keypress": true,
            "showErrors": true,
            "submitDelay": false,
            "redirect": "/thanks",
            "errors": { "required": "Please fill in" }
        }"#,
    )
    .unwrap();
    assert!(options.keypress);
    assert!(options.show_errors);
    assert!(!options.submit_delay);
    assert_eq!(options.redirect.as_deref(), Some("/thanks"));
    assert_eq!(options.errors.required, "Please fill in");
    assert_eq!(options.errors.email, "Incorrect email");
}

#[test]
fn test_custom_error_messages_reach_rules() {
    let options = FormOptions::from_json(
        r#"{ "errors": { "required": "Please fill in", "minLen": "Too short" } }"#,
    )
    .unwrap();
    let name = Field::text("name");
    let nick = Field::text("nick");
    let terms = Field::checkbox("terms");
    let validator = options
        .validator()
        .field(&name, "name")
        .check(Rule::Required)
        .field(&nick, "nick")
        .check(Rule::MinLen(5))
        .field(&terms, "terms")
        .check(Rule::Checkbox)
        .build();
    let form = Form::new(options, validator);

    nick.set_text("abc");
    let outcome = form.submit();
    assert!(!outcome.valid);
    let messages: Vec<_> = outcome.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["Please fill in", "Too short", "Field(s) not checked"]);
}

#[test]
fn test_check_equals_uses_equal_message() {
    let options = FormOptions::default();
    let password = Field::text("password");
    let confirm = Field::text("confirm");
    let validator = options
        .validator()
        .field(&confirm, "confirm")
        .check_equals(&password)
        .build();

    password.set_text("secret");
    confirm.set_text("secrte");
    let result = validator.validate();
    assert_eq!(result.message_for("confirm"), Some("Fields aren't equal"));
}

// =============================================================================
// Submit Tests
// =============================================================================

#[test]
fn test_submit_invalid_form() {
    let signup = SignupForm::new();
    let form = signup.form(FormOptions::default());

    let outcome = form.submit();
    assert!(!outcome.valid);
    assert_eq!(outcome.errors.len(), 4);
    assert_eq!(outcome.submit_after, None);
    assert_eq!(outcome.success_message, None);
    assert_eq!(outcome.redirect, None);
    assert_eq!(signup.name.mark(), Mark::Invalid);
}

#[test]
fn test_submit_valid_form_with_delay() {
    let signup = SignupForm::new();
    let form = signup.form(FormOptions::default());
    signup.fill();

    let outcome = form.submit();
    assert!(outcome.valid);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.submit_after, Some(Duration::from_millis(3000)));
    // Fields keep their values unless resetForm is set
    assert_eq!(signup.name.text_value(), "Ada");
}

#[test]
fn test_submit_immediate_with_message_and_redirect() {
    let signup = SignupForm::new();
    let options = FormOptions::new()
        .immediate()
        .success_message("Thanks!")
        .redirect("/welcome");
    let form = signup.form(options);
    signup.fill();

    let outcome = form.submit();
    assert_eq!(outcome.submit_after, Some(Duration::ZERO));
    assert_eq!(outcome.success_message.as_deref(), Some("Thanks!"));
    assert_eq!(outcome.close_text.as_deref(), Some("\u{2717}"));
    assert_eq!(outcome.redirect.as_deref(), Some("/welcome"));
}

#[test]
fn test_submit_disabled() {
    let signup = SignupForm::new();
    let options = FormOptions {
        submit: false,
        ..Default::default()
    };
    let form = signup.form(options);
    signup.fill();

    let outcome = form.submit();
    assert!(outcome.valid);
    assert_eq!(outcome.submit_after, None);
}

#[test]
fn test_submit_resets_fields() {
    let signup = SignupForm::new();
    let form = signup.form(FormOptions::new().reset_form(true));
    signup.fill();

    assert!(form.submit().valid);
    assert_eq!(signup.name.text_value(), "");
    assert!(!signup.terms.is_checked());
    assert_eq!(signup.plan.selected_index(), None);
    assert_eq!(signup.plan.displayed_label(), "Plan");
}

// =============================================================================
// Keypress & Display Tests
// =============================================================================

#[test]
fn test_keypress_validation() {
    let signup = SignupForm::new();
    let form = signup.form(FormOptions::new().keypress(true));

    signup.email.set_text("ada@");
    let result = form.validate_field("email").unwrap();
    assert_eq!(result.message_for("email"), Some("Incorrect email"));
    assert_eq!(signup.name.mark(), Mark::Unmarked);
}

#[test]
fn test_keypress_disabled() {
    let signup = SignupForm::new();
    let form = signup.form(FormOptions::default());
    assert!(form.validate_field("email").is_none());
    assert_eq!(signup.email.mark(), Mark::Unmarked);
}

#[test]
fn test_show_errors_controls_message() {
    let signup = SignupForm::new();
    let form = signup.form(FormOptions::default());
    form.submit();
    assert!(signup.name.has_error());
    assert_eq!(signup.name.displayed_error(), None);

    let signup = SignupForm::new();
    let form = signup.form(FormOptions::new().show_errors(true));
    form.submit();
    assert_eq!(
        signup.name.displayed_error().as_deref(),
        Some("Field is required")
    );
}

#[test]
fn test_parent_mirrors_marks() {
    let signup = SignupForm::new();
    let form = signup.form(FormOptions::default());
    form.submit();
    assert_eq!(signup.name.mark(), Mark::Invalid);
    assert_eq!(signup.name.parent_mark(), Mark::Unmarked);

    let signup = SignupForm::new();
    let form = signup.form(FormOptions::new().parent(true));
    signup.name.set_text("Ada");
    form.submit();
    assert_eq!(signup.name.parent_mark(), Mark::Valid);
    assert_eq!(signup.email.parent_mark(), Mark::Invalid);
}

#[tokio::test]
async fn test_submit_async() {
    let signup = SignupForm::new();
    let form = signup.form(FormOptions::default());
    signup.fill();
    let outcome = form.submit_async().await;
    assert!(outcome.valid);
}
