/// Registration form lifecycle: submit, reject, reset and the unload guard
use eventpage::form::{TERMS_ERROR_SLOT, TERMS_MESSAGE};
use eventpage::validation::{rules, FieldValidator, REQUIRED_MESSAGE};
use eventpage::{FieldSpec, FormController, SnapshotValue, SubmitOutcome, ViewState};
use pretty_assertions::assert_eq;

fn filled_form() -> FormController {
    let mut form = FormController::registration();
    form.set_value(rules::FIRST_NAME, "Ada");
    form.set_value(rules::LAST_NAME, "Lovelace");
    form.set_value(rules::EMAIL, " ada@example.org ");
    form.set_value(rules::PHONE, "123-456-7890");
    form.set_value(rules::COLLEGE, "Analytical College");
    form.set_value(rules::DEPARTMENT, "Mathematics");
    form.set_value(rules::YEAR, "3");
    form.set_value(rules::DAYS, "both");
    form
}

#[test]
fn test_valid_submit_transitions_once() {
    let mut form = filled_form();
    form.set_terms(true);

    let snapshot = match form.submit() {
        SubmitOutcome::Submitted(snapshot) => snapshot,
        other => panic!("expected submission, got {:?}", other),
    };

    assert_eq!(form.view_state(), ViewState::Submitted);
    assert!(snapshot.is_valid());
    assert_eq!(snapshot.len(), 9);
    assert_eq!(snapshot.text(rules::EMAIL), Some("ada@example.org"));
    assert_eq!(snapshot.get(rules::TERMS), Some(&SnapshotValue::Flag(true)));

    // A second submit neither re-submits nor leaves Submitted
    assert_eq!(form.submit(), SubmitOutcome::AlreadySubmitted);
    assert_eq!(form.view_state(), ViewState::Submitted);
}

#[test]
fn test_terms_unchecked_sets_only_terms_slot() {
    let mut form = filled_form();

    assert_eq!(
        form.submit(),
        SubmitOutcome::Rejected(vec![rules::TERMS.to_string()])
    );
    assert_eq!(form.view_state(), ViewState::Editable);
    assert_eq!(form.terms_error(), Some(TERMS_MESSAGE));
    assert_eq!(TERMS_ERROR_SLOT, "termsError");

    for field in form.fields() {
        assert_eq!(form.field_error(&field.name), None, "{}", field.name);
    }
}

#[test]
fn test_invalid_fields_are_all_annotated() {
    let mut form = filled_form();
    form.set_terms(true);
    form.set_value(rules::EMAIL, "not-an-email");
    form.set_value(rules::PHONE, "123-456");
    form.set_value(rules::YEAR, "");

    let failing = match form.submit() {
        SubmitOutcome::Rejected(failing) => failing,
        other => panic!("expected rejection, got {:?}", other),
    };

    assert_eq!(failing, vec!["email", "phone", "year"]);
    assert_eq!(form.view_state(), ViewState::Editable);
    assert_eq!(form.field_error(rules::EMAIL), Some("Please enter a valid email address"));
    assert_eq!(
        form.field_error(rules::PHONE),
        Some("Please enter a valid phone number (minimum 10 digits)")
    );
    assert_eq!(form.field_error(rules::YEAR), Some(REQUIRED_MESSAGE));
    assert_eq!(form.terms_error(), None);
}

#[test]
fn test_fixing_terms_clears_its_error() {
    let mut form = filled_form();
    form.submit();
    assert!(form.terms_error().is_some());

    form.set_terms(true);
    assert!(matches!(form.submit(), SubmitOutcome::Submitted(_)));
    assert_eq!(form.terms_error(), None);
}

#[test]
fn test_reset_from_submitted() {
    let mut form = filled_form();
    form.set_terms(true);
    form.submit();

    form.reset();

    assert_eq!(form.view_state(), ViewState::Editable);
    assert!(!form.terms_accepted());
    assert_eq!(form.terms_error(), None);
    for field in form.fields() {
        assert_eq!(form.value(&field.name), "");
        assert_eq!(form.field_state(&field.name), None);
    }
    assert!(!form.has_unsaved_data());
}

#[test]
fn test_reset_from_editable_clears_errors() {
    let mut form = FormController::registration();
    form.set_value(rules::EMAIL, "nope");
    form.submit();
    assert!(form.field_error(rules::EMAIL).is_some());

    form.reset();
    assert_eq!(form.field_error(rules::EMAIL), None);
    assert_eq!(form.terms_error(), None);
}

#[test]
fn test_unsaved_data_guard() {
    let mut form = FormController::registration();
    assert!(!form.has_unsaved_data());

    form.set_value(rules::COLLEGE, "MIT");
    assert!(form.has_unsaved_data());

    form.reset();
    form.set_terms(true);
    assert!(form.has_unsaved_data());

    let mut submitted = filled_form();
    submitted.set_terms(true);
    submitted.submit();
    assert!(!submitted.has_unsaved_data());
}

#[test]
fn test_optional_fields_pass_when_empty() {
    let fields = vec![
        FieldSpec::text(rules::FIRST_NAME, true),
        FieldSpec::text(rules::PHONE, false),
    ];
    let mut form = FormController::new(FieldValidator::registration(), fields);
    form.set_value(rules::FIRST_NAME, "Grace");
    form.set_terms(true);

    let snapshot = match form.submit() {
        SubmitOutcome::Submitted(snapshot) => snapshot,
        other => panic!("expected submission, got {:?}", other),
    };
    assert_eq!(snapshot.text(rules::PHONE), Some(""));
}

#[test]
fn test_every_checkbox_is_captured() {
    let mut form = filled_form();
    form.set_checkbox("newsletter", true);
    form.set_checkbox("mealPreference", false);
    form.set_checkbox(rules::TERMS, true);

    let snapshot = match form.submit() {
        SubmitOutcome::Submitted(snapshot) => snapshot,
        other => panic!("expected submission, got {:?}", other),
    };

    assert_eq!(snapshot.len(), 11);
    assert_eq!(snapshot.flag("newsletter"), Some(true));
    assert_eq!(snapshot.flag("mealPreference"), Some(false));
    assert_eq!(snapshot.flag(rules::TERMS), Some(true));

    let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(json["newsletter"], serde_json::Value::Bool(true));

    form.reset();
    assert_eq!(form.checkbox("newsletter"), None);
}
