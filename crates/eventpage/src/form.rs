// File: src/form.rs
// Purpose: Registration form state machine (editable <-> submitted)

use crate::snapshot::FormSnapshot;
use eventpage_validation::{rules, FieldState, FieldValidator};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Message shown when the terms checkbox is not ticked
pub const TERMS_MESSAGE: &str = "You must agree to the terms and conditions";

/// Id of the terms error slot
pub const TERMS_ERROR_SLOT: &str = "termsError";

/// Id of the error slot for a field (`<fieldName>Error`)
pub fn error_slot(field: &str) -> String {
    format!("{}Error", field)
}

/// Lifecycle of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ViewState {
    /// Form visible and accepting input
    #[default]
    Editable,
    /// Form hidden, success panel shown
    Submitted,
}

/// Kind of control backing a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Select,
}

/// One validated control of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn text(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            kind: FieldKind::Text,
        }
    }

    pub fn select(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            kind: FieldKind::Select,
        }
    }

    pub fn error_slot(&self) -> String {
        error_slot(&self.name)
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every field and the terms flag passed; the form is now submitted
    Submitted(FormSnapshot),
    /// Names of the failing fields (`terms` included); the form stays editable
    Rejected(Vec<String>),
    /// The form was already submitted; nothing changed
    AlreadySubmitted,
}

/// Owns the registration form's values, per-field results and view state
///
/// Built once when the page starts. The browser layer mirrors the document
/// into it with [`set_value`](Self::set_value) / [`set_terms`](Self::set_terms)
/// and renders whatever it reports back.
#[derive(Debug, Clone)]
pub struct FormController {
    validator: FieldValidator,
    fields: Vec<FieldSpec>,
    values: HashMap<String, String>,
    states: HashMap<String, FieldState>,
    checkboxes: BTreeMap<String, bool>,
    terms_accepted: bool,
    terms_error: Option<&'static str>,
    view: ViewState,
}

impl FormController {
    pub fn new(validator: FieldValidator, fields: Vec<FieldSpec>) -> Self {
        Self {
            validator,
            fields,
            values: HashMap::new(),
            states: HashMap::new(),
            checkboxes: BTreeMap::new(),
            terms_accepted: false,
            terms_error: None,
            view: ViewState::Editable,
        }
    }

    /// The registration form: every field required
    pub fn registration() -> Self {
        let fields = vec![
            FieldSpec::text(rules::FIRST_NAME, true),
            FieldSpec::text(rules::LAST_NAME, true),
            FieldSpec::text(rules::EMAIL, true),
            FieldSpec::text(rules::PHONE, true),
            FieldSpec::text(rules::COLLEGE, true),
            FieldSpec::text(rules::DEPARTMENT, true),
            FieldSpec::select(rules::YEAR, true),
            FieldSpec::select(rules::DAYS, true),
        ];
        Self::new(FieldValidator::registration(), fields)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn view_state(&self) -> ViewState {
        self.view
    }

    /// Mirror a control's current value; returns `false` for unknown fields
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) -> bool {
        if self.field(field).is_none() {
            tracing::warn!(field, "ignoring value for unregistered field");
            return false;
        }
        self.values.insert(field.to_string(), value.into());
        true
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set_terms(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    /// Mirror a named checkbox; `terms` is routed to [`set_terms`](Self::set_terms)
    ///
    /// Other checkboxes are not validated, only recorded in the snapshot.
    pub fn set_checkbox(&mut self, name: &str, checked: bool) {
        if name == rules::TERMS {
            self.set_terms(checked);
        } else {
            self.checkboxes.insert(name.to_string(), checked);
        }
    }

    /// Last mirrored state of a checkbox; `None` if never seen
    pub fn checkbox(&self, name: &str) -> Option<bool> {
        if name == rules::TERMS {
            return Some(self.terms_accepted);
        }
        self.checkboxes.get(name).copied()
    }

    /// Re-validate one field (blur/change feedback)
    ///
    /// Leaves the view state alone. `None` for unknown fields.
    pub fn validate_field(&mut self, field: &str) -> Option<&FieldState> {
        let spec = self.field(field)?;
        let state = self
            .validator
            .validate(&spec.name, self.value(field), spec.required);
        self.states.insert(field.to_string(), state);
        self.states.get(field)
    }

    /// Latest result for a field, if it has been validated since the last reset
    pub fn field_state(&self, field: &str) -> Option<&FieldState> {
        self.states.get(field)
    }

    /// Error message for a field, if its last validation failed
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.states.get(field).and_then(FieldState::error)
    }

    pub fn terms_error(&self) -> Option<&str> {
        self.terms_error
    }

    /// Validate everything and move to `Submitted` if it all passes
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.view == ViewState::Submitted {
            tracing::debug!("submit ignored, form already submitted");
            return SubmitOutcome::AlreadySubmitted;
        }

        let mut failing = Vec::new();
        let mut snapshot = FormSnapshot::new();

        let names: Vec<String> = self.fields.iter().map(|f| f.name.clone()).collect();
        for name in names {
            if let Some(state) = self.validate_field(&name) {
                if !state.is_valid {
                    failing.push(name.clone());
                }
                snapshot.insert_text(name, state.value.clone());
            }
        }

        for (name, checked) in &self.checkboxes {
            snapshot.insert_flag(name.clone(), *checked);
        }
        snapshot.insert_flag(rules::TERMS, self.terms_accepted);
        if self.terms_accepted {
            self.terms_error = None;
        } else {
            self.terms_error = Some(TERMS_MESSAGE);
            failing.push(rules::TERMS.to_string());
        }

        if !failing.is_empty() {
            tracing::debug!(?failing, "registration rejected");
            return SubmitOutcome::Rejected(failing);
        }

        snapshot.set_valid(true);
        self.view = ViewState::Submitted;
        tracing::info!(fields = snapshot.len(), "registration submitted");
        SubmitOutcome::Submitted(snapshot)
    }

    /// Back to an empty editable form, from either state
    pub fn reset(&mut self) {
        self.values.clear();
        self.states.clear();
        self.checkboxes.clear();
        self.terms_accepted = false;
        self.terms_error = None;
        self.view = ViewState::Editable;
        tracing::info!("registration reset");
    }

    /// Whether leaving the page would discard user input
    pub fn has_unsaved_data(&self) -> bool {
        self.view == ViewState::Editable
            && (self.terms_accepted
                || self.checkboxes.values().any(|checked| *checked)
                || self.values.values().any(|v| !v.trim().is_empty()))
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::registration()
    }
}
