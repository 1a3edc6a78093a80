// File: src/field.rs
// Purpose: Single-field validation against the rule registry

use crate::rules::PatternRegistry;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Message for a required field left empty
pub const REQUIRED_MESSAGE: &str = "This field is required";

static DEFAULT_REGISTRY: Lazy<PatternRegistry> = Lazy::new(PatternRegistry::registration);

/// Outcome of validating one field
///
/// Recomputed on every pass, never carried between passes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    /// Trimmed value that was checked
    pub value: String,
    pub is_valid: bool,
    /// Empty when valid
    pub message: String,
}

impl FieldState {
    pub fn valid(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_valid: false,
            message: message.into(),
        }
    }

    /// The error message, if any
    pub fn error(&self) -> Option<&str> {
        if self.is_valid {
            None
        } else {
            Some(&self.message)
        }
    }
}

/// Validates field values against a [`PatternRegistry`]
#[derive(Debug, Clone)]
pub struct FieldValidator {
    registry: PatternRegistry,
}

impl FieldValidator {
    pub fn new(registry: PatternRegistry) -> Self {
        Self { registry }
    }

    /// Validator with the registration form's rules
    pub fn registration() -> Self {
        Self::new(PatternRegistry::registration())
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Validate one field's raw value
    pub fn validate(&self, field_name: &str, raw_value: &str, is_required: bool) -> FieldState {
        validate_with(&self.registry, field_name, raw_value, is_required)
    }
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::registration()
    }
}

/// Validate against the registration form's rules
pub fn validate(field_name: &str, raw_value: &str, is_required: bool) -> FieldState {
    validate_with(&DEFAULT_REGISTRY, field_name, raw_value, is_required)
}

/// Validate against an explicit registry
///
/// Empty optional fields pass vacuously; empty required fields fail with
/// [`REQUIRED_MESSAGE`]; anything else is checked by the field's rule, and a
/// field without a rule passes.
pub fn validate_with(
    registry: &PatternRegistry,
    field_name: &str,
    raw_value: &str,
    is_required: bool,
) -> FieldState {
    let value = raw_value.trim();

    if value.is_empty() {
        return if is_required {
            tracing::debug!(field = field_name, "required field is empty");
            FieldState::invalid(value, REQUIRED_MESSAGE)
        } else {
            FieldState::valid(value)
        };
    }

    match registry.rule_for(field_name) {
        Some(rule) if !rule.check(value) => {
            tracing::debug!(field = field_name, "field failed its rule");
            FieldState::invalid(value, rule.message())
        }
        _ => FieldState::valid(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::*;

    #[test]
    fn test_empty_optional_passes() {
        let state = validate(EMAIL, "   ", false);
        assert!(state.is_valid);
        assert!(state.message.is_empty());
    }

    #[test]
    fn test_empty_required_fails() {
        let state = validate(PHONE, "", true);
        assert!(!state.is_valid);
        assert_eq!(state.error(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_value_is_trimmed() {
        let state = validate(FIRST_NAME, "  Ada  ", true);
        assert!(state.is_valid);
        assert_eq!(state.value, "Ada");
    }

    #[test]
    fn test_unknown_field_is_required_only() {
        assert!(validate("nickname", "x", true).is_valid);
        assert!(!validate("nickname", "", true).is_valid);
    }

    #[test]
    fn test_validator_uses_own_registry() {
        let validator = FieldValidator::new(PatternRegistry::empty());
        assert!(validator.validate(EMAIL, "not-an-email", true).is_valid);
        assert!(!FieldValidator::registration()
            .validate(EMAIL, "not-an-email", true)
            .is_valid);
    }
}
