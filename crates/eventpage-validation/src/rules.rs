// File: src/rules.rs
// Purpose: Field name -> validation rule registry

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;

/// Field names used by the registration form
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const COLLEGE: &str = "college";
pub const DEPARTMENT: &str = "department";
pub const YEAR: &str = "year";
pub const DAYS: &str = "days";
pub const TERMS: &str = "terms";

// Letters and whitespace, at least two characters
static NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]{2,}$").unwrap());

// One '@', something on both sides, a '.' after the '@'
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// Digits, whitespace, hyphens, plus and parens; ten characters or more in total
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9\s\-+()]{10,}$").unwrap());

// Unanchored: any run of two characters passes
static MIN_TWO_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r".{2,}").unwrap());

/// Validation rule attached to one form field
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Value must match a regular expression
    Pattern {
        regex: Regex,
        message: Cow<'static, str>,
    },
    /// A select control must carry a non-empty option
    Selection { message: Cow<'static, str> },
}

impl FieldRule {
    /// Build a pattern rule
    pub fn pattern(regex: Regex, message: impl Into<Cow<'static, str>>) -> Self {
        FieldRule::Pattern {
            regex,
            message: message.into(),
        }
    }

    /// Build a selection rule
    pub fn selection(message: impl Into<Cow<'static, str>>) -> Self {
        FieldRule::Selection {
            message: message.into(),
        }
    }

    /// Error message shown when the rule fails
    pub fn message(&self) -> &str {
        match self {
            FieldRule::Pattern { message, .. } | FieldRule::Selection { message } => message.as_ref(),
        }
    }

    /// Check an already-trimmed value against the rule
    pub fn check(&self, value: &str) -> bool {
        match self {
            FieldRule::Pattern { regex, .. } => regex.is_match(value),
            FieldRule::Selection { .. } => !value.is_empty(),
        }
    }

    /// Whether this rule belongs to a select control
    pub fn is_selection(&self) -> bool {
        matches!(self, FieldRule::Selection { .. })
    }
}

/// Static mapping of field name to its rule
///
/// Fields without an entry fall back to required-only checking.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    rules: HashMap<String, FieldRule>,
}

impl PatternRegistry {
    /// Create an empty registry (every field is required-only)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the rules of the registration form
    pub fn registration() -> Self {
        let name_rule = |message: &'static str| FieldRule::pattern((*NAME_REGEX).clone(), message);
        let select = || FieldRule::selection("Please select an option");

        Self::empty()
            .with_rule(
                FIRST_NAME,
                name_rule("First name must contain only letters (minimum 2 characters)"),
            )
            .with_rule(
                LAST_NAME,
                name_rule("Last name must contain only letters (minimum 2 characters)"),
            )
            .with_rule(
                EMAIL,
                FieldRule::pattern((*EMAIL_REGEX).clone(), "Please enter a valid email address"),
            )
            .with_rule(
                PHONE,
                FieldRule::pattern(
                    (*PHONE_REGEX).clone(),
                    "Please enter a valid phone number (minimum 10 digits)",
                ),
            )
            .with_rule(
                COLLEGE,
                FieldRule::pattern(
                    (*MIN_TWO_REGEX).clone(),
                    "College name must be at least 2 characters",
                ),
            )
            .with_rule(
                DEPARTMENT,
                FieldRule::pattern(
                    (*MIN_TWO_REGEX).clone(),
                    "Department must be at least 2 characters",
                ),
            )
            .with_rule(YEAR, select())
            .with_rule(DAYS, select())
    }

    /// Add or replace the rule for a field
    pub fn with_rule(mut self, field: impl Into<String>, rule: FieldRule) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    /// Look up a field's rule; `None` means required-only
    pub fn rule_for(&self, field: &str) -> Option<&FieldRule> {
        self.rules.get(field)
    }

    /// Names of all fields carrying a rule
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
