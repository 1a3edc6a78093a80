//! Event Page Validation
//!
//! Field rules and single-field validation for the registration form.
//! Pure Rust with no DOM dependency: the same checks back the browser bindings
//! and the native test suite.

pub mod field;
pub mod rules;

// Re-export the public surface
pub use field::*;
pub use rules::*;
