//! # Event Page
//!
//! Behavior of the event site's single page, kept free of any DOM so it can
//! be driven from the browser bindings and tested natively.
//!
//! ## Features
//!
//! - **Registration form**: per-field validation, terms acceptance and the
//!   editable/submitted view lifecycle ([`FormController`])
//! - **Snapshots**: flat key/value capture of the form handed to an optional
//!   [`Transport`]
//! - **Widgets**: exclusive page switching, accordion, countdown
//! - **Configuration**: `page.toml` with defaults for every key
//!
//! ## Example
//!
//! ```rust
//! use eventpage::{FormController, SubmitOutcome, ViewState};
//!
//! let mut form = FormController::registration();
//! form.set_value("firstName", "Ada");
//! form.set_terms(true);
//!
//! // Remaining fields are required, so the form stays editable
//! assert!(matches!(form.submit(), SubmitOutcome::Rejected(_)));
//! assert_eq!(form.view_state(), ViewState::Editable);
//! ```

pub mod accordion;
pub mod config;
pub mod countdown;
pub mod form;
pub mod navigation;
pub mod scroll;
pub mod snapshot;
pub mod transport;

pub use accordion::{Accordion, AccordionItem};
pub use config::{CountdownConfig, NavigationConfig, PageConfig, TransportConfig};
pub use countdown::{Countdown, CountdownDigits, CountdownTimer};
pub use form::{FieldKind, FieldSpec, FormController, SubmitOutcome, ViewState};
pub use navigation::PageNavigator;
pub use scroll::ScrollTarget;
pub use snapshot::{FormSnapshot, SnapshotValue};
pub use transport::{hand_off, RegistrationAck, Transport, TransportError};

pub use eventpage_validation as validation;
