//! Sections the page scrolls to

/// Named scroll destinations and the selector locating each one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Registration section
    Register,
    /// Event details section
    Details,
    /// The registration form itself
    Form,
    /// Panel shown after a successful submit
    SuccessMessage,
}

impl ScrollTarget {
    pub fn selector(self) -> &'static str {
        match self {
            ScrollTarget::Register => "#register",
            ScrollTarget::Details => ".details-section",
            ScrollTarget::Form => "#registrationForm",
            ScrollTarget::SuccessMessage => "#successMessage",
        }
    }
}
