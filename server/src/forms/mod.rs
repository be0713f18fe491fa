//! Controlled form state for the site's contact, volunteer, donation and
//! newsletter forms.
//!
//! Submitting runs the form's validation synchronously. A clean run flips
//! `submitted`, which is what swaps the form for its confirmation panel.
//! Nothing is sent anywhere.

pub mod contact;
pub mod donation;
pub mod newsletter;
pub mod volunteer;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub use contact::ContactForm;
pub use donation::{DonationForm, DonationType};
pub use newsletter::NewsletterSignup;
pub use volunteer::VolunteerApplication;

/// Field name (as sent by the browser) to message.
pub type FieldErrors = BTreeMap<&'static str, String>;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub trait Validate {
    /// Pure function of the field values. An empty map means valid.
    fn validate(&self) -> FieldErrors;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState<F> {
    pub values: F,
    pub errors: FieldErrors,
    pub submitted: bool,
}

impl<F: Validate> FormState<F> {
    pub fn new(values: F) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
            submitted: false,
        }
    }

    /// Validates the current values. Returns whether the form is now submitted.
    pub fn submit(&mut self) -> bool {
        self.errors = self.values.validate();
        if self.errors.is_empty() {
            self.submitted = true;
        }
        self.submitted
    }

    pub fn reset(&mut self)
    where
        F: Default,
    {
        *self = Self::new(F::default());
    }
}

pub(crate) fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message.to_string());
    }
}

/// Required email with a format check.
pub(crate) fn require_email(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, "Email is required".to_string());
    } else if !is_valid_email(value) {
        errors.insert(field, "Please enter a valid email address".to_string());
    }
}
