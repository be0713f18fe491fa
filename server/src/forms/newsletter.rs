use serde::{Deserialize, Serialize};

use super::{require_email, FieldErrors, Validate};

/// Footer newsletter signup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterSignup {
    pub email: String,
}

impl Validate for NewsletterSignup {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_email(&mut errors, "email", &self.email);
        errors
    }
}
