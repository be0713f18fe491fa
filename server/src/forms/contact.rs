use serde::{Deserialize, Serialize};

use super::{require, require_email, FieldErrors, Validate};

pub const SUBJECTS: [&str; 6] = [
    "General Inquiry",
    "Volunteer Opportunity",
    "Event Question",
    "Partnership Interest",
    "Media Request",
    "Other",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl Validate for ContactForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "firstName", &self.first_name, "First name is required");
        require(&mut errors, "lastName", &self.last_name, "Last name is required");
        require_email(&mut errors, "email", &self.email);

        let subject = self.subject.trim();
        if subject.is_empty() {
            errors.insert("subject", "Please select a subject".to_string());
        } else if !SUBJECTS.contains(&subject) {
            errors.insert("subject", "Please choose one of the listed subjects".to_string());
        }

        require(&mut errors, "message", &self.message, "Message is required");
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormState;

    fn valid() -> ContactForm {
        ContactForm {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone: String::new(),
            subject: "Event Question".to_string(),
            message: "Is the clean-up family friendly?".to_string(),
        }
    }

    #[test]
    fn test_valid_contact_submits() {
        let mut form = FormState::new(valid());
        assert!(form.submit());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_malformed_email_blocks_submission() {
        let mut form = FormState::new(ContactForm {
            email: "not-an-email".to_string(),
            ..valid()
        });
        assert!(!form.submit());
        assert!(!form.submitted);
        assert!(form.errors.contains_key("email"));
        assert_eq!(form.errors.len(), 1);
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = ContactForm::default().validate();
        let fields: Vec<&str> = errors.keys().copied().collect();
        assert_eq!(fields, vec!["email", "firstName", "lastName", "message", "subject"]);
        assert_eq!(errors["email"], "Email is required");
    }

    #[test]
    fn test_validation_is_deterministic() {
        let form = ContactForm {
            subject: "Something else".to_string(),
            ..valid()
        };
        assert_eq!(form.validate(), form.validate());
        assert!(form.validate().contains_key("subject"));
    }
}
