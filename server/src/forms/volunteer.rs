use serde::{Deserialize, Serialize};

use super::{require, require_email, FieldErrors, Validate};

pub const INTERESTS: [&str; 6] = [
    "Community Service",
    "Career Development",
    "Youth Mentorship",
    "Event Planning",
    "Communications",
    "Fundraising",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolunteerApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub interests: Vec<String>,
    /// Free text, optional.
    pub availability: String,
}

impl Validate for VolunteerApplication {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "firstName", &self.first_name, "First name is required");
        require(&mut errors, "lastName", &self.last_name, "Last name is required");
        require_email(&mut errors, "email", &self.email);

        if self.phone.trim().is_empty() {
            errors.insert("phone", "Phone number is required".to_string());
        } else {
            let digits = self.phone.chars().filter(char::is_ascii_digit).count();
            if !(7..=15).contains(&digits) {
                errors.insert("phone", "Please enter a valid phone number".to_string());
            }
        }

        if self.interests.is_empty() {
            errors.insert("interests", "Select at least one area of interest".to_string());
        } else if let Some(unknown) = self.interests.iter().find(|i| !INTERESTS.contains(&i.as_str())) {
            errors.insert("interests", format!("Unknown area of interest '{}'", unknown));
        }

        errors
    }
}
