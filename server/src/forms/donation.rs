use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{require, require_email, FieldErrors, Validate};

pub const PRESET_AMOUNTS: [u32; 6] = [25, 50, 100, 250, 500, 1000];

/// Options of the fund selector, in display order.
pub const DESIGNATED_FUNDS: [&str; 5] = [
    "General Fund - Where needed most",
    "Youth Programs",
    "Community Service Projects",
    "Scholarship Fund",
    "Emergency Response",
];

// Card titles on the donate page that name a selector option differently.
const FUND_ALIASES: [(&str, &str); 2] = [
    ("General Fund", "General Fund - Where needed most"),
    ("Community Service", "Community Service Projects"),
];

/// Resolves a submitted fund name to its selector option.
pub fn designated_fund(name: &str) -> Option<&'static str> {
    let name = name.trim();
    DESIGNATED_FUNDS
        .iter()
        .copied()
        .find(|fund| *fund == name)
        .or_else(|| {
            FUND_ALIASES
                .iter()
                .find(|(alias, _)| *alias == name)
                .map(|(_, fund)| *fund)
        })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DonationType {
    #[default]
    OneTime,
    Monthly,
}

/// Donation pledge. No payment is taken; a valid form only yields a
/// confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DonationForm {
    pub donation_type: DonationType,
    /// One of the preset buttons.
    pub amount: Option<u32>,
    /// Free-text "Other amount" input. Takes precedence over `amount`.
    pub custom_amount: String,
    pub fund: Option<String>,
    pub name: String,
    pub email: String,
}

impl DonationForm {
    /// The amount that would be charged, if the selection is valid.
    pub fn resolved_amount(&self) -> Result<Decimal, &'static str> {
        let custom = self.custom_amount.trim();
        if !custom.is_empty() {
            let custom = custom.trim_start_matches('$');
            let value = Decimal::from_str(custom).map_err(|_| "Enter the amount as a number, e.g. 40 or 40.50")?;
            if value <= Decimal::ZERO {
                return Err("Amount must be greater than zero");
            }
            if value.normalize().scale() > 2 {
                return Err("Amount cannot have more than two decimal places");
            }
            return Ok(value);
        }

        match self.amount {
            Some(preset) if PRESET_AMOUNTS.contains(&preset) => Ok(Decimal::from(preset)),
            Some(_) => Err("Choose one of the listed amounts or enter your own"),
            None => Err("Please choose or enter an amount"),
        }
    }
}

impl Validate for DonationForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if let Err(message) = self.resolved_amount() {
            errors.insert("amount", message.to_string());
        }

        if let Some(fund) = &self.fund {
            if designated_fund(fund).is_none() {
                errors.insert("fund", "Please choose one of our designated funds".to_string());
            }
        }

        require(&mut errors, "name", &self.name, "Name is required");
        require_email(&mut errors, "email", &self.email);
        errors
    }
}
