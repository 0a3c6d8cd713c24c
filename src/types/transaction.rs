//! Transaction attributes collected by the input form

use chrono::{Datelike, Local, Timelike};

/// Cardholder gender, as encoded during training
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// The categorical string value the encoders were fitted on.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// One transaction as entered in the form.
///
/// Ephemeral; lives only for the duration of a submission. Numeric fields are
/// well-typed by construction of the form controls. Coordinates are left
/// unconstrained so invalid geography degrades to a zero distance instead of
/// being rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    /// Merchant name (required)
    pub merchant: String,
    /// Transaction category (required)
    pub category: String,
    /// Transaction amount in dollars
    pub amt: f64,
    /// Cardholder latitude in decimal degrees
    pub lat: f64,
    /// Cardholder longitude in decimal degrees
    pub long: f64,
    /// Merchant latitude in decimal degrees
    pub merch_lat: f64,
    /// Merchant longitude in decimal degrees
    pub merch_long: f64,
    /// Transaction hour (0-23)
    pub hour: u32,
    /// Transaction day of month (1-31)
    pub day: u32,
    /// Transaction month (1-12)
    pub month: u32,
    /// Cardholder gender
    pub gender: Gender,
    /// Credit card number (required; hashed before prediction)
    pub cc_num: String,
}

impl TransactionInput {
    /// Names of required text fields that are empty after trimming.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.merchant.trim().is_empty() {
            missing.push("merchant");
        }
        if self.category.trim().is_empty() {
            missing.push("category");
        }
        if self.cc_num.trim().is_empty() {
            missing.push("credit card number");
        }
        missing
    }
}

impl Default for TransactionInput {
    fn default() -> Self {
        let now = Local::now();
        Self {
            merchant: String::new(),
            category: String::new(),
            amt: 0.0,
            lat: 0.0,
            long: 0.0,
            merch_lat: 0.0,
            merch_long: 0.0,
            hour: now.hour(),
            day: now.day(),
            month: now.month(),
            gender: Gender::Male,
            cc_num: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_input_has_no_missing_fields() {
        let input = TransactionInput {
            merchant: "Acme".to_string(),
            category: "grocery".to_string(),
            cc_num: "4111111111111111".to_string(),
            ..TransactionInput::default()
        };
        assert!(input.missing_required_fields().is_empty());
    }

    #[test]
    fn test_blank_required_fields_are_reported() {
        let input = TransactionInput {
            merchant: "  ".to_string(),
            category: "grocery".to_string(),
            cc_num: String::new(),
            ..TransactionInput::default()
        };
        assert_eq!(
            input.missing_required_fields(),
            vec!["merchant", "credit card number"]
        );
    }

    #[test]
    fn test_default_time_fields_are_in_range() {
        let input = TransactionInput::default();
        assert!(input.hour <= 23);
        assert!((1..=31).contains(&input.day));
        assert!((1..=12).contains(&input.month));
    }
}
