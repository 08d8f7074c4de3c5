//! Form validation for onboarding and the record-creation forms.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

type Pattern = LazyLock<Result<Regex, regex::Error>>;

static USERNAME: Pattern = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$"));
static MOBILE: Pattern = LazyLock::new(|| Regex::new(r"^[6-9]\d{9}$"));
static GST_NUMBER: Pattern =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$"));
static PINCODE: Pattern = LazyLock::new(|| Regex::new(r"^\d{6}$"));

fn is_match(pattern: &Pattern, value: &str) -> Result<bool, CoreError> {
    pattern
        .as_ref()
        .map(|re| re.is_match(value))
        .map_err(|e| CoreError::Other(anyhow::anyhow!("invalid validation pattern: {e}")))
}

fn invalid(message: &str) -> CoreError {
    CoreError::Validation(message.to_string())
}

/// Fail with `"{label} is required"` when `value` is blank.
///
/// # Errors
///
/// Returns `CoreError::Validation` for an empty or whitespace-only value.
pub fn require(label: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{label} is required")));
    }
    Ok(())
}

/// Last ten digits of a phone number after dropping every non-digit.
#[must_use]
pub fn mobile_digits(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(char::is_ascii_digit).collect();
    digits[digits.len().saturating_sub(10)..].iter().collect()
}

/// Returns whether `gst` is a well-formed GSTIN.
///
/// # Errors
///
/// Returns `CoreError::Other` only if the built-in pattern fails to compile.
pub fn is_valid_gst(gst: &str) -> Result<bool, CoreError> {
    is_match(&GST_NUMBER, gst)
}

/// Usernames are at least 3 characters of `[A-Za-z0-9_]`.
///
/// # Errors
///
/// Returns `CoreError::Validation` carrying the message shown to the user.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    require("Username", username)?;
    if username.chars().count() < 3 {
        return Err(invalid("Username must be at least 3 characters"));
    }
    if !is_match(&USERNAME, username)? {
        return Err(invalid(
            "Username can only contain letters, numbers, and underscores",
        ));
    }
    Ok(())
}

/// Profile details collected on first sign-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OnboardingForm {
    pub username: String,
    pub full_name: String,
    pub phone: String,
    pub company_name: String,
    #[serde(default)]
    pub gst_number: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl OnboardingForm {
    /// Check every field, reporting the first failure in form order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` carrying the message shown to the user.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_username(&self.username)?;
        require("Full name", &self.full_name)?;

        require("Phone number", &self.phone)?;
        if !is_match(&MOBILE, &mobile_digits(&self.phone))? {
            return Err(invalid("Please enter a valid 10-digit phone number"));
        }
        require("Company name", &self.company_name)?;
        if let Some(gst) = self.gst_number.as_deref().filter(|g| !g.is_empty()) {
            if !is_valid_gst(gst)? {
                return Err(invalid("Invalid GST number format"));
            }
        }

        require("Address", &self.address)?;
        require("City", &self.city)?;
        require("State", &self.state)?;
        if !is_match(&PINCODE, &self.pincode)? {
            return Err(invalid("Please enter a valid 6-digit pincode"));
        }
        Ok(())
    }

    /// GST number with blanks mapped to `None`.
    #[must_use]
    pub fn gst_or_none(&self) -> Option<&str> {
        self.gst_number.as_deref().map(str::trim).filter(|g| !g.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_form() -> OnboardingForm {
        OnboardingForm {
            username: "ravi_p".into(),
            full_name: "Ravi Patel".into(),
            phone: "+91 98765 43210".into(),
            company_name: "Bhaktinandan Textiles".into(),
            gst_number: Some("24ABCDE1234F1Z5".into()),
            address: "Ring Road".into(),
            city: "Surat".into(),
            state: "Gujarat".into(),
            pincode: "395002".into(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(valid_form().validate().is_ok());
        let without_gst = OnboardingForm {
            gst_number: None,
            ..valid_form()
        };
        assert!(without_gst.validate().is_ok());
    }

    #[rstest]
    #[case::short_username(OnboardingForm { username: "ab".into(), ..valid_form() }, "Username must be at least 3 characters")]
    #[case::bad_username(OnboardingForm { username: "ravi-p".into(), ..valid_form() }, "Username can only contain letters, numbers, and underscores")]
    #[case::missing_name(OnboardingForm { full_name: "  ".into(), ..valid_form() }, "Full name is required")]
    #[case::bad_phone(OnboardingForm { phone: "5876543210".into(), ..valid_form() }, "Please enter a valid 10-digit phone number")]
    #[case::short_phone(OnboardingForm { phone: "98765".into(), ..valid_form() }, "Please enter a valid 10-digit phone number")]
    #[case::bad_gst(OnboardingForm { gst_number: Some("24abcde1234f1z5".into()), ..valid_form() }, "Invalid GST number format")]
    #[case::missing_state(OnboardingForm { state: String::new(), ..valid_form() }, "State is required")]
    #[case::bad_pincode(OnboardingForm { pincode: "39500".into(), ..valid_form() }, "Please enter a valid 6-digit pincode")]
    fn invalid_forms(#[case] form: OnboardingForm, #[case] message: &str) {
        match form.validate() {
            Err(CoreError::Validation(msg)) => assert_eq!(msg, message),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn mobile_digits_keeps_last_ten() {
        assert_eq!(mobile_digits("+91-98765-43210"), "9876543210");
        assert_eq!(mobile_digits("12345"), "12345");
    }
}
