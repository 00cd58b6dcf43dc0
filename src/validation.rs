//! Client-side validation of account forms.
//!
//! Each `validate` method checks a form before it is sent and collects
//! field-scoped messages into [`FieldErrors`], the same shape the API uses
//! for its `errors` payload on 422 responses.
//!
//! # Example
//!
//! ```rust
//! use account_api::validation::{RegisterForm, Validate};
//!
//! let form = RegisterForm {
//!     name: "Ada".to_string(),
//!     email: "ada@example.com".to_string(),
//!     password: "secret1".to_string(),
//!     password_confirmation: "secret2".to_string(),
//! };
//!
//! let errors = form.validate().unwrap_err();
//! assert_eq!(errors.first("password_confirmation"), Some("Passwords do not match"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Field-scoped error messages, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Returns all messages for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns the first message for `field`, the one shown inline.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Returns the first message of the first field with an error.
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        self.0
            .values()
            .find_map(|messages| messages.first())
            .map(String::as_str)
    }

    /// Returns `true` if no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over fields and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A form that can be checked before submission.
pub trait Validate {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// Returns the collected [`FieldErrors`] if any rule fails.
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Login form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, &self.email);
        check_password(&mut errors, "password", &self.password);
        errors.into_result()
    }
}

/// Registration form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterForm {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Repeated password.
    pub password_confirmation: String,
}

impl Validate for RegisterForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_name(&mut errors, &self.name);
        check_email(&mut errors, &self.email);
        check_password(&mut errors, "password", &self.password);
        check_confirmation(&mut errors, &self.password, &self.password_confirmation);
        errors.into_result()
    }
}

/// Profile edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    /// Display name.
    pub name: String,
    /// Phone number, optional.
    pub phone: Option<String>,
    /// Job title.
    pub title: String,
}

impl Validate for ProfileForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_name(&mut errors, &self.name);

        if let Some(phone) = &self.phone {
            if phone.chars().count() > 15 {
                errors.add("phone", "Phone number may be at most 15 characters");
            }
            if !phone
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-') || c.is_whitespace())
            {
                errors.add("phone", "Invalid phone number format");
            }
        }

        if self.title.is_empty() {
            errors.add("title", "Title is required");
        } else if self.title.chars().count() > 30 {
            errors.add("title", "Title may be at most 30 characters");
        }

        errors.into_result()
    }
}

/// Address form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressForm {
    /// Label for the address.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Map provider place identifier.
    pub place_id: String,
}

impl Validate for AddressForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.is_empty() {
            errors.add("name", "Address name is required");
        } else if self.name.chars().count() > 255 {
            errors.add("name", "Address name may be at most 255 characters");
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            errors.add("latitude", "Invalid latitude");
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            errors.add("longitude", "Invalid longitude");
        }
        if self.place_id.is_empty() {
            errors.add("place_id", "Place ID is required");
        }

        errors.into_result()
    }
}

/// New-password form on the reset page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetForm {
    /// New password.
    pub password: String,
    /// Repeated new password.
    pub password_confirmation: String,
}

impl Validate for PasswordResetForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_password(&mut errors, "password", &self.password);
        check_confirmation(&mut errors, &self.password, &self.password_confirmation);
        errors.into_result()
    }
}

/// Forgot-password form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordForm {
    /// Account email.
    pub email: String,
}

impl Validate for ForgotPasswordForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, &self.email);
        errors.into_result()
    }
}

fn check_name(errors: &mut FieldErrors, name: &str) {
    let len = name.chars().count();
    if len == 0 {
        errors.add("name", "Name is required");
    } else if len < 3 {
        errors.add("name", "Name must be at least 3 characters");
    } else if len > 30 {
        errors.add("name", "Name may be at most 30 characters");
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.is_empty() {
        errors.add("email", "Email address is required");
    } else if !is_email(email) {
        errors.add("email", "Enter a valid email address");
    }
}

fn check_password(errors: &mut FieldErrors, field: &str, password: &str) {
    if password.is_empty() {
        errors.add(field, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(field, "Password must be at least 6 characters");
    }
}

fn check_confirmation(errors: &mut FieldErrors, password: &str, confirmation: &str) {
    if confirmation.is_empty() {
        errors.add("password_confirmation", "Password confirmation is required");
    } else if password != confirmation {
        errors.add("password_confirmation", "Passwords do not match");
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}
