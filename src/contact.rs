//! Contact form validation.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use thiserror::Error;

use crate::cms::Application;
use crate::i18n::Language;

const MIN_NAME_CHARS: usize = 2;
const MIN_PHONE_DIGITS: usize = 9;
const MIN_MESSAGE_CHARS: usize = 5;

static NON_DIGIT_REGEX: OnceLock<Regex> = OnceLock::new();

fn non_digit_regex() -> &'static Regex {
    NON_DIGIT_REGEX.get_or_init(|| Regex::new(r"\D").expect("Invalid non-digit regex"))
}

/// Raw form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("name must be at least 2 characters")]
    NameTooShort,
    #[error("phone must contain at least 9 digits")]
    PhoneTooShort,
    #[error("message must be at least 5 characters")]
    MessageTooShort,
}

impl ContactError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ContactError::NameTooShort => "name",
            ContactError::PhoneTooShort => "phone",
            ContactError::MessageTooShort => "message",
        }
    }

    pub fn localized(&self, language: Language) -> &'static str {
        let strings = language.strings();
        match self {
            ContactError::NameTooShort => strings.contact_name_invalid,
            ContactError::PhoneTooShort => strings.contact_phone_invalid,
            ContactError::MessageTooShort => strings.contact_message_invalid,
        }
    }
}

impl ContactForm {
    /// Validate every field and build the application to submit.
    ///
    /// All failing fields are reported at once, in form order.
    pub fn validate(&self) -> Result<Application, Vec<ContactError>> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        let message = self.message.trim();

        let mut errors = Vec::new();
        if name.chars().count() < MIN_NAME_CHARS {
            errors.push(ContactError::NameTooShort);
        }
        if phone_digits(phone).len() < MIN_PHONE_DIGITS {
            errors.push(ContactError::PhoneTooShort);
        }
        if message.chars().count() < MIN_MESSAGE_CHARS {
            errors.push(ContactError::MessageTooShort);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Application {
            name: name.to_string(),
            phone: phone.to_string(),
            message: message.to_string(),
        })
    }
}

/// Digits of a phone number with formatting stripped.
pub fn phone_digits(phone: &str) -> String {
    non_digit_regex().replace_all(phone, "").into_owned()
}
