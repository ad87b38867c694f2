//! Form payloads and field-level validation.
//!
//! Validation mirrors the rules enforced client-side: every rule produces a
//! localized message keyed by field name so templates can render errors next
//! to the offending input.

use std::collections::HashMap;

use serde::Deserialize;
use shakwa_core::types::{Email, Phone, PhoneError};

/// Maximum length accepted for the submitter name.
pub const NAME_MAX_LENGTH: usize = 100;

/// Maximum length accepted for the complaint title.
pub const TITLE_MAX_LENGTH: usize = 255;

/// Field name to localized message.
pub type FieldErrors = HashMap<&'static str, String>;

/// Public complaint submission form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl ComplaintForm {
    /// Validate every field, collecting localized messages for each failure.
    pub fn validate(&self) -> std::result::Result<ValidatedComplaint, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name", "الاسم الكامل مطلوب.".to_string());
        } else if name.chars().count() > NAME_MAX_LENGTH {
            errors.insert("name", "الاسم يجب ألا يتجاوز 100 حرف.".to_string());
        }

        let phone = match Phone::parse(&self.phone) {
            Ok(phone) => Some(phone),
            Err(err) => {
                errors.insert("phone", phone_error_message(&err).to_string());
                None
            }
        };

        let email = if self.email.trim().is_empty() {
            None
        } else {
            match Email::parse(&self.email) {
                Ok(email) => Some(email),
                Err(_) => {
                    errors.insert("email", "البريد الإلكتروني غير صالح.".to_string());
                    None
                }
            }
        };

        let title = self.title.trim();
        if title.is_empty() {
            errors.insert("title", "العنوان مطلوب.".to_string());
        } else if title.chars().count() > TITLE_MAX_LENGTH {
            errors.insert("title", "العنوان يجب ألا يتجاوز 255 حرفًا.".to_string());
        }

        let content = self.content.trim();
        if content.is_empty() {
            errors.insert("content", "المحتوى مطلوب.".to_string());
        }

        if errors.is_empty() {
            Ok(ValidatedComplaint {
                name: name.to_string(),
                // validation above guarantees the phone parsed
                phone: phone.ok_or_else(FieldErrors::new)?,
                email,
                title: title.to_string(),
                content: content.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}

/// Localized message for a phone validation failure.
const fn phone_error_message(err: &PhoneError) -> &'static str {
    match err {
        PhoneError::Empty => "رقم الموبايل مطلوب.",
        PhoneError::NonDigit => "يجب أن يحتوي رقم الهاتف على أرقام فقط",
        PhoneError::BadInternationalLength => {
            "رقم الهاتف مع مفتاح الدولة يجب أن يكون 13 رقمًا ويبدأ بـ +964"
        }
        PhoneError::BadLocalLength => "رقم الهاتف يجب أن يكون 11 رقمًا بدون مفتاح الدولة",
    }
}

/// A complaint form that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedComplaint {
    pub name: String,
    pub phone: Phone,
    pub email: Option<Email>,
    pub title: String,
    pub content: String,
}

/// Admin login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Dashboard form for creating another admin account.
#[derive(Debug, Deserialize)]
pub struct AddUserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Dashboard form for updating a complaint status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusForm {
    #[serde(default)]
    pub status: String,
}
