//! Submitter phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains something other than digits (after an optional `+`).
    #[error("phone number must contain only digits")]
    NonDigit,
    /// A number with the `+964` country code must be exactly 13 characters.
    #[error("phone number with country code must be 13 characters and start with +964")]
    BadInternationalLength,
    /// A number without country code must be exactly 11 digits.
    #[error("phone number without country code must be 11 digits")]
    BadLocalLength,
}

/// A submitter's mobile phone number.
///
/// Accepts either a local number (exactly 11 digits, e.g. `07701234567`) or
/// one carrying the `+964` country code (exactly 13 characters, e.g.
/// `+964770123456`). Input is trimmed before validation.
///
/// ## Examples
///
/// ```
/// use shakwa_core::Phone;
///
/// assert!(Phone::parse("07701234567").is_ok());
/// assert!(Phone::parse("+964770123456").is_ok());
///
/// assert!(Phone::parse("0770123").is_err());        // too short
/// assert!(Phone::parse("+15551234567").is_err());   // wrong country code
/// assert!(Phone::parse("0770-123-4567").is_err());  // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Length of a number carrying the `+964` country code.
    pub const INTERNATIONAL_LENGTH: usize = 13;

    /// Length of a local number without country code.
    pub const LOCAL_LENGTH: usize = 11;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains non-digits, or does
    /// not match the country-code-aware length rule.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let digits = s.strip_prefix('+').unwrap_or(s);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NonDigit);
        }

        if s.starts_with('+') {
            if !s.starts_with("+964") || s.len() != Self::INTERNATIONAL_LENGTH {
                return Err(PhoneError::BadInternationalLength);
            }
        } else if s.len() != Self::LOCAL_LENGTH {
            return Err(PhoneError::BadLocalLength);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Phone {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Phone {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Phone {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
