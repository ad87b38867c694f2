//! Anonymous tracking token for complaints.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing a [`TrackingToken`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum TokenError {
    /// The input is not exactly [`TrackingToken::LENGTH`] characters.
    #[error("token must be exactly {expected} characters")]
    WrongLength {
        /// Expected token length.
        expected: usize,
    },
    /// The input contains a character outside `[0-9a-f]`.
    #[error("token must contain only lowercase hex characters")]
    InvalidCharacter,
}

/// An opaque tracking token allowing anonymous status lookup.
///
/// Tokens are the first 12 characters of a random UUIDv4's hex form. They
/// are globally unique (enforced by the database) and immutable once
/// assigned to a complaint.
///
/// ## Examples
///
/// ```
/// use shakwa_core::TrackingToken;
///
/// let token = TrackingToken::generate();
/// assert_eq!(token.as_str().len(), 12);
///
/// let parsed = TrackingToken::parse(token.as_str()).unwrap();
/// assert_eq!(parsed, token);
///
/// assert!(TrackingToken::parse("short").is_err());
/// assert!(TrackingToken::parse("ZZZZZZZZZZZZ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TrackingToken(String);

impl TrackingToken {
    /// Number of hex characters in a token.
    pub const LENGTH: usize = 12;

    /// Generate a fresh random token.
    ///
    /// Truncating a UUIDv4 to 12 hex characters keeps 48 random bits, which
    /// makes collisions practically negligible; the database unique
    /// constraint is the only line of defense beyond that.
    #[must_use]
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(hex.chars().take(Self::LENGTH).collect())
    }

    /// Parse a `TrackingToken` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 12 lowercase hex
    /// characters.
    pub fn parse(s: &str) -> Result<Self, TokenError> {
        if s.len() != Self::LENGTH {
            return Err(TokenError::WrongLength {
                expected: Self::LENGTH,
            });
        }

        if !s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
            return Err(TokenError::InvalidCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TrackingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TrackingToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for TrackingToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for TrackingToken {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for TrackingToken {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for TrackingToken {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
