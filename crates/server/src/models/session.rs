//! Session-stored types for authentication and flash messages.

use serde::{Deserialize, Serialize};

use shakwa_core::AdminUserId;

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub id: AdminUserId,
    /// Admin's login name.
    pub username: String,
}

/// A one-shot message shown on the next rendered page.
///
/// Mirrors the usual flash pattern: pushed by a handler before a redirect,
/// drained by the next page render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    /// Display category: `success` or `danger`.
    pub category: String,
    /// Localized message text.
    pub message: String,
}

impl Flash {
    /// A success flash.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: "success".to_string(),
            message: message.into(),
        }
    }

    /// An error flash.
    #[must_use]
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: "danger".to_string(),
            message: message.into(),
        }
    }
}

/// Session keys for stored data.
pub mod session_keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for pending flash messages.
    pub const FLASH_MESSAGES: &str = "flash_messages";
}
