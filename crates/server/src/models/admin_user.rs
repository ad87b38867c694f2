//! Admin account domain types.

use shakwa_core::AdminUserId;

/// An administrator account (domain type).
///
/// The password hash never leaves the repository layer; handlers only see
/// this struct.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// Unique admin account ID.
    pub id: AdminUserId,
    /// Unique login name.
    pub username: String,
}
