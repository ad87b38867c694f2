//! Domain models for the server.

pub mod admin_user;
pub mod complaint;
pub mod session;

pub use admin_user::AdminUser;
pub use complaint::{Complaint, NewComplaint, StatusCounts};
pub use session::{CurrentAdmin, Flash, session_keys};
