//! Core types for Shakwa.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod phone;
pub mod status;
pub mod token;

pub use email::{Email, EmailError};
pub use id::*;
pub use phone::{Phone, PhoneError};
pub use status::ComplaintStatus;
pub use token::{TokenError, TrackingToken};
