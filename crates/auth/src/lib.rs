//! Admin authentication for the New Year experience.
//!
//! This crate provides:
//! - HTTP Basic credential parsing
//! - The static admin credential check
//! - The admin marker stored in a signed cookie after a successful check

mod basic;
mod credentials;
mod error;
mod marker;

pub use basic::*;
pub use credentials::*;
pub use error::*;
pub use marker::*;

/// Name of the cookie carrying the admin marker.
pub const ADMIN_MARKER_COOKIE: &str = "admin-token";

/// Lifetime of an admin marker in hours.
pub const ADMIN_MARKER_TTL_HOURS: i64 = 24;

/// Realm announced in `WWW-Authenticate` challenges.
pub const BASIC_REALM: &str = "Secure Area";
