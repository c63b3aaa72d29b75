//! Admin marker issued after a successful credential check.
//!
//! The marker itself is only an issue timestamp. Integrity comes from the
//! signed cookie that carries it; this module decides whether a marker that
//! passed signature checks is still within its lifetime.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::Rng;

use crate::{AuthError, AuthResult, ADMIN_MARKER_TTL_HOURS};

/// Minimum length of a cookie signing secret, in bytes.
pub const MIN_SIGNING_SECRET_LEN: usize = 64;

/// Proof that the holder passed the admin challenge at `issued_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminMarker {
    issued_at: DateTime<Utc>,
}

impl AdminMarker {
    /// Issues a marker stamped with `now`.
    pub fn issue(now: DateTime<Utc>) -> Self {
        Self { issued_at: now }
    }

    /// Returns the marker lifetime.
    pub fn ttl() -> Duration {
        Duration::hours(ADMIN_MARKER_TTL_HOURS)
    }

    /// Serializes the marker into a cookie value.
    pub fn to_cookie_value(&self) -> String {
        self.issued_at.timestamp().to_string()
    }

    /// Reads a marker back from a cookie value.
    pub fn from_cookie_value(value: &str) -> AuthResult<Self> {
        let secs: i64 = value.parse().map_err(|_| AuthError::InvalidMarker)?;
        let issued_at = Utc
            .timestamp_opt(secs, 0)
            .single()
            .ok_or(AuthError::InvalidMarker)?;
        Ok(Self { issued_at })
    }

    /// Returns true if the marker is still valid at `now`.
    ///
    /// Markers from the future are rejected as well.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.issued_at <= now && now - self.issued_at < Self::ttl()
    }
}

/// Generates a random secret suitable for signing admin marker cookies.
pub fn generate_signing_secret() -> Vec<u8> {
    let mut secret = vec![0u8; MIN_SIGNING_SECRET_LEN];
    rand::rng().fill(secret.as_mut_slice());
    secret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_round_trip() {
        let now = Utc.timestamp_opt(1_767_225_600, 0).unwrap();
        let marker = AdminMarker::issue(now);

        let value = marker.to_cookie_value();
        assert_eq!(value, "1767225600");
        assert_eq!(AdminMarker::from_cookie_value(&value).unwrap(), marker);
    }

    #[test]
    fn test_rejects_non_numeric_value() {
        assert!(AdminMarker::from_cookie_value("authenticated").is_err());
        assert!(AdminMarker::from_cookie_value("").is_err());
    }

    #[test]
    fn test_lifetime() {
        let issued = Utc::now();
        let marker = AdminMarker::issue(issued);

        assert!(marker.is_valid_at(issued));
        assert!(marker.is_valid_at(issued + Duration::hours(23)));
        assert!(!marker.is_valid_at(issued + Duration::hours(24)));
        assert!(!marker.is_valid_at(issued - Duration::minutes(1)));
    }

    #[test]
    fn test_signing_secret() {
        let secret = generate_signing_secret();
        assert_eq!(secret.len(), MIN_SIGNING_SECRET_LEN);
    }
}
