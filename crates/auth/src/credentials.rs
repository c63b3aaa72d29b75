//! The static admin credential.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::{AuthError, AuthResult, BasicCredentials};

/// The single shared username/password pair guarding the admin listing.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl AdminCredentials {
    /// Creates the credential pair. Both values must be non-empty.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> AuthResult<Self> {
        let username = username.into();
        let password = password.into();

        if username.is_empty() {
            return Err(AuthError::Configuration(
                "admin username must not be empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(AuthError::Configuration(
                "admin password must not be empty".to_string(),
            ));
        }

        Ok(Self { username, password })
    }

    /// Returns true if the presented pair matches exactly.
    ///
    /// Both fields are compared through their SHA-256 digests so that the
    /// comparison time does not depend on where the inputs first differ.
    pub fn verify(&self, presented: &BasicCredentials) -> bool {
        let username_ok = digest_eq(&self.username, &presented.username);
        let password_ok = digest_eq(&self.password, &presented.password);
        username_ok & password_ok
    }
}

fn digest_eq(expected: &str, actual: &str) -> bool {
    let expected = Sha256::digest(expected.as_bytes());
    let actual = Sha256::digest(actual.as_bytes());
    expected
        .iter()
        .zip(actual.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_values() {
        assert!(AdminCredentials::new("", "pw").is_err());
        assert!(AdminCredentials::new("admin", "").is_err());
    }

    #[test]
    fn test_verify() {
        let admin = AdminCredentials::new("admin", "s3cret").unwrap();

        assert!(admin.verify(&BasicCredentials::new("admin", "s3cret")));
        assert!(!admin.verify(&BasicCredentials::new("admin", "s3cret ")));
        assert!(!admin.verify(&BasicCredentials::new("Admin", "s3cret")));
        assert!(!admin.verify(&BasicCredentials::new("admin", "")));
        assert!(!admin.verify(&BasicCredentials::new("", "")));
    }

    #[test]
    fn test_debug_hides_password() {
        let admin = AdminCredentials::new("admin", "s3cret").unwrap();
        assert!(!format!("{admin:?}").contains("s3cret"));
    }
}
