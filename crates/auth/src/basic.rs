//! HTTP Basic credential parsing.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::{AuthError, AuthResult, BASIC_REALM};

/// A username/password pair taken from an `Authorization: Basic` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parses the value of an `Authorization` header.
    ///
    /// The scheme name is matched case-insensitively. The password is
    /// everything after the first colon, so it may itself contain colons.
    pub fn parse_header(value: &str) -> AuthResult<Self> {
        let (scheme, payload) = value
            .trim()
            .split_once(' ')
            .ok_or(AuthError::UnsupportedScheme)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(AuthError::UnsupportedScheme);
        }

        let decoded = STANDARD
            .decode(payload.trim())
            .map_err(|e| AuthError::MalformedCredentials(e.to_string()))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|e| AuthError::MalformedCredentials(e.to_string()))?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or_else(|| AuthError::MalformedCredentials("missing ':' separator".to_string()))?;

        Ok(Self::new(username, password))
    }

    /// Encodes the pair as an `Authorization` header value.
    pub fn to_header_value(&self) -> String {
        let payload = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {payload}")
    }
}

/// Value of the `WWW-Authenticate` header sent with a challenge.
pub fn challenge_header_value() -> String {
    format!("Basic realm=\"{BASIC_REALM}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_header() {
        // "admin:secret"
        let creds = BasicCredentials::parse_header("Basic YWRtaW46c2VjcmV0").unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn test_parse_scheme_is_case_insensitive() {
        let creds = BasicCredentials::parse_header("basic YWRtaW46c2VjcmV0").unwrap();
        assert_eq!(creds.username, "admin");
    }

    #[test]
    fn test_password_may_contain_colons() {
        let header = BasicCredentials::new("admin", "a:b:c").to_header_value();
        let creds = BasicCredentials::parse_header(&header).unwrap();
        assert_eq!(creds.password, "a:b:c");
    }

    #[test]
    fn test_rejects_bearer() {
        assert!(matches!(
            BasicCredentials::parse_header("Bearer token"),
            Err(AuthError::UnsupportedScheme)
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            BasicCredentials::parse_header("Basic !!!not-base64"),
            Err(AuthError::MalformedCredentials(_))
        ));
        // "nocolon"
        assert!(matches!(
            BasicCredentials::parse_header("Basic bm9jb2xvbg=="),
            Err(AuthError::MalformedCredentials(_))
        ));
        assert!(BasicCredentials::parse_header("Basic").is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = BasicCredentials::new("admin", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn test_challenge_header() {
        assert_eq!(challenge_header_value(), "Basic realm=\"Secure Area\"");
    }
}
