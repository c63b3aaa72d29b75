//! User-related entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Mood;

/// Maximum number of characters in a user name.
pub const MAX_NAME_CHARS: usize = 20;

/// A registered visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Selected mood, unset until the first mood pick.
    pub mood: Option<Mood>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

/// A user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Creation timestamp to persist.
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Creates a new user stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Attaches the store-assigned id, producing a user with no mood.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            mood: None,
            created_at: self.created_at,
        }
    }
}

/// Why a name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameViolation {
    /// The name is empty.
    Empty,
    /// The name exceeds [`MAX_NAME_CHARS`] characters.
    TooLong,
}

impl NameViolation {
    /// Message reported to the caller.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Name is required",
            Self::TooLong => "Name must be 20 characters or less",
        }
    }
}

/// Checks the constraints the server enforces on a name.
///
/// The name is taken as-is: trimming is the caller's job.
pub fn check_name(name: &str) -> Result<(), NameViolation> {
    if name.is_empty() {
        return Err(NameViolation::Empty);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(NameViolation::TooLong);
    }
    Ok(())
}
