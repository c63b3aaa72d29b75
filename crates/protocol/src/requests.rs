//! Request bodies.

use entities::Mood;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/register`. A missing name reads as empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
}

/// Body of `PATCH /api/users/{id}/mood`.
///
/// The mood travels as a plain string so the server can report an unknown
/// value with its own message instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMoodRequest {
    pub mood: String,
}

impl UpdateMoodRequest {
    pub fn new(mood: Mood) -> Self {
        Self {
            mood: mood.as_str().to_string(),
        }
    }
}
