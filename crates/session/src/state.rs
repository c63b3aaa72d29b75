//! The session state held by the client.

use entities::{Mood, User};

use crate::{SessionResult, SessionStorage};

/// Storage key for the registered user's id.
pub const USER_ID_KEY: &str = "userId";
/// Storage key for the registered user's name.
pub const USER_NAME_KEY: &str = "userName";
/// Storage key for the last mood picked in this session.
pub const SELECTED_MOOD_KEY: &str = "selected-mood";

/// Identity written once after a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: i64,
    pub user_name: String,
}

/// Where the visitor stands in the flow, derived from what the session holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No identity.
    Unregistered,
    /// Identity held, no mood picked yet.
    Registered,
    /// Identity and mood held.
    MoodSelected,
}

/// Identity and mood as the client remembers them.
///
/// The mood may differ from the one stored on the server if the update
/// request failed; nothing reconciles the two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    identity: Option<SessionIdentity>,
    selected_mood: Option<Mood>,
}

impl SessionState {
    /// Reads the session from storage.
    ///
    /// Identity counts as present only if both keys are set and the id is a
    /// positive integer. Unreadable values are logged and treated as absent.
    pub fn load(storage: &dyn SessionStorage) -> SessionResult<Self> {
        let user_id = storage.get(USER_ID_KEY)?;
        let user_name = storage.get(USER_NAME_KEY)?;

        let identity = match (user_id, user_name) {
            (Some(raw_id), Some(user_name)) if !user_name.is_empty() => {
                match raw_id.parse::<i64>() {
                    Ok(user_id) if user_id > 0 => Some(SessionIdentity { user_id, user_name }),
                    _ => {
                        tracing::warn!(user_id = %raw_id, "Ignoring malformed user id in session");
                        None
                    }
                }
            }
            _ => None,
        };

        let selected_mood = match storage.get(SELECTED_MOOD_KEY)? {
            Some(raw) => {
                let mood = Mood::parse(&raw);
                if mood.is_none() {
                    tracing::warn!(mood = %raw, "Ignoring unknown mood in session");
                }
                mood
            }
            None => None,
        };

        Ok(Self {
            identity,
            selected_mood,
        })
    }

    /// Returns the registered identity, if any.
    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    /// Returns the last picked mood, if any.
    pub fn selected_mood(&self) -> Option<Mood> {
        self.selected_mood
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.identity, self.selected_mood) {
            (None, _) => SessionPhase::Unregistered,
            (Some(_), None) => SessionPhase::Registered,
            (Some(_), Some(_)) => SessionPhase::MoodSelected,
        }
    }

    /// Stores the identity of a freshly registered user.
    ///
    /// Id and name are written in one storage step. The in-memory state only
    /// changes once the write succeeded.
    pub fn record_registration(
        &mut self,
        storage: &dyn SessionStorage,
        user: &User,
    ) -> SessionResult<()> {
        let user_id = user.id.to_string();
        storage.set_many(&[
            (USER_ID_KEY, user_id.as_str()),
            (USER_NAME_KEY, user.name.as_str()),
        ])?;

        self.identity = Some(SessionIdentity {
            user_id: user.id,
            user_name: user.name.clone(),
        });
        Ok(())
    }

    /// Stores the picked mood.
    pub fn record_mood(&mut self, storage: &dyn SessionStorage, mood: Mood) -> SessionResult<()> {
        storage.set(SELECTED_MOOD_KEY, mood.as_str())?;
        self.selected_mood = Some(mood);
        Ok(())
    }

    /// Forgets everything. Only used by the explicit reset command.
    pub fn clear(&mut self, storage: &dyn SessionStorage) -> SessionResult<()> {
        storage.remove_many(&[USER_ID_KEY, USER_NAME_KEY, SELECTED_MOOD_KEY])?;
        *self = Self::default();
        Ok(())
    }
}
