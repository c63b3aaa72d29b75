//! Page navigation and session transitions.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use entities::{Mood, User};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{guard, GuardDecision, Page, SessionError, SessionResult, SessionState, SessionStorage};

/// Default pause between a mood pick and the Experience page.
pub const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_millis(2200);

/// Error type returned by a [`MoodSync`] implementation.
pub type MoodSyncError = Box<dyn std::error::Error + Send + Sync>;

/// Persists a mood pick on the server.
#[async_trait]
pub trait MoodSync: Send + Sync {
    /// Sends the mood update and returns the stored user.
    async fn update_mood(&self, user_id: i64, mood: Mood) -> Result<User, MoodSyncError>;
}

/// What happened to a detached mood update.
#[derive(Debug)]
pub enum MoodSyncOutcome {
    /// The server stored the mood.
    Saved(User),
    /// The update failed; the session mood is not saved on the server.
    Failed(String),
}

/// Result of a mood pick.
#[derive(Debug)]
pub struct MoodSelection {
    /// The page reached after the transition delay.
    pub page: Page,
    /// The detached server update. Navigation never waited for it.
    pub sync: JoinHandle<MoodSyncOutcome>,
}

/// Owns the session for the lifetime of the client and moves between pages.
///
/// The session is loaded once, when the navigator is built, and every page
/// reads it through [`Navigator::session`].
pub struct Navigator {
    storage: Arc<dyn SessionStorage>,
    session: SessionState,
    current: Option<Page>,
}

impl Navigator {
    /// Loads the session from `storage`.
    pub fn load(storage: Arc<dyn SessionStorage>) -> SessionResult<Self> {
        let session = SessionState::load(storage.as_ref())?;
        debug!(phase = ?session.phase(), "Session loaded");
        Ok(Self {
            storage,
            session,
            current: None,
        })
    }

    /// Returns the session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Returns the page currently shown, if any.
    pub fn current(&self) -> Option<Page> {
        self.current
    }

    /// Enters `requested`, following guard redirects until a page may render.
    ///
    /// Returns the page actually shown.
    pub fn visit(&mut self, requested: Page) -> Page {
        let mut page = requested;
        while let GuardDecision::Redirect(next) = guard(page, &self.session) {
            info!(from = %page, to = %next, "Redirecting");
            page = next;
        }
        self.current = Some(page);
        page
    }

    /// Records a successful registration and moves on to mood selection.
    ///
    /// On a storage failure the session is left as it was.
    pub fn complete_registration(&mut self, user: &User) -> SessionResult<Page> {
        self.session
            .record_registration(self.storage.as_ref(), user)?;
        info!(user_id = user.id, "Registered");
        Ok(self.visit(Page::Mood))
    }

    /// Picks a mood.
    ///
    /// The mood is written to the session at once. The server update runs as
    /// a detached task, sent at most once and never retried; its result is
    /// only logged. After `delay` the navigator moves to the Experience page
    /// whether or not the update has finished or succeeded.
    pub async fn select_mood<S>(
        &mut self,
        mood: Mood,
        sync: Arc<S>,
        delay: Duration,
    ) -> SessionResult<MoodSelection>
    where
        S: MoodSync + 'static,
    {
        let user_id = self
            .session
            .identity()
            .map(|identity| identity.user_id)
            .ok_or(SessionError::NotRegistered)?;

        self.session.record_mood(self.storage.as_ref(), mood)?;
        let sync = spawn_mood_sync(sync, user_id, mood);

        tokio::time::sleep(delay).await;
        let page = self.visit(Page::Experience);

        Ok(MoodSelection { page, sync })
    }

    /// Goes back to mood selection, keeping identity and the current mood.
    pub fn change_mood(&mut self) -> Page {
        self.visit(Page::Mood)
    }

    /// Forgets the session and returns to the Enter page.
    pub fn reset(&mut self) -> SessionResult<Page> {
        self.session.clear(self.storage.as_ref())?;
        Ok(self.visit(Page::Enter))
    }
}

fn spawn_mood_sync<S>(sync: Arc<S>, user_id: i64, mood: Mood) -> JoinHandle<MoodSyncOutcome>
where
    S: MoodSync + 'static,
{
    tokio::spawn(async move {
        match sync.update_mood(user_id, mood).await {
            Ok(user) => {
                if user.mood == Some(mood) {
                    debug!(user_id, mood = %mood, "Mood saved");
                } else {
                    warn!(
                        user_id,
                        mood = %mood,
                        stored = ?user.mood,
                        "Server stored a different mood than the session holds"
                    );
                }
                MoodSyncOutcome::Saved(user)
            }
            Err(e) => {
                warn!(
                    user_id,
                    mood = %mood,
                    error = %e,
                    "Mood update failed; session mood is not saved on the server"
                );
                MoodSyncOutcome::Failed(e.to_string())
            }
        }
    })
}
