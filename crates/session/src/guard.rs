//! Per-page navigation guard.

use std::fmt;

use crate::SessionState;

/// The three pages of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Name entry.
    Enter,
    /// Mood selection.
    Mood,
    /// Countdown and celebration.
    Experience,
}

impl Page {
    /// Route of the page.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Enter => "/enter",
            Self::Mood => "/mood",
            Self::Experience => "/experience",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of running the guard for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The page may render.
    Proceed,
    /// A prerequisite is missing; go to this page instead.
    Redirect(Page),
}

/// Decides whether `page` may render for the given session.
///
/// This is a pure function of the session: it never asks the server whether
/// the remembered user still exists.
pub fn guard(page: Page, session: &SessionState) -> GuardDecision {
    match page {
        Page::Enter => GuardDecision::Proceed,
        Page::Mood => {
            if session.identity().is_none() {
                GuardDecision::Redirect(Page::Enter)
            } else {
                GuardDecision::Proceed
            }
        }
        Page::Experience => {
            if session.identity().is_none() {
                GuardDecision::Redirect(Page::Enter)
            } else if session.selected_mood().is_none() {
                GuardDecision::Redirect(Page::Mood)
            } else {
                GuardDecision::Proceed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use entities::{Mood, NewUser};

    use super::*;
    use crate::{MemorySessionStorage, SessionStorage, SELECTED_MOOD_KEY};

    fn registered(storage: &MemorySessionStorage) -> SessionState {
        let mut state = SessionState::load(storage).unwrap();
        state
            .record_registration(storage, &NewUser::new("Ada").into_user(1))
            .unwrap();
        state
    }

    #[test]
    fn test_enter_never_redirects() {
        let storage = MemorySessionStorage::new();
        assert_eq!(
            guard(Page::Enter, &SessionState::default()),
            GuardDecision::Proceed
        );
        assert_eq!(guard(Page::Enter, &registered(&storage)), GuardDecision::Proceed);
    }

    #[test]
    fn test_unregistered_is_sent_to_enter() {
        let storage = MemorySessionStorage::new();
        storage.set(SELECTED_MOOD_KEY, "bold").unwrap();
        let state = SessionState::load(&storage).unwrap();

        assert_eq!(guard(Page::Mood, &state), GuardDecision::Redirect(Page::Enter));
        assert_eq!(
            guard(Page::Experience, &state),
            GuardDecision::Redirect(Page::Enter)
        );
    }

    #[test]
    fn test_registered_without_mood() {
        let storage = MemorySessionStorage::new();
        let state = registered(&storage);

        assert_eq!(guard(Page::Mood, &state), GuardDecision::Proceed);
        assert_eq!(
            guard(Page::Experience, &state),
            GuardDecision::Redirect(Page::Mood)
        );
    }

    #[test]
    fn test_mood_selected_reaches_everything() {
        let storage = MemorySessionStorage::new();
        let mut state = registered(&storage);
        state.record_mood(&storage, Mood::Minimal).unwrap();

        for page in [Page::Enter, Page::Mood, Page::Experience] {
            assert_eq!(guard(page, &state), GuardDecision::Proceed);
        }
    }
}
