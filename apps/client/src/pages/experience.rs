//! Experience page: greeting, countdown and celebration.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use entities::{greeting, Mood};
use session::Navigator;
use tracing::info;

use crate::countdown::Countdown;

/// How the Experience page ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceEnd {
    /// The countdown reached zero and the celebration was shown.
    Celebrated,
    /// The visitor stopped it.
    Stopped,
}

/// Greeting and theme headline shown above the countdown.
pub fn render_intro(user_name: &str, mood: Mood, year: i32) -> String {
    format!(
        "{}\n{}\n",
        greeting(user_name, Some(mood), year),
        mood.theme().headline(year)
    )
}

/// Runs the countdown until it reaches zero or `stop` resolves.
pub async fn run<W, F>(
    navigator: &Navigator,
    target_year: Option<i32>,
    out: &mut W,
    stop: F,
) -> anyhow::Result<ExperienceEnd>
where
    W: Write,
    F: Future<Output = ()>,
{
    let session = navigator.session();
    let identity = session
        .identity()
        .context("Experience page needs a registered user")?;
    let mood = session
        .selected_mood()
        .context("Experience page needs a selected mood")?;
    let countdown =
        Countdown::local(target_year).context("New Year midnight does not exist in this zone")?;

    writeln!(
        out,
        "\n{}",
        render_intro(&identity.user_name, mood, countdown.year())
    )?;

    tokio::pin!(stop);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            biased;
            _ = &mut stop => {
                writeln!(out)?;
                info!("Experience stopped");
                return Ok(ExperienceEnd::Stopped);
            }
            _ = ticker.tick() => {
                let now = chrono::Local::now();
                if countdown.is_reached(&now) {
                    writeln!(out, "\n{}", mood.theme().celebration)?;
                    info!(year = countdown.year(), mood = %mood, "Countdown reached");
                    return Ok(ExperienceEnd::Celebrated);
                }
                write!(out, "\r{}", countdown.time_left(&now))?;
                out.flush()?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use entities::NewUser;
    use session::{MemorySessionStorage, MoodSync, MoodSyncError};

    use super::*;

    struct NoopSync;

    #[async_trait::async_trait]
    impl MoodSync for NoopSync {
        async fn update_mood(&self, _: i64, _: Mood) -> Result<entities::User, MoodSyncError> {
            Err("offline".into())
        }
    }

    async fn ready_navigator(mood: Mood) -> Navigator {
        let mut navigator = Navigator::load(Arc::new(MemorySessionStorage::new())).unwrap();
        navigator
            .complete_registration(&NewUser::new("Ada").into_user(1))
            .unwrap();
        navigator
            .select_mood(mood, Arc::new(NoopSync), Duration::ZERO)
            .await
            .unwrap();
        navigator
    }

    #[test]
    fn test_render_intro() {
        assert_eq!(
            render_intro("Ada", Mood::Bold, 2027),
            "Ada, your Bold 2027 begins.\n2027 – No limits.\n"
        );
        assert_eq!(
            render_intro("Ada", Mood::Minimal, 2027),
            "Ada, your Minimal 2027 begins.\n2027 begins.\n"
        );
    }

    #[tokio::test]
    async fn test_past_target_celebrates_at_once() {
        let navigator = ready_navigator(Mood::Calm).await;
        let mut out = Vec::new();

        let end = run(&navigator, Some(2000), &mut out, std::future::pending())
            .await
            .unwrap();

        assert_eq!(end, ExperienceEnd::Celebrated);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Ada, your Calm 2000 begins."));
        assert!(out.contains("Peace finds you in the new year"));
    }

    #[tokio::test]
    async fn test_stop_ends_countdown() {
        let navigator = ready_navigator(Mood::Bold).await;
        let mut out = Vec::new();

        let end = run(&navigator, Some(9999), &mut out, async {}).await.unwrap();

        assert_eq!(end, ExperienceEnd::Stopped);
        assert!(!String::from_utf8(out).unwrap().contains("The future is yours"));
    }

    #[tokio::test]
    async fn test_requires_mood() {
        let mut navigator = Navigator::load(Arc::new(MemorySessionStorage::new())).unwrap();
        navigator
            .complete_registration(&NewUser::new("Ada").into_user(1))
            .unwrap();

        let result = run(&navigator, None, &mut Vec::new(), std::future::pending()).await;
        assert!(result.is_err());
    }
}
