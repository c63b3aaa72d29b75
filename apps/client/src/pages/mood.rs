//! Mood page: pick one of the four themes.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use entities::Mood;
use session::{MoodSelection, MoodSync, Navigator};
use tokio::io::AsyncBufRead;

use super::prompt;

/// Lists the moods with their description, marking the current one.
pub fn render_choices(current: Option<Mood>) -> String {
    let mut lines = String::from("Choose your mood for the new year:\n");
    for (index, mood) in Mood::ALL.iter().enumerate() {
        let theme = mood.theme();
        let marker = if current == Some(*mood) { "  (current)" } else { "" };
        lines.push_str(&format!(
            "  {}. {:<10} {}{}\n",
            index + 1,
            theme.name,
            theme.description,
            marker
        ));
    }
    lines
}

/// Accepts a 1-based index or a mood name in any case.
pub fn parse_choice(raw: &str) -> Option<Mood> {
    let raw = raw.trim();
    if let Ok(index) = raw.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| Mood::ALL.get(i).copied());
    }
    Mood::parse(&raw.to_lowercase())
}

/// Applies a pick: session first, detached server update, then the Experience
/// page after `delay`.
pub async fn choose<S, W>(
    navigator: &mut Navigator,
    sync: Arc<S>,
    mood: Mood,
    delay: Duration,
    out: &mut W,
) -> anyhow::Result<MoodSelection>
where
    S: MoodSync + 'static,
    W: Write,
{
    writeln!(out, "\n{} selected. Setting the mood...", mood.theme().name)?;
    out.flush()?;

    Ok(navigator.select_mood(mood, sync, delay).await?)
}

/// Prompts for a mood until one is picked. Returns `None` at end of input.
pub async fn run<S, R, W>(
    navigator: &mut Navigator,
    sync: Arc<S>,
    delay: Duration,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<MoodSelection>>
where
    S: MoodSync + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if let Some(identity) = navigator.session().identity() {
        writeln!(out, "\nHello, {}.", identity.user_name)?;
    }
    write!(out, "{}", render_choices(navigator.session().selected_mood()))?;

    loop {
        let Some(line) = prompt(input, out, "Mood [1-4]: ").await? else {
            return Ok(None);
        };

        match parse_choice(&line) {
            Some(mood) => return Ok(Some(choose(navigator, sync, mood, delay, out).await?)),
            None => writeln!(
                out,
                "  Pick 1-4 or one of: {}",
                Mood::expected_values()
            )?,
        }
    }
}
