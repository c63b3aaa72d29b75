//! Mood enumeration and the theme table keyed by it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four thematic choices a visitor can make.
///
/// This is a closed set: no other value is ever persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Ambitious,
    Calm,
    Bold,
    Minimal,
}

impl Mood {
    /// Every mood, in presentation order.
    pub const ALL: [Mood; 4] = [Mood::Ambitious, Mood::Calm, Mood::Bold, Mood::Minimal];

    /// Converts the mood to its wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ambitious => "ambitious",
            Self::Calm => "calm",
            Self::Bold => "bold",
            Self::Minimal => "minimal",
        }
    }

    /// Parses a mood from its wire representation.
    ///
    /// Matching is exact; `"Bold"` is not a mood.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ambitious" => Some(Self::Ambitious),
            "calm" => Some(Self::Calm),
            "bold" => Some(Self::Bold),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Comma-separated list of accepted values, for error messages.
    pub fn expected_values() -> String {
        Self::ALL
            .iter()
            .map(Mood::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns the presentation theme for this mood.
    pub fn theme(&self) -> &'static MoodTheme {
        match self {
            Self::Ambitious => &THEMES[0],
            Self::Calm => &THEMES[1],
            Self::Bold => &THEMES[2],
            Self::Minimal => &THEMES[3],
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hex colors used when rendering a mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodColors {
    pub bg: &'static str,
    pub primary: &'static str,
    pub accent: &'static str,
}

/// Static presentation data for one mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodTheme {
    /// The mood this theme belongs to.
    pub mood: Mood,
    /// Capitalized display name.
    pub name: &'static str,
    /// Short line shown after the year, e.g. "2027 – No limits."
    pub tagline: &'static str,
    /// One-line description shown on the mood picker.
    pub description: &'static str,
    /// Line shown once the countdown reaches zero.
    pub celebration: &'static str,
    pub colors: MoodColors,
}

impl MoodTheme {
    /// Returns the tagline prefixed with the celebrated year.
    pub fn headline(&self, year: i32) -> String {
        if self.tagline.is_empty() {
            format!("{year} begins.")
        } else {
            format!("{year} – {}", self.tagline)
        }
    }
}

static THEMES: [MoodTheme; 4] = [
    MoodTheme {
        mood: Mood::Ambitious,
        name: "Ambitious",
        tagline: "Build. Push. Win.",
        description: "Fast, energetic, powerful",
        celebration: "The year of ambition begins!",
        colors: MoodColors {
            bg: "#1a0f0a",
            primary: "#ff6b35",
            accent: "#ffcc33",
        },
    },
    MoodTheme {
        mood: Mood::Calm,
        name: "Calm",
        tagline: "Stay calm. Stay focused.",
        description: "Peaceful, breathing, centered",
        celebration: "Peace finds you in the new year",
        colors: MoodColors {
            bg: "#0a1a0f",
            primary: "#4ade80",
            accent: "#22d3ee",
        },
    },
    MoodTheme {
        mood: Mood::Bold,
        name: "Bold",
        tagline: "No limits.",
        description: "Futuristic, sharp, confident",
        celebration: "The future is yours",
        colors: MoodColors {
            bg: "#0a0f1a",
            primary: "#00d9ff",
            accent: "#a855f7",
        },
    },
    MoodTheme {
        mood: Mood::Minimal,
        name: "Minimal",
        tagline: "",
        description: "Simple, poetic, pure",
        celebration: "✧ new year ✧",
        colors: MoodColors {
            bg: "#0a0a0a",
            primary: "#ffffff",
            accent: "#a0a0a0",
        },
    },
];

/// Builds the personalized greeting, e.g. "Ada, your Bold 2027 begins."
pub fn greeting(user_name: &str, mood: Option<Mood>, year: i32) -> String {
    match mood {
        Some(mood) => format!("{user_name}, your {} {year} begins.", mood.theme().name),
        None => format!("{user_name}, your {year} begins."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_only_exact_values() {
        for mood in Mood::ALL {
            assert_eq!(Mood::parse(mood.as_str()), Some(mood));
        }
        assert_eq!(Mood::parse("Bold"), None);
        assert_eq!(Mood::parse("happy"), None);
        assert_eq!(Mood::parse(""), None);
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&Mood::Ambitious).unwrap();
        assert_eq!(json, "\"ambitious\"");

        let mood: Mood = serde_json::from_str("\"minimal\"").unwrap();
        assert_eq!(mood, Mood::Minimal);
        assert!(serde_json::from_str::<Mood>("\"sleepy\"").is_err());
    }

    #[test]
    fn test_every_mood_has_its_own_theme() {
        for mood in Mood::ALL {
            assert_eq!(mood.theme().mood, mood);
        }
    }

    #[test]
    fn test_expected_values() {
        assert_eq!(Mood::expected_values(), "ambitious, calm, bold, minimal");
    }

    #[test]
    fn test_greeting() {
        assert_eq!(
            greeting("Ada", Some(Mood::Bold), 2027),
            "Ada, your Bold 2027 begins."
        );
        assert_eq!(greeting("Ada", None, 2027), "Ada, your 2027 begins.");
    }

    #[test]
    fn test_headline() {
        assert_eq!(Mood::Bold.theme().headline(2027), "2027 – No limits.");
        assert_eq!(Mood::Minimal.theme().headline(2027), "2027 begins.");
    }
}
