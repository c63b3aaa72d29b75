//! Enter page: name entry and registration.

use std::io::Write;

use entities::MAX_NAME_CHARS;
use session::{Navigator, Page, SessionError};
use thiserror::Error;
use tokio::io::AsyncBufRead;
use tracing::warn;

use super::prompt;
use crate::server_client::{ApiClient, ClientError};

/// Local checks on a typed name, run before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameInputError {
    Empty,
    InvalidCharacters,
    TooLong,
}

impl NameInputError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Please enter your name",
            Self::InvalidCharacters => "Only letters and spaces are allowed",
            Self::TooLong => "Name must be 20 characters or less",
        }
    }
}

/// Trims the input and checks it holds only letters and spaces, at most
/// [`MAX_NAME_CHARS`] of them.
pub fn clean_name(raw: &str) -> Result<String, NameInputError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameInputError::Empty);
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        return Err(NameInputError::InvalidCharacters);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(NameInputError::TooLong);
    }
    Ok(name.to_string())
}

/// Why a registration attempt did not go through. Displays as the inline
/// message shown under the prompt.
#[derive(Debug, Error)]
pub enum EnterError {
    #[error("{}", .0.message())]
    Input(NameInputError),

    #[error("{0}")]
    Rejected(String),

    #[error("Something went wrong. Please try again.")]
    Unreachable(#[source] ClientError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Registers `raw` once. On success the identity is stored and the Mood page
/// is returned; on failure the session is untouched.
pub async fn submit(
    navigator: &mut Navigator,
    api: &ApiClient,
    raw: &str,
) -> Result<Page, EnterError> {
    let name = clean_name(raw).map_err(EnterError::Input)?;

    let user = api.register(&name).await.map_err(|e| match e {
        ClientError::Rejected(message) => EnterError::Rejected(message),
        other => {
            warn!(error = %other, "Registration request failed");
            EnterError::Unreachable(other)
        }
    })?;

    Ok(navigator.complete_registration(&user)?)
}

/// Prompts until a registration succeeds. Returns `None` at end of input.
pub async fn run<R, W>(
    navigator: &mut Navigator,
    api: &ApiClient,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<Page>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "\nYour Personal Entry\n")?;

    loop {
        let Some(line) = prompt(input, out, "Enter your name: ").await? else {
            return Ok(None);
        };

        match submit(navigator, api, &line).await {
            Ok(page) => return Ok(Some(page)),
            Err(EnterError::Session(e)) => return Err(e.into()),
            Err(e) => writeln!(out, "  {e}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use session::{MemorySessionStorage, SessionPhase};

    use super::*;
    use crate::testing::spawn_server;

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("  Ada Lovelace \n").unwrap(), "Ada Lovelace");
        assert_eq!(clean_name("   "), Err(NameInputError::Empty));
        assert_eq!(clean_name("R2D2"), Err(NameInputError::InvalidCharacters));
        assert_eq!(clean_name("Zoë"), Err(NameInputError::InvalidCharacters));
        assert_eq!(clean_name(&"a".repeat(21)), Err(NameInputError::TooLong));
        assert!(clean_name(&"a".repeat(20)).is_ok());
    }

    #[tokio::test]
    async fn test_retries_after_inline_errors() {
        let (url, _) = spawn_server().await;
        let api = ApiClient::new(&url);
        let mut navigator = Navigator::load(Arc::new(MemorySessionStorage::new())).unwrap();
        let mut input: &[u8] = b"R2D2\nAda\n";
        let mut out = Vec::new();

        let page = run(&mut navigator, &api, &mut input, &mut out).await.unwrap();

        assert_eq!(page, Some(Page::Mood));
        assert_eq!(navigator.session().phase(), SessionPhase::Registered);
        assert_eq!(navigator.session().identity().unwrap().user_name, "Ada");
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Only letters and spaces are allowed"));
    }

    #[tokio::test]
    async fn test_unreachable_server_keeps_session() {
        let api = ApiClient::new("http://127.0.0.1:9");
        let mut navigator = Navigator::load(Arc::new(MemorySessionStorage::new())).unwrap();

        let err = submit(&mut navigator, &api, "Ada").await.unwrap_err();

        assert_eq!(err.to_string(), "Something went wrong. Please try again.");
        assert_eq!(navigator.session().phase(), SessionPhase::Unregistered);
    }

    #[tokio::test]
    async fn test_end_of_input() {
        let api = ApiClient::new("http://127.0.0.1:9");
        let mut navigator = Navigator::load(Arc::new(MemorySessionStorage::new())).unwrap();
        let mut input: &[u8] = b"";

        let page = run(&mut navigator, &api, &mut input, &mut Vec::new()).await.unwrap();
        assert_eq!(page, None);
    }
}
