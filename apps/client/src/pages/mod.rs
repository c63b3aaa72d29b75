//! The three pages of the flow, rendered in the terminal.
//!
//! Pages read lines from any [`AsyncBufRead`] and write to any [`Write`], so
//! the same code drives stdin/stdout and the tests.

pub mod enter;
pub mod experience;
pub mod mood;

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Prints `text` and reads one line. Returns `None` at end of input.
pub(crate) async fn prompt<R, W>(input: &mut R, out: &mut W, text: &str) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{text}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
