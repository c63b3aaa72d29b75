//! User storage for the New Year experience
//!
//! This crate provides a storage abstraction over the single `users` table.
//! It ships an in-memory store (for tests) and a SQLite store backed by sqlx.

mod error;
mod memory;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use sqlite::*;
pub use traits::*;
