//! Core entity definitions for the New Year experience.
//!
//! This crate defines the data types shared by the server, the store and the
//! terminal client: the persisted [`User`], the closed [`Mood`] enumeration and
//! the static [`MoodTheme`] table that drives every mood-dependent presentation.

mod mood;
mod user;

pub use mood::*;
pub use user::*;
