//! Client-held session state and page navigation.
//!
//! The session is the visitor's identity and mood as the client remembers
//! them, persisted in a small key/value [`SessionStorage`]. A [`Navigator`]
//! owns the loaded [`SessionState`], runs the navigation [`guard`] on every
//! page entry and performs the state transitions:
//!
//! ```text
//! Unregistered --register--> Registered --pick mood--> MoodSelected --delay--> Experience
//!                                 ^                                               |
//!                                 +------------------ change mood ----------------+
//! ```

mod error;
mod guard;
mod navigator;
mod state;
mod storage;

pub use error::*;
pub use guard::*;
pub use navigator::*;
pub use state::*;
pub use storage::*;
