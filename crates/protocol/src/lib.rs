//! HTTP API definitions for the New Year experience
//!
//! This crate defines the JSON bodies exchanged between the server and its
//! clients, along with the route paths both sides agree on.

mod error;
mod requests;
mod responses;
mod routes;

pub use error::*;
pub use requests::*;
pub use responses::*;
pub use routes::*;
