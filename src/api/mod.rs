//! REST client for the haiku backend.
//!
//! All persistence, authentication and like counting happen server-side;
//! this module only maps endpoints to typed calls.

mod backend;
mod client;
mod error;

pub use backend::Backend;
pub use client::{ApiClient, TokenResponse};
pub use error::{error_message, ApiError};
