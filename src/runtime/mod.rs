//! Runtime module - executes commands and feeds completions back
//!
//! - `app` - the update loop driver and its worker threads

pub mod app;

pub use app::App;
