//! Basho - Elm-style client core for a haiku feed
//!
//! This crate provides the state types and logic for browsing a paginated,
//! tag-filtered feed of short poems and composing new ones with undo/redo.
//! State changes flow through [`update::update`]; side effects are returned
//! as [`Cmd`] values and executed by [`runtime::App`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod composer;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod feed;
pub mod messages;
pub mod model;
pub mod observer;
pub mod runtime;
pub mod session;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ClientConfig;
pub use messages::Msg;
pub use model::AppModel;
