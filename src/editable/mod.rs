//! Text editing state for the compose surface.
//!
//! The compose box only ever edits whole-buffer snapshots (the input
//! surface hands over the full value on every change), so history is kept
//! as a list of snapshots rather than as inverse operations.
//!
//! # Example
//!
//! ```
//! use basho::editable::TextHistory;
//!
//! let mut history = TextHistory::new();
//! history.edit("old pond");
//! history.edit("old pond\na frog jumps in");
//! history.undo();
//!
//! assert_eq!(history.current_text(), "old pond");
//! assert!(history.can_redo());
//! ```

mod history;

pub use history::{TextHistory, DEFAULT_MAX_ENTRIES};
