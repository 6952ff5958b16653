//! Undo/redo history tests for the compose buffer

use basho::composer::Composer;
use basho::editable::TextHistory;

#[test]
fn test_undo_after_two_edits() {
    let mut history = TextHistory::new();
    history.edit("old pond");
    history.edit("old pond\na frog jumps in");

    assert!(history.undo());
    assert_eq!(history.current_text(), "old pond");
    assert!(history.can_undo());
    assert!(history.can_redo());
}

#[test]
fn test_edit_after_undo_discards_redo_branch() {
    let mut history = TextHistory::new();
    history.edit("A");
    history.edit("B");
    history.undo();
    history.edit("C");

    assert!(!history.redo());
    assert!(!history.can_redo());
    assert_eq!(history.current_text(), "C");

    // "B" is unreachable in either direction
    history.undo();
    assert_eq!(history.current_text(), "A");
    history.redo();
    assert_eq!(history.current_text(), "C");
}

#[test]
fn test_undo_and_redo_at_bounds_are_noops() {
    let mut history = TextHistory::new();
    assert!(!history.undo());
    assert!(!history.redo());
    assert_eq!(history.current_text(), "");

    history.edit("x");
    assert!(!history.redo());
    assert!(history.undo());
    assert!(!history.undo());
    assert_eq!(history.cursor(), 0);
}

#[test]
fn test_reset_replaces_history() {
    let mut history = TextHistory::new();
    history.edit("a");
    history.edit("b");

    history.reset("loaded draft");
    assert_eq!(history.current_text(), "loaded draft");
    assert_eq!(history.len(), 1);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_bounded_history_drops_oldest() {
    let mut history = TextHistory::with_max_entries(3);
    for text in ["a", "b", "c", "d"] {
        history.edit(text);
    }
    assert_eq!(history.len(), 3);
    assert!(history.undo());
    assert!(history.undo());
    assert!(!history.undo());
    assert_eq!(history.current_text(), "b");
}

#[test]
fn test_identical_edits_are_recorded() {
    let mut history = TextHistory::new();
    history.edit("same");
    history.edit("same");
    assert_eq!(history.len(), 3);
}

#[test]
fn test_composer_tracks_history() {
    let mut composer = Composer::new();
    composer.set_text("old pond");
    composer.set_text("old pond\nfrog");
    assert!(composer.undo());
    assert_eq!(composer.text(), "old pond");

    let snapshot = composer.snapshot();
    assert!(snapshot.can_undo);
    assert!(snapshot.can_redo);
    assert_eq!(snapshot.word_count, 2);

    composer.load_text("draft");
    assert!(!composer.history().can_undo());
}
