//! Edit operations against the active surface

use crate::{BatchEdit, ExtractRequest, InputSurface, SnapshotLimits, SurfaceSlot};
use input_types::{KeyCode, KeyEvent};
use thiserror::Error;
use tracing::{debug, warn};

/// Cursor placement for committed text: right after the inserted text
const CURSOR_AFTER_TEXT: i32 = 1;

/// Edit error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("No input surface is focused")]
    SurfaceUnavailable,

    #[error("Input surface could not produce a text snapshot")]
    SnapshotUnavailable,

    #[error("Input surface rejected {operation}")]
    Rejected { operation: &'static str },
}

/// Edit executor
///
/// Performs read-modify-write operations on whatever surface currently
/// sits in the slot. With no surface every operation is a no-op that
/// reports `EditError::SurfaceUnavailable`.
#[derive(Debug, Clone)]
pub struct EditExecutor {
    slot: SurfaceSlot,
}

impl EditExecutor {
    /// Creates an executor over `slot`
    pub fn new(slot: SurfaceSlot) -> Self {
        Self { slot }
    }

    /// Returns the slot this executor edits
    pub fn slot(&self) -> &SurfaceSlot {
        &self.slot
    }

    /// Returns true if a surface is focused
    pub fn is_surface_available(&self) -> bool {
        self.slot.is_available()
    }

    /// Inserts `text` at the cursor, leaving the cursor after it
    pub fn insert_text(&self, text: &str) -> Result<(), EditError> {
        self.edit(|surface| commit(surface, text))
    }

    /// Deletes all text around the cursor
    ///
    /// Returns the number of characters deleted.
    pub fn clear(&self) -> Result<usize, EditError> {
        self.edit(clear_surrounding)
    }

    /// Replaces the field's text as one atomic edit
    ///
    /// Readers of the surface never observe the cleared-but-not-yet-filled
    /// state: both steps run inside a single batch that is closed on every
    /// exit path.
    pub fn set_text(&self, text: &str) -> Result<(), EditError> {
        self.edit(|surface| {
            let mut batch = BatchEdit::begin(surface);
            clear_surrounding(&mut *batch)?;
            commit(&mut *batch, text)
        })
    }

    /// Dispatches a key-down event
    pub fn send_key(&self, code: KeyCode) -> Result<(), EditError> {
        self.edit(|surface| {
            if surface.send_key_event(KeyEvent::down(code)) {
                Ok(())
            } else {
                Err(EditError::Rejected {
                    operation: "key event",
                })
            }
        })
    }

    /// Reads the field's text for a focus notification
    ///
    /// Never fails: an unavailable surface or unreadable text yields "".
    pub fn snapshot_text(&self, limits: &SnapshotLimits) -> String {
        let request = ExtractRequest::bounded(limits);
        self.slot
            .with_surface(|surface| surface.extracted_text(&request))
            .flatten()
            .unwrap_or_default()
    }

    fn edit<R>(
        &self,
        f: impl FnOnce(&mut dyn InputSurface) -> Result<R, EditError>,
    ) -> Result<R, EditError> {
        self.slot
            .with_surface(f)
            .unwrap_or(Err(EditError::SurfaceUnavailable))
    }
}

fn commit(surface: &mut dyn InputSurface, text: &str) -> Result<(), EditError> {
    if surface.commit_text(text, CURSOR_AFTER_TEXT) {
        Ok(())
    } else {
        warn!(chars = text.chars().count(), "input surface rejected commit");
        Err(EditError::Rejected {
            operation: "commit",
        })
    }
}

// The surface only deletes relative to the cursor, so measure the visible
// text first and delete exactly what lies on either side.
fn clear_surrounding(surface: &mut dyn InputSurface) -> Result<usize, EditError> {
    let current = surface
        .extracted_text(&ExtractRequest::unbounded())
        .ok_or(EditError::SnapshotUnavailable)?;
    let total = current.chars().count();
    if total == 0 {
        return Ok(0);
    }

    // A side that cannot be read would leave text behind; delete nothing.
    let before = surface
        .text_before_cursor(total)
        .ok_or(EditError::SnapshotUnavailable)?
        .chars()
        .count();
    let after = surface
        .text_after_cursor(total)
        .ok_or(EditError::SnapshotUnavailable)?
        .chars()
        .count();
    debug!(total, before, after, "clearing input surface");

    if surface.delete_surrounding_text(before, after) {
        Ok(before + after)
    } else {
        Err(EditError::Rejected {
            operation: "delete",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySurface, SurfaceOp};

    fn executor_with(surface: &MemorySurface) -> EditExecutor {
        let slot = SurfaceSlot::new();
        slot.attach(Box::new(surface.clone()));
        EditExecutor::new(slot)
    }

    #[test]
    fn test_insert_text_advances_cursor() {
        let surface = MemorySurface::new("Hello");
        let executor = executor_with(&surface);

        executor.insert_text(" World").unwrap();

        assert_eq!(surface.text(), "Hello World");
        assert_eq!(surface.cursor(), 11);
    }

    #[test]
    fn test_clear_deletes_both_sides_of_cursor() {
        let surface = MemorySurface::with_cursor("abcdef", 3);
        let executor = executor_with(&surface);

        assert_eq!(executor.clear().unwrap(), 6);

        assert_eq!(surface.text(), "");
        assert_eq!(surface.ops(), vec![SurfaceOp::Delete { before: 3, after: 3 }]);
    }

    #[test]
    fn test_clear_empty_field_touches_nothing() {
        let surface = MemorySurface::new("");
        let executor = executor_with(&surface);

        assert_eq!(executor.clear().unwrap(), 0);
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_clear_without_snapshot_is_abandoned() {
        let surface = MemorySurface::new("keep");
        surface.set_extract_available(false);
        let executor = executor_with(&surface);

        assert_eq!(executor.clear(), Err(EditError::SnapshotUnavailable));
        assert_eq!(surface.text(), "keep");
    }

    #[test]
    fn test_clear_with_unreadable_cursor_side_deletes_nothing() {
        let surface = MemorySurface::with_cursor("abcXdef", 3);
        surface.set_cursor_reads_available(false);
        let executor = executor_with(&surface);

        assert_eq!(executor.clear(), Err(EditError::SnapshotUnavailable));
        assert_eq!(executor.set_text("new"), Err(EditError::SnapshotUnavailable));
        assert_eq!(surface.text(), "abcXdef");
        assert!(!surface
            .ops()
            .iter()
            .any(|op| matches!(op, SurfaceOp::Delete { .. } | SurfaceOp::Commit(_))));
        assert_eq!(surface.batch_depth(), 0);
    }

    #[test]
    fn test_set_text_is_one_batch() {
        let surface = MemorySurface::with_cursor("old", 1);
        let executor = executor_with(&surface);

        executor.set_text("Hello World").unwrap();

        assert_eq!(surface.text(), "Hello World");
        assert_eq!(
            surface.ops(),
            vec![
                SurfaceOp::BeginBatch,
                SurfaceOp::Delete { before: 1, after: 2 },
                SurfaceOp::Commit("Hello World".to_string()),
                SurfaceOp::EndBatch,
            ]
        );
        assert_eq!(
            surface.visible_history(),
            vec!["old".to_string(), "Hello World".to_string()]
        );
    }

    #[test]
    fn test_set_text_closes_batch_when_commit_rejected() {
        let surface = MemorySurface::new("old");
        surface.set_commit_behavior(crate::CommitBehavior::Reject);
        let executor = executor_with(&surface);

        let result = executor.set_text("new");

        assert_eq!(
            result,
            Err(EditError::Rejected {
                operation: "commit"
            })
        );
        assert_eq!(surface.batch_depth(), 0);
        assert_eq!(surface.ops().last(), Some(&SurfaceOp::EndBatch));
    }

    #[test]
    fn test_send_key_does_not_edit_text() {
        let surface = MemorySurface::new("abc");
        let executor = executor_with(&surface);

        executor.send_key(KeyCode::ENTER).unwrap();

        assert_eq!(surface.key_events(), vec![KeyEvent::down(KeyCode::ENTER)]);
        assert_eq!(surface.text(), "abc");
    }

    #[test]
    fn test_operations_without_surface_are_noops() {
        let executor = EditExecutor::new(SurfaceSlot::new());

        assert_eq!(executor.insert_text("x"), Err(EditError::SurfaceUnavailable));
        assert_eq!(executor.clear(), Err(EditError::SurfaceUnavailable));
        assert_eq!(executor.set_text("x"), Err(EditError::SurfaceUnavailable));
        assert_eq!(
            executor.send_key(KeyCode::ENTER),
            Err(EditError::SurfaceUnavailable)
        );
        assert_eq!(executor.snapshot_text(&SnapshotLimits::default()), "");
    }

    #[test]
    fn test_snapshot_is_bounded() {
        let surface = MemorySurface::new("abcdef");
        let executor = executor_with(&surface);
        let limits = SnapshotLimits {
            max_chars: 4,
            max_lines: 10,
        };

        assert_eq!(executor.snapshot_text(&limits), "abcd");
    }
}
