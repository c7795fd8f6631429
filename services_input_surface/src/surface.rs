//! The input surface capability

use input_types::KeyEvent;
use serde::{Deserialize, Serialize};

/// Default cap on characters read for a focus snapshot
pub const DEFAULT_SNAPSHOT_MAX_CHARS: usize = 100_000;

/// Default cap on lines read for a focus snapshot
pub const DEFAULT_SNAPSHOT_MAX_LINES: usize = 10_000;

/// Active input surface
///
/// The focused text field, as exposed by the host. This crate never owns
/// the field; it only holds a capability to it while focus is granted.
///
/// All lengths and offsets are counted in Unicode scalar values. Methods
/// returning `bool` report whether the host accepted the call; methods
/// returning `Option` yield `None` when the host could not answer.
pub trait InputSurface: Send {
    /// Reads the field's text, honoring the request's size hints
    fn extracted_text(&mut self, request: &ExtractRequest) -> Option<String>;

    /// Reads up to `n` characters before the cursor
    fn text_before_cursor(&mut self, n: usize) -> Option<String>;

    /// Reads up to `n` characters after the cursor
    fn text_after_cursor(&mut self, n: usize) -> Option<String>;

    /// Deletes `before` characters before and `after` characters after the cursor
    fn delete_surrounding_text(&mut self, before: usize, after: usize) -> bool;

    /// Inserts `text` at the cursor
    ///
    /// `new_cursor_position` follows the host convention: a positive value
    /// is relative to the end of the inserted text (1 places the cursor right
    /// after it), zero or negative is relative to its start.
    fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool;

    /// Dispatches a raw key event
    fn send_key_event(&mut self, event: KeyEvent) -> bool;

    /// Starts a batch; edits are not visible to readers until the matching end
    fn begin_batch_edit(&mut self) -> bool;

    /// Ends a batch started with `begin_batch_edit`
    fn end_batch_edit(&mut self) -> bool;
}

/// Size hints for reading a surface's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractRequest {
    /// Maximum characters to return (`None` = no hint)
    pub max_chars: Option<usize>,
    /// Maximum lines to return (`None` = no hint)
    pub max_lines: Option<usize>,
}

impl ExtractRequest {
    /// A request with no size hints
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// A request capped by snapshot limits
    pub fn bounded(limits: &SnapshotLimits) -> Self {
        Self {
            max_chars: Some(limits.max_chars),
            max_lines: Some(limits.max_lines),
        }
    }
}

/// Caps applied when snapshotting a surface for a focus notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotLimits {
    pub max_chars: usize,
    pub max_lines: usize,
}

impl Default for SnapshotLimits {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_SNAPSHOT_MAX_CHARS,
            max_lines: DEFAULT_SNAPSHOT_MAX_LINES,
        }
    }
}
