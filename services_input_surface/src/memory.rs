//! In-memory input surface
//!
//! A plain text field with a cursor. Used by the host daemon's simulation
//! mode and by tests; clones share the same field, so a test can keep a
//! handle while the slot owns another.

use crate::{ExtractRequest, InputSurface};
use input_types::KeyEvent;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A mutation observed by a `MemorySurface`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    BeginBatch,
    EndBatch,
    Delete { before: usize, after: usize },
    Commit(String),
    Key(KeyEvent),
}

/// How `commit_text` responds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitBehavior {
    #[default]
    Accept,
    /// Return false and leave the text untouched
    Reject,
    /// Panic, as a misbehaving host binding might
    Panic,
}

#[derive(Debug)]
struct MemoryState {
    text: Vec<char>,
    cursor: usize,
    batch_depth: u32,
    visible: Vec<String>,
    ops: Vec<SurfaceOp>,
    commit_behavior: CommitBehavior,
    extract_available: bool,
    cursor_reads_available: bool,
}

impl MemoryState {
    fn text_string(&self) -> String {
        self.text.iter().collect()
    }

    // Readers only see committed state: nothing inside a batch is published.
    fn publish(&mut self) {
        if self.batch_depth == 0 {
            let text = self.text_string();
            if self.visible.last() != Some(&text) {
                self.visible.push(text);
            }
        }
    }
}

/// In-memory text field implementing `InputSurface`
#[derive(Debug, Clone)]
pub struct MemorySurface {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySurface {
    /// Creates a field holding `text` with the cursor at the end
    pub fn new(text: &str) -> Self {
        let cursor = text.chars().count();
        Self::with_cursor(text, cursor)
    }

    /// Creates a field holding `text` with the cursor at character `cursor`
    pub fn with_cursor(text: &str, cursor: usize) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = cursor.min(chars.len());
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                text: chars,
                cursor,
                batch_depth: 0,
                visible: vec![text.to_string()],
                ops: Vec::new(),
                commit_behavior: CommitBehavior::Accept,
                extract_available: true,
                cursor_reads_available: true,
            })),
        }
    }

    /// Current text, including edits inside an open batch
    pub fn text(&self) -> String {
        self.state().text_string()
    }

    /// Text a concurrent reader would see right now
    pub fn visible_text(&self) -> String {
        self.state().visible.last().cloned().unwrap_or_default()
    }

    /// Every distinct text a concurrent reader could have seen, in order
    pub fn visible_history(&self) -> Vec<String> {
        self.state().visible.clone()
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.state().cursor
    }

    /// Number of open batches
    pub fn batch_depth(&self) -> u32 {
        self.state().batch_depth
    }

    /// Mutations received so far
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.state().ops.clone()
    }

    /// Key events received so far
    pub fn key_events(&self) -> Vec<KeyEvent> {
        self.state()
            .ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Key(event) => Some(*event),
                _ => None,
            })
            .collect()
    }

    /// Changes how subsequent commits behave
    pub fn set_commit_behavior(&self, behavior: CommitBehavior) {
        self.state().commit_behavior = behavior;
    }

    /// Makes `extracted_text` answer `None` while `available` is false
    pub fn set_extract_available(&self, available: bool) {
        self.state().extract_available = available;
    }

    /// Makes `text_before_cursor` and `text_after_cursor` answer `None`
    /// while `available` is false
    pub fn set_cursor_reads_available(&self, available: bool) {
        self.state().cursor_reads_available = available;
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InputSurface for MemorySurface {
    fn extracted_text(&mut self, request: &ExtractRequest) -> Option<String> {
        let state = self.state();
        if !state.extract_available {
            return None;
        }

        let mut text = state.text_string();
        match request.max_lines {
            Some(0) => text.clear(),
            Some(max_lines) => {
                if let Some((cut, _)) = text.match_indices('\n').nth(max_lines - 1) {
                    text.truncate(cut);
                }
            }
            None => {}
        }
        if let Some(max_chars) = request.max_chars {
            if let Some((cut, _)) = text.char_indices().nth(max_chars) {
                text.truncate(cut);
            }
        }
        Some(text)
    }

    fn text_before_cursor(&mut self, n: usize) -> Option<String> {
        let state = self.state();
        if !state.cursor_reads_available {
            return None;
        }
        let start = state.cursor.saturating_sub(n);
        Some(state.text[start..state.cursor].iter().collect())
    }

    fn text_after_cursor(&mut self, n: usize) -> Option<String> {
        let state = self.state();
        if !state.cursor_reads_available {
            return None;
        }
        let end = state.cursor.saturating_add(n).min(state.text.len());
        Some(state.text[state.cursor..end].iter().collect())
    }

    fn delete_surrounding_text(&mut self, before: usize, after: usize) -> bool {
        let mut state = self.state();
        state.ops.push(SurfaceOp::Delete { before, after });

        let start = state.cursor.saturating_sub(before);
        let end = state.cursor.saturating_add(after).min(state.text.len());
        state.text.drain(start..end);
        state.cursor = start;
        state.publish();
        true
    }

    fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool {
        let behavior = self.state().commit_behavior;
        match behavior {
            CommitBehavior::Accept => {}
            CommitBehavior::Reject => return false,
            CommitBehavior::Panic => panic!("memory surface configured to panic on commit"),
        }

        let mut state = self.state();
        state.ops.push(SurfaceOp::Commit(text.to_string()));

        let start = state.cursor;
        let inserted: Vec<char> = text.chars().collect();
        let end = start + inserted.len();
        let tail = state.text.split_off(start);
        state.text.extend(inserted);
        state.text.extend(tail);

        let offset = i64::from(new_cursor_position);
        let target = if offset > 0 {
            end as i64 + offset - 1
        } else {
            start as i64 + offset
        };
        state.cursor = target.clamp(0, state.text.len() as i64) as usize;
        state.publish();
        true
    }

    fn send_key_event(&mut self, event: KeyEvent) -> bool {
        self.state().ops.push(SurfaceOp::Key(event));
        true
    }

    fn begin_batch_edit(&mut self) -> bool {
        let mut state = self.state();
        state.ops.push(SurfaceOp::BeginBatch);
        state.batch_depth += 1;
        true
    }

    fn end_batch_edit(&mut self) -> bool {
        let mut state = self.state();
        if state.batch_depth == 0 {
            return false;
        }
        state.ops.push(SurfaceOp::EndBatch);
        state.batch_depth -= 1;
        state.publish();
        true
    }
}
