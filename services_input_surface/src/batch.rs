//! Scoped batch edits

use crate::InputSurface;
use std::ops::{Deref, DerefMut};
use tracing::warn;

/// A batch edit in progress
///
/// Created with `BatchEdit::begin`; the batch ends when the guard is
/// dropped, including when the scope is left early through `?` or a panic.
/// Edits made through the guard become visible to readers all at once.
pub struct BatchEdit<'a> {
    surface: &'a mut dyn InputSurface,
}

impl<'a> BatchEdit<'a> {
    /// Begins a batch on `surface`
    pub fn begin(surface: &'a mut dyn InputSurface) -> Self {
        if !surface.begin_batch_edit() {
            warn!("input surface refused to begin a batch edit");
        }
        Self { surface }
    }
}

impl<'a> Deref for BatchEdit<'a> {
    type Target = dyn InputSurface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for BatchEdit<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for BatchEdit<'_> {
    fn drop(&mut self) {
        if !self.surface.end_batch_edit() {
            warn!("input surface refused to end a batch edit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySurface, SurfaceOp};

    #[test]
    fn test_batch_brackets_edits() {
        let handle = MemorySurface::new("");
        let mut surface = handle.clone();
        {
            let mut batch = BatchEdit::begin(&mut surface);
            batch.commit_text("a", 1);
            batch.commit_text("b", 1);
        }

        assert_eq!(
            handle.ops(),
            vec![
                SurfaceOp::BeginBatch,
                SurfaceOp::Commit("a".to_string()),
                SurfaceOp::Commit("b".to_string()),
                SurfaceOp::EndBatch,
            ]
        );
        assert_eq!(handle.visible_history(), vec!["".to_string(), "ab".to_string()]);
    }

    #[test]
    fn test_batch_ends_on_early_return() {
        fn edit(surface: &mut dyn InputSurface, fail: bool) -> Result<(), ()> {
            let mut batch = BatchEdit::begin(surface);
            batch.commit_text("partial", 1);
            if fail {
                return Err(());
            }
            batch.commit_text("never", 1);
            Ok(())
        }

        let handle = MemorySurface::new("");
        let mut surface = handle.clone();
        assert!(edit(&mut surface, true).is_err());

        assert_eq!(handle.batch_depth(), 0);
        assert_eq!(handle.ops().last(), Some(&SurfaceOp::EndBatch));
    }
}
