//! Holder for the currently focused surface

use crate::InputSurface;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared slot holding the active input surface, if any
///
/// The host fills the slot when it grants focus and empties it when focus
/// is lost. Every user of the slot treats an empty slot as "nothing to do".
/// Access is serialized: a closure passed to `with_surface` runs to
/// completion before any other edit can reach the surface.
#[derive(Clone, Default)]
pub struct SurfaceSlot {
    inner: Arc<Mutex<Option<Box<dyn InputSurface>>>>,
}

impl SurfaceSlot {
    /// Creates an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a surface, returning the one it replaces
    pub fn attach(&self, surface: Box<dyn InputSurface>) -> Option<Box<dyn InputSurface>> {
        self.lock().replace(surface)
    }

    /// Removes the surface, returning it
    pub fn detach(&self) -> Option<Box<dyn InputSurface>> {
        self.lock().take()
    }

    /// Returns true if a surface is installed
    pub fn is_available(&self) -> bool {
        self.lock().is_some()
    }

    /// Runs `f` against the surface
    ///
    /// Returns `None` without calling `f` if no surface is installed.
    pub fn with_surface<R>(&self, f: impl FnOnce(&mut dyn InputSurface) -> R) -> Option<R> {
        let mut guard = self.lock();
        let surface = guard.as_mut()?;
        Some(f(&mut **surface))
    }

    // A panic inside a surface call must not disable the slot for good.
    fn lock(&self) -> MutexGuard<'_, Option<Box<dyn InputSurface>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SurfaceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceSlot")
            .field("available", &self.is_available())
            .finish()
    }
}
