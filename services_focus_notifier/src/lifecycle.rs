//! Focus lifecycle hooks
//!
//! The host drives focus; these are the two transitions it calls into.

use crate::{FocusKind, FocusNotifier};
use serde::{Deserialize, Serialize};
use services_input_surface::{InputSurface, SurfaceSlot};
use tokio::task::JoinHandle;
use tracing::debug;

/// Audit record of one focus transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusTransition {
    pub kind: FocusKind,
    /// Monotonic sequence number, starting at 0
    pub sequence: u64,
}

/// Focus lifecycle
///
/// Installs and removes the focused surface and fires the matching
/// notification. Transitions arrive one at a time from the host, so this
/// type is driven through `&mut self`.
pub struct FocusLifecycle {
    slot: SurfaceSlot,
    notifier: FocusNotifier,
    audit_trail: Vec<FocusTransition>,
    next_sequence: u64,
}

impl FocusLifecycle {
    /// Creates lifecycle hooks over the notifier's surface slot
    pub fn new(notifier: FocusNotifier) -> Self {
        Self {
            slot: notifier.executor().slot().clone(),
            notifier,
            audit_trail: Vec::new(),
            next_sequence: 0,
        }
    }

    /// The host granted focus to `surface`
    pub fn surface_acquired(&mut self, surface: Box<dyn InputSurface>) -> JoinHandle<()> {
        if self.slot.attach(surface).is_some() {
            debug!("focused surface replaced without a release");
        }
        self.record(FocusKind::Acquired);
        self.notifier.on_surface_acquired()
    }

    /// The host took focus away
    ///
    /// The release is announced before the surface is removed.
    pub fn surface_released(&mut self) -> JoinHandle<()> {
        let handle = self.notifier.on_surface_released();
        if self.slot.detach().is_none() {
            debug!("focus released with no surface installed");
        }
        self.record(FocusKind::Released);
        handle
    }

    /// Returns true while a surface is focused
    pub fn is_focused(&self) -> bool {
        self.slot.is_available()
    }

    /// Returns every transition seen so far
    pub fn audit_trail(&self) -> &[FocusTransition] {
        &self.audit_trail
    }

    fn record(&mut self, kind: FocusKind) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.audit_trail.push(FocusTransition { kind, sequence });
    }
}
