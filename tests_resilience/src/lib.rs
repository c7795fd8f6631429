//! Resilience Test Utilities
//!
//! This crate provides shared utilities for resilience and integration tests.
//!
//! ## Test Philosophy
//!
//! - **Safety under faults**: The service keeps its invariants when the field goes away or misbehaves
//! - **Deterministic failures**: Faults are injected through the in-memory field, never timing
//! - **No stuck batches**: A batch edit that was opened is always closed
//! - **Quiet degradation**: Host and peer failures are logged, never raised to the sender

use ipc::CommandMessage;
use services_command_dispatch::{CommandDispatcher, ACTION_INPUT_TEXT, ACTION_SET_TEXT, EXTRA_TEXT};
use services_input_surface::{EditExecutor, MemorySurface, SurfaceSlot};

/// A focused in-memory field wired to a dispatcher
pub struct TestRig {
    pub surface: MemorySurface,
    pub slot: SurfaceSlot,
    pub executor: EditExecutor,
    pub dispatcher: CommandDispatcher,
}

impl TestRig {
    /// Re-attaches the rig's field after it was detached
    pub fn refocus(&self) {
        self.slot.attach(Box::new(self.surface.clone()));
    }
}

/// Bootstrap helper for tests
///
/// Creates a field holding `text` (cursor at the end) and focuses it.
pub fn test_bootstrap(text: &str) -> TestRig {
    let surface = MemorySurface::new(text);
    let slot = SurfaceSlot::new();
    slot.attach(Box::new(surface.clone()));
    let executor = EditExecutor::new(slot.clone());
    let dispatcher = CommandDispatcher::new(executor.clone());

    TestRig {
        surface,
        slot,
        executor,
        dispatcher,
    }
}

/// Builds an INPUT_TEXT broadcast carrying `text`
pub fn input_text(text: &str) -> CommandMessage {
    CommandMessage::new(ACTION_INPUT_TEXT).with_string(EXTRA_TEXT, text_codec::encode(text))
}

/// Builds a SET_TEXT broadcast carrying `text`
pub fn set_text(text: &str) -> CommandMessage {
    CommandMessage::new(ACTION_SET_TEXT).with_string(EXTRA_TEXT, text_codec::encode(text))
}
