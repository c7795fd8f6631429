//! # Input Surface Service
//!
//! This crate owns every edit FastInput makes to the focused text field.
//!
//! ## Philosophy
//!
//! - **Capability, not ownership**: The field belongs to the host; we hold a handle while focused
//! - **Absent is normal**: No focused field means every operation is a no-op
//! - **Scoped batches**: Multi-step edits are bracketed by a guard that always closes
//! - **Relative edits**: Deletion is measured first, then applied around the cursor
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A text widget (the host supplies the field)
//! - A keyboard layout
//! - An undo stack

pub mod batch;
pub mod executor;
pub mod memory;
pub mod slot;
pub mod surface;

pub use batch::BatchEdit;
pub use executor::{EditError, EditExecutor};
pub use memory::{CommitBehavior, MemorySurface, SurfaceOp};
pub use slot::SurfaceSlot;
pub use surface::{
    ExtractRequest, InputSurface, SnapshotLimits, DEFAULT_SNAPSHOT_MAX_CHARS,
    DEFAULT_SNAPSHOT_MAX_LINES,
};
