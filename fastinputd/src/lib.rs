//! # FastInput Host Runtime
//!
//! This crate provides a host for the FastInput services outside a real
//! input-method framework.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: Services never print; the host reports the final field text
//! - **Input is explicit events**: Focus changes and broadcasts come from a script
//! - **Deterministic mode is first-class**: Every run is a replayable script
//!
//! ## Responsibilities
//!
//! The host runtime:
//! - Loads settings and installs the log subscriber
//! - Wires the command bus, dispatcher, focus notifier and soft keyboard
//! - Replays focus changes, broadcasts and soft key presses in order
//! - Waits for outstanding focus notifications before exiting
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Render a keyboard
//! - Listen for broadcasts from other processes
//! - Retry failed notifications

pub mod broadcast_script;
pub mod runtime;

pub use broadcast_script::{BroadcastScript, BroadcastScriptError, ScriptedAction};
pub use runtime::{HostReport, HostRuntime, HostRuntimeConfig, HostRuntimeError, LoggingPicker};
