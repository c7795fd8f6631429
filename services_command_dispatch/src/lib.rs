//! # Command Dispatch Service
//!
//! This crate turns inbound bus commands into edits of the focused field.
//!
//! ## Philosophy
//!
//! - **Fire and forget**: The bus has no response path; failures are logged, never raised
//! - **Validate first**: Required extras and payload decoding are checked before any edit
//! - **One command, one outcome**: Commands are independent; there is no session state
//!
//! ## Actions
//!
//! | action | extras | effect |
//! |---|---|---|
//! | `INPUT_TEXT` | `text` (base64) | insert decoded text |
//! | `INPUT_KEYCODE` | `code` (int, >= 0) | one key-down event |
//! | `CLEAR_TEXT` | none | delete all text |
//! | `SET_TEXT` | `text` (base64, default "") | atomic clear + insert |
//!
//! Each action is also accepted with the `ADB_` prefix.

pub mod command;
pub mod dispatcher;

pub use command::{
    Command, CommandKind, CommandParseError, ACTION_CLEAR_TEXT, ACTION_INPUT_KEYCODE,
    ACTION_INPUT_TEXT, ACTION_SET_TEXT, EXTRA_CODE, EXTRA_TEXT, HOST_ACTION_PREFIX,
};
pub use dispatcher::{CommandDispatcher, DispatchOutcome, IgnoreReason};
