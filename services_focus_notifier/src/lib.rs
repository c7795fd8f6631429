//! # Focus Notifier Service
//!
//! This crate tells the automation peer when a text field gains or loses
//! focus.
//!
//! ## Philosophy
//!
//! - **Host-driven**: Focus transitions are callbacks from the host, never scheduled here
//! - **Non-blocking**: The network send runs on the runtime, not in the callback
//! - **Best effort**: One attempt per transition; failures are logged and dropped
//!
//! ## Wire format
//!
//! `POST <endpoint>` with `Content-Type: text/plain; charset=utf-8` and a
//! body of `"I" + text` on acquisition or `"F"` on release.
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A retry queue
//! - A focus policy engine (the host decides who has focus)

pub mod event;
pub mod lifecycle;
pub mod notifier;
pub mod transport;

pub use event::{FocusEvent, FocusKind, ACQUIRED_PREFIX, RELEASED_BODY};
pub use lifecycle::{FocusLifecycle, FocusTransition};
pub use notifier::{deliver, FocusNotifier};
pub use transport::{
    HttpNotifyTransport, NotifyConfig, NotifyError, NotifyTransport, DEFAULT_NOTIFY_ENDPOINT,
    NOTIFY_CONTENT_TYPE,
};
