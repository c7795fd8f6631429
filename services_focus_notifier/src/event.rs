//! Focus events and their wire form

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body prefix for a focus-acquired notification
pub const ACQUIRED_PREFIX: &str = "I";

/// Body of a focus-released notification
pub const RELEASED_BODY: &str = "F";

/// Focus transition kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusKind {
    /// The host handed a text field to the service
    Acquired,
    /// The host took the text field away
    Released,
}

impl fmt::Display for FocusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acquired => write!(f, "acquired"),
            Self::Released => write!(f, "released"),
        }
    }
}

/// A focus transition, as reported to the automation peer
///
/// Lives only as long as one notification send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusEvent {
    pub kind: FocusKind,
    /// Field text at the moment of acquisition; empty on release
    pub snapshot_text: String,
}

impl FocusEvent {
    /// Focus acquired with the field holding `snapshot_text`
    pub fn acquired(snapshot_text: impl Into<String>) -> Self {
        Self {
            kind: FocusKind::Acquired,
            snapshot_text: snapshot_text.into(),
        }
    }

    /// Focus released
    pub fn released() -> Self {
        Self {
            kind: FocusKind::Released,
            snapshot_text: String::new(),
        }
    }

    /// Renders the plain-text request body
    pub fn body(&self) -> String {
        match self.kind {
            FocusKind::Acquired => format!("{}{}", ACQUIRED_PREFIX, self.snapshot_text),
            FocusKind::Released => RELEASED_BODY.to_string(),
        }
    }
}
