//! Command message structure

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random message ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a message ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Msg({})", self.0)
    }
}

/// A typed extra attached to a command
///
/// The host tooling distinguishes string extras (`--es`) from integer
/// extras (`--ei`); a lookup of the wrong type behaves as if the key
/// were absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Int(i64),
    Str(String),
}

impl ExtraValue {
    /// Returns the string value, if this is a string extra
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            Self::Int(_) => None,
        }
    }

    /// Returns the integer value, if this is an integer extra
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Str(_) => None,
        }
    }
}

impl fmt::Display for ExtraValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Str(value) => write!(f, "{:?}", value),
        }
    }
}

/// An inbound command
///
/// Carries a named action and string-keyed extras. Commands are one-way:
/// there is no correlation ID because nothing is ever sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMessage {
    /// Unique identifier for this message
    #[serde(default)]
    pub id: MessageId,
    /// Action name (case-sensitive)
    pub action: String,
    /// Typed extras by key
    #[serde(default)]
    pub extras: BTreeMap<String, ExtraValue>,
}

impl CommandMessage {
    /// Creates a command with no extras
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            action: action.into(),
            extras: BTreeMap::new(),
        }
    }

    /// Adds a string extra
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), ExtraValue::Str(value.into()));
        self
    }

    /// Adds an integer extra
    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.extras.insert(key.into(), ExtraValue::Int(value));
        self
    }

    /// Looks up a string extra
    pub fn string_extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).and_then(ExtraValue::as_str)
    }

    /// Looks up an integer extra
    pub fn int_extra(&self, key: &str) -> Option<i64> {
        self.extras.get(key).and_then(ExtraValue::as_int)
    }

    /// Parses a command from its JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes this command to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for CommandMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.action)?;
        for (key, value) in &self.extras {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}
