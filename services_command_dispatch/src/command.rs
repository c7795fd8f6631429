//! Command parsing
//!
//! Maps an inbound `CommandMessage` onto a typed `Command`, checking the
//! extras each action needs.

use input_types::KeyCode;
use ipc::CommandMessage;
use std::fmt;
use thiserror::Error;

pub const ACTION_INPUT_TEXT: &str = "INPUT_TEXT";
pub const ACTION_INPUT_KEYCODE: &str = "INPUT_KEYCODE";
pub const ACTION_CLEAR_TEXT: &str = "CLEAR_TEXT";
pub const ACTION_SET_TEXT: &str = "SET_TEXT";

/// Prefix the host broadcast tooling puts in front of every action
pub const HOST_ACTION_PREFIX: &str = "ADB_";

/// Extra carrying wire-encoded text
pub const EXTRA_TEXT: &str = "text";

/// Extra carrying an integer key code
pub const EXTRA_CODE: &str = "code";

/// Command kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    InputText,
    InputKeycode,
    ClearText,
    SetText,
}

impl CommandKind {
    /// Resolves an action name, with or without the host prefix
    ///
    /// Matching is case-sensitive.
    pub fn from_action(action: &str) -> Option<Self> {
        let bare = action.strip_prefix(HOST_ACTION_PREFIX).unwrap_or(action);
        match bare {
            ACTION_INPUT_TEXT => Some(Self::InputText),
            ACTION_INPUT_KEYCODE => Some(Self::InputKeycode),
            ACTION_CLEAR_TEXT => Some(Self::ClearText),
            ACTION_SET_TEXT => Some(Self::SetText),
            _ => None,
        }
    }

    /// Returns the bare action name
    pub fn action(&self) -> &'static str {
        match self {
            Self::InputText => ACTION_INPUT_TEXT,
            Self::InputKeycode => ACTION_INPUT_KEYCODE,
            Self::ClearText => ACTION_CLEAR_TEXT,
            Self::SetText => ACTION_SET_TEXT,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

/// A validated command
///
/// Text is still in wire form; decoding happens at dispatch so that a
/// malformed payload is reported against the command that carried it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert decoded text at the cursor
    InputText { wire_text: String },
    /// Dispatch one key-down event
    InputKeycode { code: KeyCode },
    /// Delete all text in the field
    ClearText,
    /// Replace the field's text atomically
    SetText { wire_text: String },
}

impl Command {
    /// Parses a message into a command
    pub fn from_message(message: &CommandMessage) -> Result<Self, CommandParseError> {
        let kind = CommandKind::from_action(&message.action)
            .ok_or_else(|| CommandParseError::UnknownAction(message.action.clone()))?;

        match kind {
            CommandKind::InputText => {
                let wire_text = message.string_extra(EXTRA_TEXT).ok_or(
                    CommandParseError::MissingExtra {
                        kind,
                        extra: EXTRA_TEXT,
                    },
                )?;
                Ok(Self::InputText {
                    wire_text: wire_text.to_string(),
                })
            }
            CommandKind::InputKeycode => {
                let raw = message
                    .int_extra(EXTRA_CODE)
                    .ok_or(CommandParseError::MissingExtra {
                        kind,
                        extra: EXTRA_CODE,
                    })?;
                let code = i32::try_from(raw)
                    .ok()
                    .filter(|code| *code >= 0)
                    .ok_or(CommandParseError::InvalidKeyCode(raw))?;
                Ok(Self::InputKeycode {
                    code: KeyCode::new(code),
                })
            }
            CommandKind::ClearText => Ok(Self::ClearText),
            CommandKind::SetText => Ok(Self::SetText {
                wire_text: message.string_extra(EXTRA_TEXT).unwrap_or("").to_string(),
            }),
        }
    }

    /// Returns the command's kind
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::InputText { .. } => CommandKind::InputText,
            Self::InputKeycode { .. } => CommandKind::InputKeycode,
            Self::ClearText => CommandKind::ClearText,
            Self::SetText { .. } => CommandKind::SetText,
        }
    }
}

/// Command parse error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("{kind} requires the '{extra}' extra")]
    MissingExtra {
        kind: CommandKind,
        extra: &'static str,
    },

    #[error("Invalid key code: {0}")]
    InvalidKeyCode(i64),
}
