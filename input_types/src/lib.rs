#![no_std]

//! # Input Types
//!
//! This crate defines the key and soft-keyboard types shared by the
//! FastInput control channel.
//!
//! ## Philosophy
//!
//! - **Host codes, not layouts**: Key codes are the host's integer codes, carried verbatim
//! - **Events, not bytes**: A key dispatch is a structured event with an explicit action
//! - **Testable**: Events are serializable and can be injected for testing
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A keyboard layout or key map
//! - Raw hardware scan codes (PS/2, USB HID)
//! - Modifier or repeat tracking

extern crate alloc;

use core::fmt;
use serde::{Deserialize, Serialize};

/// Host key code
///
/// An opaque integer understood by the input surface. Only a handful of
/// well-known values are named; any non-negative value may be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCode(i32);

impl KeyCode {
    pub const BACK: Self = Self(4);
    pub const DPAD_UP: Self = Self(19);
    pub const DPAD_DOWN: Self = Self(20);
    pub const DPAD_LEFT: Self = Self(21);
    pub const DPAD_RIGHT: Self = Self(22);
    pub const TAB: Self = Self(61);
    pub const SPACE: Self = Self(62);
    pub const ENTER: Self = Self(66);
    pub const DEL: Self = Self(67);
    pub const ESCAPE: Self = Self(111);
    pub const FORWARD_DEL: Self = Self(112);

    /// Creates a key code from a raw host value
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw host value
    pub const fn raw(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "keycode({})", self.0)
    }
}

/// Key action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    /// Key went down
    Down,
    /// Key went up
    Up,
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Down => write!(f, "down"),
            Self::Up => write!(f, "up"),
        }
    }
}

/// Key event dispatched to an input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Down or up
    pub action: KeyAction,
    /// Host key code
    pub code: KeyCode,
}

impl KeyEvent {
    /// Creates a new key event
    pub fn new(action: KeyAction, code: KeyCode) -> Self {
        Self { action, code }
    }

    /// Creates a key-down event
    pub fn down(code: KeyCode) -> Self {
        Self::new(KeyAction::Down, code)
    }

    /// Creates a key-up event
    pub fn up(code: KeyCode) -> Self {
        Self::new(KeyAction::Up, code)
    }

    /// Returns true if this is a key-down event
    pub fn is_down(&self) -> bool {
        self.action == KeyAction::Down
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.action)
    }
}

/// Soft-keyboard key
///
/// Keys on the service's own on-screen keyboard, identified by the
/// primary code the layout assigns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoftKey {
    /// Cancel key (no action)
    Cancel,
    /// Clears the focused field
    Clear,
    /// Opens the host's input-method picker
    SwitchInputMethod,
    /// Types one random alphanumeric character
    RandomCharacter,
    /// Any code the layout does not assign
    Unknown(i32),
}

impl SoftKey {
    pub const CANCEL_CODE: i32 = -1;
    pub const SWITCH_INPUT_METHOD_CODE: i32 = -5;
    pub const RANDOM_CHARACTER_CODE: i32 = -7;
    pub const CLEAR_CODE: i32 = -10;

    /// Maps a layout primary code to a soft key
    pub fn from_primary_code(code: i32) -> Self {
        match code {
            Self::CANCEL_CODE => Self::Cancel,
            Self::CLEAR_CODE => Self::Clear,
            Self::SWITCH_INPUT_METHOD_CODE => Self::SwitchInputMethod,
            Self::RANDOM_CHARACTER_CODE => Self::RandomCharacter,
            other => Self::Unknown(other),
        }
    }

    /// Returns the layout primary code for this key
    pub fn primary_code(&self) -> i32 {
        match self {
            Self::Cancel => Self::CANCEL_CODE,
            Self::Clear => Self::CLEAR_CODE,
            Self::SwitchInputMethod => Self::SWITCH_INPUT_METHOD_CODE,
            Self::RandomCharacter => Self::RANDOM_CHARACTER_CODE,
            Self::Unknown(code) => *code,
        }
    }
}

impl fmt::Display for SoftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancel => write!(f, "cancel"),
            Self::Clear => write!(f, "clear"),
            Self::SwitchInputMethod => write!(f, "switch-input-method"),
            Self::RandomCharacter => write!(f, "random-character"),
            Self::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_key_event_down() {
        let event = KeyEvent::down(KeyCode::ENTER);
        assert!(event.is_down());
        assert_eq!(event.code.raw(), 66);
    }

    #[test]
    fn test_key_event_up() {
        let event = KeyEvent::up(KeyCode::new(29));
        assert!(!event.is_down());
        assert_eq!(event.action, KeyAction::Up);
    }

    #[test]
    fn test_key_event_display() {
        let event = KeyEvent::down(KeyCode::DEL);
        assert_eq!(event.to_string(), "keycode(67) down");
    }

    #[test]
    fn test_soft_key_mapping() {
        assert_eq!(SoftKey::from_primary_code(-10), SoftKey::Clear);
        assert_eq!(SoftKey::from_primary_code(-5), SoftKey::SwitchInputMethod);
        assert_eq!(SoftKey::from_primary_code(-7), SoftKey::RandomCharacter);
        assert_eq!(SoftKey::from_primary_code(-1), SoftKey::Cancel);
        assert_eq!(SoftKey::from_primary_code(42), SoftKey::Unknown(42));
    }

    #[test]
    fn test_soft_key_primary_code_is_inverse() {
        for code in [-10, -7, -5, -1, 0, 97] {
            assert_eq!(SoftKey::from_primary_code(code).primary_code(), code);
        }
    }

    #[test]
    fn test_key_event_serialization() {
        let event = KeyEvent::down(KeyCode::TAB);
        let json = serde_json::to_string(&event).unwrap();
        let decoded: KeyEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);
    }
}
