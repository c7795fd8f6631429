//! # Soft Keyboard Service
//!
//! Handles the few keys on the service's own on-screen keyboard.
//!
//! The keyboard is a debugging aid, not a typing surface: one key clears
//! the field, one opens the host's input-method picker so a human can switch
//! back to a real keyboard, and one types a random character to prove the
//! service is connected.

use input_types::SoftKey;
use services_input_surface::{EditError, EditExecutor};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// Largest multiple of 62 that fits in a byte; bytes at or above it are
// discarded so every character is equally likely.
const UNBIASED_LIMIT: u8 = 248;

// Bytes of a v4 UUID carrying the fixed version and variant bits.
const VERSION_BYTE: usize = 6;
const VARIANT_BYTE: usize = 8;

/// Host service that shows the input-method picker
pub trait InputMethodPicker: Send + Sync {
    fn show_input_method_picker(&self);
}

/// What a soft key press did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoftKeyOutcome {
    Cleared,
    PickerShown,
    Typed(String),
    /// The key has no action
    Ignored(SoftKey),
    /// The key's edit could not be applied
    Failed(EditError),
}

/// Soft keyboard action bridge
#[derive(Clone)]
pub struct SoftKeyboard {
    executor: EditExecutor,
    picker: Arc<dyn InputMethodPicker>,
}

impl SoftKeyboard {
    /// Creates a keyboard that edits through `executor`
    pub fn new(executor: EditExecutor, picker: Arc<dyn InputMethodPicker>) -> Self {
        Self { executor, picker }
    }

    /// Handles a key press identified by its layout primary code
    pub fn on_key(&self, primary_code: i32) -> SoftKeyOutcome {
        let key = SoftKey::from_primary_code(primary_code);
        let outcome = match key {
            SoftKey::Clear => match self.executor.clear() {
                Ok(_) => SoftKeyOutcome::Cleared,
                Err(err) => SoftKeyOutcome::Failed(err),
            },
            SoftKey::SwitchInputMethod => {
                self.picker.show_input_method_picker();
                SoftKeyOutcome::PickerShown
            }
            SoftKey::RandomCharacter => {
                let text = random_alphanumeric(1);
                match self.executor.insert_text(&text) {
                    Ok(()) => SoftKeyOutcome::Typed(text),
                    Err(err) => SoftKeyOutcome::Failed(err),
                }
            }
            SoftKey::Cancel => {
                debug!("soft key cancel not implemented");
                SoftKeyOutcome::Ignored(key)
            }
            SoftKey::Unknown(code) => {
                warn!(code, "unknown soft key");
                SoftKeyOutcome::Ignored(key)
            }
        };

        if let SoftKeyOutcome::Failed(err) = &outcome {
            debug!(%key, error = %err, "soft key had no effect");
        }
        outcome
    }
}

/// Returns `len` characters drawn uniformly from `[a-zA-Z0-9]`
pub fn random_alphanumeric(len: usize) -> String {
    let mut out = String::with_capacity(len);
    while out.len() < len {
        for (index, byte) in Uuid::new_v4().into_bytes().into_iter().enumerate() {
            if out.len() == len {
                break;
            }
            if index != VERSION_BYTE && index != VARIANT_BYTE && byte < UNBIASED_LIMIT {
                out.push(char::from(ALPHANUMERIC[usize::from(byte) % ALPHANUMERIC.len()]));
            }
        }
    }
    out
}
