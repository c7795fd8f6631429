//! # Service Contract Tests
//!
//! This crate provides "golden" tests for the FastInput wire contracts to
//! ensure they don't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Wire contracts are written as code
//! - **Testability first**: Contract tests fail when interfaces change
//! - **Mechanism not policy**: Define what must be stable, not how to use it
//!
//! ## Structure
//!
//! Each boundary has a module with contract tests that verify:
//! - Action identifiers and extra keys of inbound commands
//! - Command message JSON shape
//! - Focus notification bodies, endpoint and content type
//! - Soft key primary codes

pub mod command_dispatch;
pub mod focus_notifier;
pub mod soft_keyboard;

/// Common test helpers for contract validation
pub mod test_helpers {
    use ipc::CommandMessage;
    use serde_json::Value;
    use services_command_dispatch::CommandKind;

    /// Verifies an action name resolves to the expected command, bare and prefixed
    pub fn verify_action_contract(action: &str, expected: CommandKind) {
        assert_eq!(
            CommandKind::from_action(action),
            Some(expected),
            "Action identifier changed: '{}' no longer resolves to {:?}",
            action,
            expected
        );
        let prefixed = format!("{}{}", services_command_dispatch::HOST_ACTION_PREFIX, action);
        assert_eq!(
            CommandKind::from_action(&prefixed),
            Some(expected),
            "Prefixed action '{}' no longer resolves to {:?}",
            prefixed,
            expected
        );
    }

    /// Serializes a command and returns its JSON tree
    pub fn wire_json(message: &CommandMessage) -> Value {
        let json = message.to_json().expect("Failed to serialize command");
        serde_json::from_str(&json).expect("Command JSON is not valid JSON")
    }
}
