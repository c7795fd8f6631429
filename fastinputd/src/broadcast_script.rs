//! # Broadcast Script Parser
//!
//! A line-based script that stands in for the host: focus changes, command
//! broadcasts and soft key presses, replayed in order.
//!
//! ## Format
//!
//! - Focus: `focus start [TEXT]`, `focus finish`
//! - Broadcasts: `[adb shell] am broadcast -a ACTION [--es KEY VALUE] [--ei KEY INT]`
//! - Soft keys: `softkey -10`
//! - Delays: `wait 100ms`, `wait 1s`
//! - Comments: `# This is a comment`
//!
//! Values may be wrapped in single or double quotes.
//!
//! ## Example
//!
//! ```text
//! focus start "draft"
//! adb shell am broadcast -a ADB_SET_TEXT --es text SGVsbG8=
//! am broadcast -a INPUT_KEYCODE --ei code 66
//! wait 50ms
//! focus finish
//! ```

use ipc::CommandMessage;
use std::collections::VecDeque;
use thiserror::Error;

/// Broadcast script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BroadcastScriptError {
    #[error("Unknown directive: {0}")]
    UnknownDirective(String),

    #[error("Unterminated quote")]
    UnterminatedQuote,

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Broadcast without an action")]
    MissingAction,

    #[error("Unsupported broadcast option: {0}")]
    UnsupportedOption(String),

    #[error("Invalid integer: {0}")]
    InvalidInteger(String),

    #[error("Invalid delay format: {0}")]
    InvalidDelay(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,
}

/// A single scripted host action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAction {
    /// A field with this text gains focus
    FocusStart(String),
    /// The focused field loses focus
    FocusFinish,
    /// A command broadcast
    Broadcast(CommandMessage),
    /// A soft keyboard key press
    SoftKey(i32),
    /// Wait for a duration (in milliseconds)
    Wait(u64),
}

/// Broadcast script
#[derive(Debug, Clone, Default)]
pub struct BroadcastScript {
    actions: VecDeque<ScriptedAction>,
}

impl BroadcastScript {
    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, BroadcastScriptError> {
        let mut actions = VecDeque::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let action = parse_line(line).map_err(|e| BroadcastScriptError::ParseError {
                line: line_num + 1,
                message: e.to_string(),
            })?;
            actions.push_back(action);
        }

        if actions.is_empty() {
            return Err(BroadcastScriptError::EmptyScript);
        }

        Ok(Self { actions })
    }

    /// Returns the next action, if any
    pub fn next_action(&mut self) -> Option<ScriptedAction> {
        self.actions.pop_front()
    }

    /// Returns the number of remaining actions
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

fn parse_line(line: &str) -> Result<ScriptedAction, BroadcastScriptError> {
    let tokens = tokenize(line)?;
    let words: Vec<&str> = tokens.iter().map(String::as_str).collect();

    match words.as_slice() {
        ["focus", "start"] => Ok(ScriptedAction::FocusStart(String::new())),
        ["focus", "start", text @ ..] => Ok(ScriptedAction::FocusStart(text.join(" "))),
        ["focus", "finish"] => Ok(ScriptedAction::FocusFinish),
        ["softkey", code] => code
            .parse()
            .map(ScriptedAction::SoftKey)
            .map_err(|_| BroadcastScriptError::InvalidInteger(code.to_string())),
        ["softkey"] => Err(BroadcastScriptError::MissingValue("softkey".to_string())),
        ["wait", duration] => parse_duration(duration).map(ScriptedAction::Wait),
        ["wait"] => Err(BroadcastScriptError::MissingValue("wait".to_string())),
        ["adb", "shell", "am", "broadcast", rest @ ..] | ["am", "broadcast", rest @ ..] => {
            parse_broadcast(rest).map(ScriptedAction::Broadcast)
        }
        _ => Err(BroadcastScriptError::UnknownDirective(line.to_string())),
    }
}

/// Parses the options of an `am broadcast` invocation
fn parse_broadcast(args: &[&str]) -> Result<CommandMessage, BroadcastScriptError> {
    let mut action = None;
    let mut extras: Vec<(String, Extra)> = Vec::new();
    let mut args = args.iter();

    while let Some(option) = args.next() {
        match *option {
            "-a" => {
                let value = args
                    .next()
                    .ok_or_else(|| BroadcastScriptError::MissingValue("-a".to_string()))?;
                action = Some(value.to_string());
            }
            "--es" | "--ei" => {
                let key = args
                    .next()
                    .ok_or_else(|| BroadcastScriptError::MissingValue(option.to_string()))?;
                let value = args
                    .next()
                    .ok_or_else(|| BroadcastScriptError::MissingValue(option.to_string()))?;
                let extra = if *option == "--ei" {
                    Extra::Int(
                        value
                            .parse()
                            .map_err(|_| BroadcastScriptError::InvalidInteger(value.to_string()))?,
                    )
                } else {
                    Extra::Str(value.to_string())
                };
                extras.push((key.to_string(), extra));
            }
            other => return Err(BroadcastScriptError::UnsupportedOption(other.to_string())),
        }
    }

    let action = action.ok_or(BroadcastScriptError::MissingAction)?;
    Ok(extras
        .into_iter()
        .fold(CommandMessage::new(action), |message, (key, extra)| match extra {
            Extra::Str(value) => message.with_string(key, value),
            Extra::Int(value) => message.with_int(key, value),
        }))
}

enum Extra {
    Str(String),
    Int(i64),
}

/// Splits a line on whitespace, keeping quoted runs together
fn tokenize(line: &str) -> Result<Vec<String>, BroadcastScriptError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(BroadcastScriptError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parses a duration string (e.g., "100ms", "1s")
fn parse_duration(s: &str) -> Result<u64, BroadcastScriptError> {
    let s = s.trim().to_lowercase();

    if let Some(ms_str) = s.strip_suffix("ms") {
        ms_str
            .trim()
            .parse::<u64>()
            .map_err(|_| BroadcastScriptError::InvalidDelay(s.to_string()))
    } else if let Some(s_str) = s.strip_suffix('s') {
        s_str
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(|secs| secs.checked_mul(1000))
            .ok_or_else(|| BroadcastScriptError::InvalidDelay(s.to_string()))
    } else {
        Err(BroadcastScriptError::InvalidDelay(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(text: &str) -> ScriptedAction {
        let mut script = BroadcastScript::from_text(text).unwrap();
        assert_eq!(script.remaining(), 1);
        script.next_action().unwrap()
    }

    #[test]
    fn test_parse_focus() {
        assert_eq!(single("focus start"), ScriptedAction::FocusStart(String::new()));
        assert_eq!(
            single("focus start \"hello world\""),
            ScriptedAction::FocusStart("hello world".to_string())
        );
        assert_eq!(
            single("focus start two words"),
            ScriptedAction::FocusStart("two words".to_string())
        );
        assert_eq!(single("focus finish"), ScriptedAction::FocusFinish);
    }

    #[test]
    fn test_parse_broadcast_with_string_extra() {
        let action = single("adb shell am broadcast -a ADB_INPUT_TEXT --es text 'SGk='");
        let ScriptedAction::Broadcast(message) = action else {
            panic!("expected broadcast");
        };
        assert_eq!(message.action, "ADB_INPUT_TEXT");
        assert_eq!(message.string_extra("text"), Some("SGk="));
    }

    #[test]
    fn test_parse_broadcast_with_int_extra() {
        let ScriptedAction::Broadcast(message) = single("am broadcast -a INPUT_KEYCODE --ei code 66")
        else {
            panic!("expected broadcast");
        };
        assert_eq!(message.action, "INPUT_KEYCODE");
        assert_eq!(message.int_extra("code"), Some(66));
        assert_eq!(message.string_extra("code"), None);
    }

    #[test]
    fn test_parse_broadcast_without_extras() {
        let ScriptedAction::Broadcast(message) = single("am broadcast -a CLEAR_TEXT") else {
            panic!("expected broadcast");
        };
        assert_eq!(message.action, "CLEAR_TEXT");
        assert!(message.extras.is_empty());
    }

    #[test]
    fn test_parse_softkey_and_wait() {
        let mut script = BroadcastScript::from_text("softkey -10\nwait 100ms\nwait 2s").unwrap();
        assert_eq!(script.next_action(), Some(ScriptedAction::SoftKey(-10)));
        assert_eq!(script.next_action(), Some(ScriptedAction::Wait(100)));
        assert_eq!(script.next_action(), Some(ScriptedAction::Wait(2000)));
        assert_eq!(script.next_action(), None);
    }

    #[test]
    fn test_wait_out_of_range_is_rejected() {
        assert_eq!(parse_duration("18446744073709551s"), Ok(18_446_744_073_709_551_000));
        assert_eq!(
            parse_duration("18446744073709552s"),
            Err(BroadcastScriptError::InvalidDelay("18446744073709552s".to_string()))
        );
        assert!(matches!(
            BroadcastScript::from_text("wait 18446744073709552s"),
            Err(BroadcastScriptError::ParseError { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_comments_and_empty_lines() {
        let script =
            BroadcastScript::from_text("# setup\nfocus start\n\n# done\nfocus finish\n").unwrap();
        assert_eq!(script.remaining(), 2);
    }

    #[test]
    fn test_empty_script_error() {
        assert_eq!(
            BroadcastScript::from_text("# Just comments").unwrap_err(),
            BroadcastScriptError::EmptyScript
        );
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = BroadcastScript::from_text("focus start\nam broadcast --es text abc").unwrap_err();
        assert_eq!(
            err,
            BroadcastScriptError::ParseError {
                line: 2,
                message: "Broadcast without an action".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_lines() {
        for line in [
            "launch rockets",
            "am broadcast -a INPUT_KEYCODE --ei code enter",
            "am broadcast -a SET_TEXT --es text",
            "am broadcast -a SET_TEXT --ez flag true",
            "focus start \"unterminated",
            "softkey x",
            "wait abc",
        ] {
            let result = BroadcastScript::from_text(line);
            assert!(
                matches!(result, Err(BroadcastScriptError::ParseError { line: 1, .. })),
                "{line} should not parse"
            );
        }
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"a "b c" 'd'"#).unwrap(),
            vec!["a".to_string(), "b c".to_string(), "d".to_string()]
        );
        assert_eq!(tokenize(r#"x """#).unwrap(), vec!["x".to_string(), String::new()]);
        assert_eq!(tokenize("x \"y").unwrap_err(), BroadcastScriptError::UnterminatedQuote);
    }
}
