//! Command dispatcher
//!
//! Stateless: each command is validated, decoded and applied on its own.
//! Nothing is reported back to the sender; outcomes are logged and
//! returned to in-process callers only. A surface that panics costs the
//! command it was applying, never the dispatcher.

use crate::{Command, CommandKind, CommandParseError};
use ipc::{CommandMessage, CommandReceiver};
use services_input_surface::{EditError, EditExecutor};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use text_codec::CodecError;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a command had no effect
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    #[error(transparent)]
    Parse(#[from] CommandParseError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Result of dispatching one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The command was applied to the surface
    Applied(CommandKind),
    /// The command was invalid or failed; the surface was left as it was
    /// or, for a failed edit, as far as the surface got
    Ignored(IgnoreReason),
    /// No surface was focused when the command arrived
    Dropped,
    /// The surface panicked while applying the command; the message is the
    /// panic payload
    Panicked(String),
}

impl DispatchOutcome {
    /// Returns true if the command was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Command dispatcher
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    executor: EditExecutor,
}

impl CommandDispatcher {
    /// Creates a dispatcher that edits through `executor`
    pub fn new(executor: EditExecutor) -> Self {
        Self { executor }
    }

    /// Dispatches a single command
    pub fn dispatch(&self, message: &CommandMessage) -> DispatchOutcome {
        if !self.executor.is_surface_available() {
            debug!(command = %message, "no focused surface, dropping command");
            return DispatchOutcome::Dropped;
        }

        let outcome = match Command::from_message(message) {
            Ok(command) => catch_unwind(AssertUnwindSafe(|| self.apply(command)))
                .unwrap_or_else(|payload| {
                    DispatchOutcome::Panicked(panic_message(payload.as_ref()))
                }),
            Err(err) => DispatchOutcome::Ignored(err.into()),
        };

        match &outcome {
            DispatchOutcome::Applied(kind) => info!(id = %message.id, %kind, "command applied"),
            DispatchOutcome::Ignored(IgnoreReason::Edit(EditError::SurfaceUnavailable))
            | DispatchOutcome::Dropped => {
                debug!(command = %message, "focused surface went away, dropping command")
            }
            DispatchOutcome::Ignored(reason) => {
                warn!(command = %message, %reason, "command ignored")
            }
            DispatchOutcome::Panicked(panic) => {
                warn!(command = %message, %panic, "surface panicked, command abandoned")
            }
        }
        outcome
    }

    /// Applies every command already queued on `receiver`, in arrival order
    pub fn drain(&self, receiver: &mut CommandReceiver) -> Vec<DispatchOutcome> {
        let mut outcomes = Vec::new();
        while let Some(message) = receiver.try_recv() {
            outcomes.push(self.dispatch(&message));
        }
        outcomes
    }

    /// Consumes the bus until every sender is gone
    pub async fn run(self, mut receiver: CommandReceiver) {
        while let Some(message) = receiver.recv().await {
            self.dispatch(&message);
        }
        debug!("command bus closed, dispatcher exiting");
    }

    fn apply(&self, command: Command) -> DispatchOutcome {
        let kind = command.kind();
        let result = match command {
            Command::InputText { wire_text } => text_codec::decode(&wire_text)
                .map_err(IgnoreReason::from)
                .and_then(|text| self.executor.insert_text(&text).map_err(Into::into)),
            Command::InputKeycode { code } => self.executor.send_key(code).map_err(Into::into),
            Command::ClearText => self.executor.clear().map(drop).map_err(Into::into),
            Command::SetText { wire_text } => text_codec::decode(&wire_text)
                .map_err(IgnoreReason::from)
                .and_then(|text| self.executor.set_text(&text).map_err(Into::into)),
        };

        match result {
            Ok(()) => DispatchOutcome::Applied(kind),
            Err(reason) => DispatchOutcome::Ignored(reason),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
