//! In-process command bus
//!
//! A single-consumer queue of inbound commands. Delivery is at-most-once
//! and in order of arrival; a command sent after the consumer is gone is
//! dropped, exactly as an undelivered broadcast would be.

use crate::CommandMessage;
use std::fmt;
use tokio::sync::mpsc;

/// Error returned when the consuming end of the bus has gone away
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusClosed(pub CommandMessage);

impl fmt::Display for BusClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command bus closed, dropped {}", self.0.action)
    }
}

impl std::error::Error for BusClosed {}

/// Sending end of the command bus
///
/// Cheap to clone; every emitter holds its own sender.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<CommandMessage>,
}

impl CommandSender {
    /// Emits a command without waiting for it to be handled
    pub fn send(&self, message: CommandMessage) -> Result<(), BusClosed> {
        self.tx.send(message).map_err(|err| BusClosed(err.0))
    }

    /// Returns true if the consuming end has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving end of the command bus
#[derive(Debug)]
pub struct CommandReceiver {
    rx: mpsc::UnboundedReceiver<CommandMessage>,
}

impl CommandReceiver {
    /// Waits for the next command
    ///
    /// Returns `None` once every sender has been dropped and the queue is empty.
    pub async fn recv(&mut self) -> Option<CommandMessage> {
        self.rx.recv().await
    }

    /// Takes the next queued command without waiting
    pub fn try_recv(&mut self) -> Option<CommandMessage> {
        self.rx.try_recv().ok()
    }
}

/// Creates a connected sender/receiver pair
pub fn command_bus() -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CommandSender { tx }, CommandReceiver { rx })
}
