//! # Command Bus
//!
//! This crate defines FastInput's inbound command primitives.
//!
//! ## Philosophy
//!
//! - **Fire and forget**: Commands are one-way; there is no response path
//! - **Typed extras**: Parameters are string-keyed and typed (string or integer)
//! - **Traceable**: Every command has a message ID for log correlation
//! - **Transport-agnostic**: The host's broadcast transport is abstracted as a queue
//!
//! ## Architecture
//!
//! The host transport pushes `CommandMessage`s into a `CommandSender`; a
//! single dispatcher task drains the matching `CommandReceiver`.

pub mod bus;
pub mod message;

pub use bus::{command_bus, BusClosed, CommandReceiver, CommandSender};
pub use message::{CommandMessage, ExtraValue, MessageId};
