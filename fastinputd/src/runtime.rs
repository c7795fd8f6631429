//! # Host Runtime
//!
//! Wires the services together and replays a broadcast script against an
//! in-memory text field.

use crate::broadcast_script::{BroadcastScript, BroadcastScriptError, ScriptedAction};
use ipc::{command_bus, CommandReceiver, CommandSender};
use services_command_dispatch::{CommandDispatcher, DispatchOutcome};
use services_focus_notifier::{
    FocusLifecycle, FocusNotifier, FocusTransition, HttpNotifyTransport, NotifyError,
};
use services_input_surface::{EditExecutor, MemorySurface, SurfaceSlot};
use services_logger::LoggerError;
use services_settings::FastInputSettings;
use services_soft_keyboard::{InputMethodPicker, SoftKeyOutcome, SoftKeyboard};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Script error: {0}")]
    Script(#[from] BroadcastScriptError),

    #[error("Notifier error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Logger error: {0}")]
    Logger(#[from] LoggerError),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("Command bus closed")]
    BusClosed,
}

/// Host runtime configuration
#[derive(Debug, Clone, Default)]
pub struct HostRuntimeConfig {
    /// Service settings
    pub settings: FastInputSettings,
    /// Script text to replay
    pub script: String,
    /// Whether to install the global log subscriber
    pub init_logging: bool,
}

/// What a finished run did
#[derive(Debug, Clone, Default)]
pub struct HostReport {
    /// Dispatch outcome of every broadcast, in script order
    pub outcomes: Vec<DispatchOutcome>,
    /// Outcome of every soft key press, in script order
    pub soft_keys: Vec<SoftKeyOutcome>,
    /// Focus transitions, in order
    pub transitions: Vec<FocusTransition>,
    /// Text of the most recently focused field, if any field was focused
    pub final_text: Option<String>,
}

/// Picker stand-in for hosts without an input-method switcher
#[derive(Debug, Default)]
pub struct LoggingPicker;

impl InputMethodPicker for LoggingPicker {
    fn show_input_method_picker(&self) {
        info!("input method picker requested");
    }
}

/// Host runtime
pub struct HostRuntime {
    runtime: Runtime,
    script: BroadcastScript,
    sender: CommandSender,
    receiver: CommandReceiver,
    dispatcher: CommandDispatcher,
    lifecycle: FocusLifecycle,
    keyboard: SoftKeyboard,
    /// Field currently or most recently focused
    field: Option<MemorySurface>,
    /// Notification sends not yet awaited
    pending: Vec<JoinHandle<()>>,
    report: HostReport,
}

impl HostRuntime {
    /// Creates a new host runtime
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        if config.init_logging {
            services_logger::init(&config.settings.log)?;
        }

        let script = BroadcastScript::from_text(&config.script)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        let executor = EditExecutor::new(SurfaceSlot::new());
        let transport = HttpNotifyTransport::new(&config.settings.notify)?;
        info!(endpoint = transport.endpoint(), "focus notifications enabled");

        let notifier = FocusNotifier::new(
            executor.clone(),
            Arc::new(transport),
            runtime.handle().clone(),
        )
        .with_snapshot_limits(config.settings.snapshot);
        let (sender, receiver) = command_bus();

        Ok(Self {
            runtime,
            script,
            sender,
            receiver,
            dispatcher: CommandDispatcher::new(executor.clone()),
            lifecycle: FocusLifecycle::new(notifier),
            keyboard: SoftKeyboard::new(executor, Arc::new(LoggingPicker)),
            field: None,
            pending: Vec::new(),
            report: HostReport::default(),
        })
    }

    /// Replays the whole script and waits for outstanding notifications
    pub fn run(mut self) -> Result<HostReport, HostRuntimeError> {
        while let Some(action) = self.script.next_action() {
            self.step(action)?;
        }

        let pending = std::mem::take(&mut self.pending);
        self.runtime.block_on(async {
            for handle in pending {
                if let Err(err) = handle.await {
                    warn!(error = %err, "notification task failed");
                }
            }
        });

        self.report.transitions = self.lifecycle.audit_trail().to_vec();
        self.report.final_text = self.field.as_ref().map(MemorySurface::text);
        Ok(self.report)
    }

    fn step(&mut self, action: ScriptedAction) -> Result<(), HostRuntimeError> {
        match action {
            ScriptedAction::FocusStart(text) => {
                if self.lifecycle.is_focused() {
                    self.pending.push(self.lifecycle.surface_released());
                }
                let field = MemorySurface::new(&text);
                self.field = Some(field.clone());
                self.pending.push(self.lifecycle.surface_acquired(Box::new(field)));
            }
            ScriptedAction::FocusFinish => {
                if self.lifecycle.is_focused() {
                    self.pending.push(self.lifecycle.surface_released());
                } else {
                    debug!("focus finish without a focused field");
                }
            }
            ScriptedAction::Broadcast(message) => {
                self.sender
                    .send(message)
                    .map_err(|_| HostRuntimeError::BusClosed)?;
                let outcomes = self.dispatcher.drain(&mut self.receiver);
                self.report.outcomes.extend(outcomes);
            }
            ScriptedAction::SoftKey(code) => {
                self.report.soft_keys.push(self.keyboard.on_key(code));
            }
            ScriptedAction::Wait(millis) => {
                self.runtime
                    .block_on(async { tokio::time::sleep(Duration::from_millis(millis)).await });
            }
        }
        Ok(())
    }
}
