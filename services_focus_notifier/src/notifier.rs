//! Best-effort focus notifications

use crate::{FocusEvent, NotifyTransport};
use services_input_surface::{EditExecutor, SnapshotLimits};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Focus notifier
///
/// Snapshots the field on the caller's thread, then hands the send to the
/// runtime so the lifecycle callback never waits on the network. A send is
/// attempted exactly once; its result is only logged.
#[derive(Clone)]
pub struct FocusNotifier {
    executor: EditExecutor,
    transport: Arc<dyn NotifyTransport>,
    runtime: Handle,
    limits: SnapshotLimits,
}

impl FocusNotifier {
    /// Creates a notifier that spawns sends onto `runtime`
    pub fn new(executor: EditExecutor, transport: Arc<dyn NotifyTransport>, runtime: Handle) -> Self {
        Self {
            executor,
            transport,
            runtime,
            limits: SnapshotLimits::default(),
        }
    }

    /// Overrides the caps applied to the acquisition snapshot
    pub fn with_snapshot_limits(mut self, limits: SnapshotLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the executor used for snapshots
    pub fn executor(&self) -> &EditExecutor {
        &self.executor
    }

    /// Reports that a field gained focus, along with its current text
    pub fn on_surface_acquired(&self) -> JoinHandle<()> {
        let text = self.executor.snapshot_text(&self.limits);
        self.send(FocusEvent::acquired(text))
    }

    /// Reports that the field lost focus
    pub fn on_surface_released(&self) -> JoinHandle<()> {
        self.send(FocusEvent::released())
    }

    /// Sends `event` in the background
    ///
    /// The returned handle may be awaited or dropped; dropping it does not
    /// cancel the send.
    pub fn send(&self, event: FocusEvent) -> JoinHandle<()> {
        let transport = Arc::clone(&self.transport);
        self.runtime
            .spawn(async move { deliver(transport.as_ref(), &event).await })
    }
}

/// Posts `event` once and logs the result
pub async fn deliver(transport: &dyn NotifyTransport, event: &FocusEvent) {
    match transport.post(event.body()).await {
        Ok(status) if (200..300).contains(&status) => {
            info!(kind = %event.kind, status, "focus notification delivered");
        }
        Ok(status) => {
            warn!(kind = %event.kind, status, "focus notification answered with error status");
        }
        Err(err) => {
            warn!(kind = %event.kind, error = %err, "focus notification failed");
        }
    }
}
