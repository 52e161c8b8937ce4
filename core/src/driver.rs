//! Mascot Driver
//!
//! Runs a [`MascotController`] on its own tokio task, the way a UI event loop
//! would: one input at a time, timers fired between inputs, never in
//! parallel with them.
//!
//! # Architecture
//!
//! ```text
//! Surface ──MascotInput──▶ mpsc ──▶ ┌──────────────────────────┐
//!                                   │ driver task              │
//!                                   │  select! {               │
//!                                   │    input  => handle()    │
//!                                   │    timer  => tick()      │
//!                                   │  }                       │
//! Surface ◀──MascotView─── watch ◀──└──────────────────────────┘
//! ```
//!
//! The task sleeps until the controller's next deadline, so idle mascots cost
//! nothing and no timer is ever leaked: there is exactly one sleep in flight
//! and it is recomputed after every input.

use std::time::Instant as StdInstant;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::events::MascotInput;
use crate::mascot::{MascotController, MascotView};

/// Input queue depth
const INPUT_CHANNEL_CAPACITY: usize = 64;

/// Errors from talking to the driver task
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    /// The driver task has stopped
    #[error("mascot driver is no longer running")]
    Closed,

    /// The input queue is full (only from [`MascotHandle::try_send`])
    #[error("mascot input queue is full")]
    Full,
}

/// Spawns driver tasks
pub struct MascotDriver;

impl MascotDriver {
    /// Move `controller` onto a new task and return a handle to it
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(controller: MascotController) -> MascotHandle {
        let (input_tx, input_rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let (view_tx, view_rx) = watch::channel(controller.view());

        let task = tokio::spawn(run(controller, input_rx, view_tx));

        MascotHandle {
            input_tx,
            view_rx,
            task,
        }
    }
}

/// Handle to a running mascot
pub struct MascotHandle {
    input_tx: mpsc::Sender<MascotInput>,
    view_rx: watch::Receiver<MascotView>,
    task: JoinHandle<()>,
}

impl MascotHandle {
    /// Queue an input, waiting for room if the queue is full
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Closed`] if the driver has stopped.
    pub async fn send(&self, input: MascotInput) -> Result<(), DriverError> {
        self.input_tx
            .send(input)
            .await
            .map_err(|_| DriverError::Closed)
    }

    /// Queue an input without waiting
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Full`] or [`DriverError::Closed`].
    pub fn try_send(&self, input: MascotInput) -> Result<(), DriverError> {
        self.input_tx.try_send(input).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DriverError::Full,
            mpsc::error::TrySendError::Closed(_) => DriverError::Closed,
        })
    }

    /// Latest published view
    #[must_use]
    pub fn view(&self) -> MascotView {
        self.view_rx.borrow().clone()
    }

    /// A receiver that is notified on every published change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MascotView> {
        self.view_rx.clone()
    }

    /// Stop the driver and wait for it to exit
    ///
    /// Pending timers are dropped with the controller.
    pub async fn shutdown(self) {
        let Self {
            input_tx,
            view_rx,
            task,
        } = self;
        drop(input_tx);
        drop(view_rx);

        if let Err(e) = task.await {
            tracing::warn!(error = %e, "Mascot driver task ended abnormally");
        }
    }
}

async fn run(
    mut controller: MascotController,
    mut inputs: mpsc::Receiver<MascotInput>,
    views: watch::Sender<MascotView>,
) {
    tracing::debug!("Mascot driver started");

    loop {
        let deadline = controller.next_deadline();

        let changed = tokio::select! {
            maybe_input = inputs.recv() => match maybe_input {
                Some(input) => controller.handle(input, now()),
                None => break,
            },

            () = wait_until(deadline) => controller.tick(now()),
        };

        if changed {
            views.send_replace(controller.view());
        }
    }

    tracing::debug!("Mascot driver stopped");
}

/// Current time on the tokio clock, as a std instant for the controller
fn now() -> StdInstant {
    Instant::now().into_std()
}

/// Sleep until `deadline`, or forever if there is none
async fn wait_until(deadline: Option<StdInstant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}
