//! Button-to-command dispatch.
//!
//! Each configured input pin is bound to one `Action` in a dispatch table
//! registered once at startup. Press callbacks run on the GPIO interrupt
//! thread, so they do nothing but enqueue the bound action; a single
//! worker drains the queue and issues the HTTP calls, keeping network
//! latency off the interrupt thread and preserving press order across
//! buttons.

use std::future::Future;

use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};

use crate::api::DeviceClient;
use crate::hw::{PressInput, StatusLed};

/// The device commands a button can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start the bassinet if it is off, stop it if it is running.
    Toggle,
    UpLevel,
    DownLevel,
    /// Toggle the motion-level lock.
    Lock,
}

impl Action {
    /// Wire name of the command as the vendor API expects it.
    pub fn command(self) -> &'static str {
        match self {
            Action::Toggle => "toggle",
            Action::UpLevel => "up_level",
            Action::DownLevel => "down_level",
            Action::Lock => "lock",
        }
    }
}

/// Holds the registered input pins. Dropping this drops the pins, which
/// unregisters the interrupts, so `main` keeps it alive for the whole run.
pub struct ButtonController {
    _inputs: Vec<Box<dyn PressInput>>,
}

impl ButtonController {
    /// Register one press handler per binding. Each press enqueues exactly
    /// one action; the queue is unbounded so the interrupt thread never
    /// blocks and no press is dropped under bursts.
    pub fn register(
        bindings: Vec<(Action, Box<dyn PressInput>)>,
        tx: UnboundedSender<Action>,
    ) -> Result<Self> {
        let mut inputs = Vec::with_capacity(bindings.len());
        for (action, mut input) in bindings {
            let tx = tx.clone();
            input.on_press(Box::new(move || {
                // Send only fails once the worker is gone, which means the
                // process is already shutting down.
                if tx.send(action).is_err() {
                    warn!(command = action.command(), "Worker gone, press dropped");
                }
            }))?;
            inputs.push(input);
        }
        Ok(Self { _inputs: inputs })
    }
}

/// Drain the action queue, forwarding each action to the device API.
/// Runs until every sender is dropped, which for this process means
/// forever.
pub async fn run(rx: UnboundedReceiver<Action>, client: DeviceClient, led: Box<dyn StatusLed>) {
    run_with(rx, led, move |action| {
        let client = client.clone();
        async move { client.send_command(action).await }
    })
    .await;
}

/// Worker loop over an injected command sender. The LED is lit while a
/// command is in flight and cleared after, success or failure. A failed
/// command is logged and the loop keeps serving further presses.
async fn run_with<F, Fut>(
    mut rx: UnboundedReceiver<Action>,
    mut led: Box<dyn StatusLed>,
    mut issue: F,
) where
    F: FnMut(Action) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    while let Some(action) = rx.recv().await {
        info!(command = action.command(), "Button pressed");
        led.set(true);
        match issue(action).await {
            Ok(()) => info!(command = action.command(), "Command sent"),
            Err(e) => error!(command = action.command(), error = %e, "Command failed"),
        }
        led.set(false);
    }
}
