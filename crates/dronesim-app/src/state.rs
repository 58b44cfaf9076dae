//! Handle shared between the caller and the frame-loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{anyhow, Result};

use dronesim_core::commands::DroneCommand;
use dronesim_core::state::DroneSnapshot;

/// Commands sent from the caller to the frame-loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// An operator command to forward to the simulation engine.
    Drone(DroneCommand),
    /// Stop the frame loop.
    Shutdown,
}

/// Owner's side of a running frame loop.
///
/// Dropping the handle stops the loop.
pub struct LoopHandle {
    command_tx: mpsc::Sender<LoopCommand>,
    /// Latest snapshot for synchronous polling. Updated after every frame.
    latest_snapshot: Arc<Mutex<Option<DroneSnapshot>>>,
    thread: Option<JoinHandle<()>>,
}

impl LoopHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<LoopCommand>,
        latest_snapshot: Arc<Mutex<Option<DroneSnapshot>>>,
        thread: JoinHandle<()>,
    ) -> Self {
        Self {
            command_tx,
            latest_snapshot,
            thread: Some(thread),
        }
    }

    /// Forward a command to the engine; it applies at the next frame.
    pub fn send(&self, command: DroneCommand) -> Result<()> {
        self.command_tx
            .send(LoopCommand::Drone(command))
            .map_err(|_| anyhow!("simulation loop has stopped"))
    }

    /// A sender other threads can use to post commands.
    pub fn command_sender(&self) -> mpsc::Sender<LoopCommand> {
        self.command_tx.clone()
    }

    /// Most recent snapshot, if a frame has run yet.
    pub fn latest(&self) -> Option<DroneSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the loop and wait for the thread. Safe to call repeatedly.
    pub fn stop(&mut self) {
        let _ = self.command_tx.send(LoopCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
