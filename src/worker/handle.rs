use super::messages::{Command, Event};
use super::session::WorkerSession;
use super::stats::WorkerStats;
use crate::audio::AudioDecoder;
use crate::config::ModelConfig;
use crate::pipeline::ModelLoader;
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Spawn a worker session.
///
/// Returns the host-side handle for sending commands and the receiver
/// that will carry the session's events, starting with the initial
/// "ready" progress event.
pub fn spawn(
    loader: Arc<dyn ModelLoader>,
    decoder: Arc<dyn AudioDecoder>,
    model_config: ModelConfig,
    channel_capacity: usize,
) -> (WorkerHandle, mpsc::Receiver<Event>) {
    let (command_tx, command_rx) = mpsc::channel(channel_capacity);
    let (event_tx, event_rx) = mpsc::channel(channel_capacity);

    let session = WorkerSession::new(loader, decoder, model_config, event_tx);
    let task = tokio::spawn(session.run(command_rx));

    let handle = WorkerHandle {
        commands: Some(command_tx),
        task,
    };

    (handle, event_rx)
}

/// Host-side handle to a running worker session.
pub struct WorkerHandle {
    commands: Option<mpsc::Sender<Command>>,
    task: JoinHandle<WorkerStats>,
}

impl WorkerHandle {
    /// Send a command to the session.
    pub async fn send(&self, command: Command) -> Result<()> {
        let commands = self
            .commands
            .as_ref()
            .ok_or_else(|| anyhow!("worker command channel already closed"))?;

        commands
            .send(command)
            .await
            .map_err(|_| anyhow!("worker session has shut down"))
    }

    /// Close the command channel. The session finishes any in-flight
    /// operation, emits its final events, and exits.
    pub fn close(&mut self) {
        self.commands.take();
    }

    /// Close the command channel, wait for the session task to exit, and
    /// return the final session statistics.
    pub async fn shutdown(mut self) -> Result<WorkerStats> {
        self.close();
        self.task
            .await
            .map_err(|e| anyhow!("worker task panicked: {e}"))
    }
}
