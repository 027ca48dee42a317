//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

pub const QUEUE_FULL_MESSAGE: &str = "UI command queue is full; please retry";
pub const WORKER_DISCONNECTED_MESSAGE: &str =
    "Backend command processor disconnected (possible startup/runtime failure)";

/// Queues `cmd` without blocking the UI thread. On failure the command is
/// handed back and `status` explains why.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), BackendCommand> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(cmd)) => {
            tracing::warn!(command = cmd_name, "ui->backend queue full");
            *status = UiError::new(UiErrorContext::CommandQueue, QUEUE_FULL_MESSAGE).status_line();
            Err(cmd)
        }
        Err(TrySendError::Disconnected(cmd)) => {
            tracing::warn!(command = cmd_name, "backend worker disconnected");
            *status =
                UiError::new(UiErrorContext::CommandQueue, WORKER_DISCONNECTED_MESSAGE).status_line();
            Err(cmd)
        }
    }
}
