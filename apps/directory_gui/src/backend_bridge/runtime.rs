//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};
use directory_client::EmployeeApi;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Spawns the backend worker. Commands run one at a time, in queue order, on
/// a Tokio runtime owned by the worker thread.
pub const WORKER_READY_MESSAGE: &str = "Backend worker ready";

pub fn launch(
    api: Arc<dyn EmployeeApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!("backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info(WORKER_READY_MESSAGE.to_string()));
            while let Ok(cmd) = cmd_rx.recv() {
                let name = cmd.name();
                let event = execute(api.as_ref(), cmd).await;
                if ui_tx.send(event).is_err() {
                    tracing::debug!(command = name, "ui event receiver dropped");
                    break;
                }
            }
            tracing::info!("backend worker stopped");
        });
    })
}

pub async fn execute(api: &dyn EmployeeApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::LoadEmployees => UiEvent::EmployeesLoaded(api.list().await),
        BackendCommand::SubmitForm {
            generation,
            request,
        } => UiEvent::FormSubmitted {
            generation,
            result: request.execute(api).await,
        },
        BackendCommand::DeleteEmployee { id } => UiEvent::EmployeeDeleted {
            id,
            result: api.delete(id).await,
        },
    }
}
