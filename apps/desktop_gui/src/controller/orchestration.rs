//! Command orchestration helpers from UI actions to the store command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::StoreCommand;

pub fn dispatch_store_command(
    cmd_tx: &Sender<StoreCommand>,
    cmd: StoreCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        StoreCommand::LoadEmployees => "load_employees",
        StoreCommand::FetchEmployee { .. } => "fetch_employee",
        StoreCommand::CreateEmployee { .. } => "create_employee",
        StoreCommand::UpdateEmployee { .. } => "update_employee",
        StoreCommand::DeleteEmployees { .. } => "delete_employees",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->store command"),
        Err(TrySendError::Full(_)) => {
            *status = "Store command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Store command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}
