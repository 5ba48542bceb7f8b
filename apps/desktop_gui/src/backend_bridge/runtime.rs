//! Store worker: a dedicated thread owning a tokio runtime and the
//! `StoreClient`, draining the command queue serially so the app never
//! issues overlapping writes for the same record.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use store_client::{StoreClient, StoreConfig};

use crate::backend_bridge::commands::StoreCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(config: StoreConfig, cmd_rx: Receiver<StoreCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("store worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build store worker runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = StoreClient::new(config);
            tracing::info!("store worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    StoreCommand::LoadEmployees => {
                        let event = match client.list_employees().await {
                            Ok(rows) => {
                                tracing::debug!(rows = rows.len(), "loaded employee collection");
                                UiEvent::EmployeesLoaded(rows)
                            }
                            Err(err) => UiEvent::Error(UiError::from_store(
                                UiErrorContext::LoadListing,
                                &err,
                            )),
                        };
                        let _ = ui_tx.try_send(event);
                    }
                    StoreCommand::FetchEmployee { id } => {
                        let event = match client.get_employee(&id).await {
                            Ok(employee) => UiEvent::EmployeeFetched(employee),
                            Err(err) => UiEvent::Error(UiError::from_store(
                                UiErrorContext::FetchRecord,
                                &err,
                            )),
                        };
                        let _ = ui_tx.try_send(event);
                    }
                    StoreCommand::CreateEmployee { draft } => {
                        let event = match client.insert_employee(&draft).await {
                            Ok(stored) => {
                                tracing::info!(id = %stored.id, "employee created");
                                UiEvent::EmployeeSaved { updated: false }
                            }
                            Err(err) => {
                                UiEvent::Error(UiError::from_store(UiErrorContext::Save, &err))
                            }
                        };
                        let _ = ui_tx.try_send(event);
                    }
                    StoreCommand::UpdateEmployee { id, draft } => {
                        let event = match client.update_employee(&id, &draft).await {
                            Ok(()) => {
                                tracing::info!(%id, "employee updated");
                                UiEvent::EmployeeSaved { updated: true }
                            }
                            Err(err) => {
                                UiEvent::Error(UiError::from_store(UiErrorContext::Save, &err))
                            }
                        };
                        let _ = ui_tx.try_send(event);
                    }
                    StoreCommand::DeleteEmployees { ids } => {
                        let count = ids.len();
                        let event = match client.delete_employees(&ids).await {
                            Ok(()) => {
                                tracing::info!(count, "employees deleted");
                                UiEvent::EmployeesDeleted { count }
                            }
                            Err(err) => {
                                UiEvent::Error(UiError::from_store(UiErrorContext::Delete, &err))
                            }
                        };
                        let _ = ui_tx.try_send(event);
                    }
                }
            }
        });
    });
}
