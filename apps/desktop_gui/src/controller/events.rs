//! UI events and error modeling for the desktop controller.

use shared::domain::Employee;
use store_client::StoreError;

pub enum UiEvent {
    EmployeesLoaded(Vec<Employee>),
    EmployeeFetched(Employee),
    EmployeeSaved { updated: bool },
    EmployeesDeleted { count: usize },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Store,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadListing,
    FetchRecord,
    Save,
    Delete,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_store(context: UiErrorContext, err: &StoreError) -> Self {
        let is_validation = matches!(
            err,
            StoreError::Rejected { body: Some(body), .. }
                if body.code == shared::error::ErrorCode::Validation
        );
        // Transient failures (transport, 5xx) surface as Transport so the
        // user knows a plain retry may succeed; the rest stick to the store.
        let category = if is_validation {
            UiErrorCategory::Validation
        } else if err.is_transient() {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Store
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("timeout")
            || lower.contains("connection")
            || lower.contains("network")
            || lower.contains("transport")
            || lower.contains("unavailable")
            || lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else if lower.contains("invalid") || lower.contains("missing") {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
