//! Store commands queued from UI to the backend worker.

use shared::domain::{EmployeeDraft, EmployeeId};

pub enum StoreCommand {
    LoadEmployees,
    FetchEmployee {
        id: EmployeeId,
    },
    CreateEmployee {
        draft: EmployeeDraft,
    },
    UpdateEmployee {
        id: EmployeeId,
        draft: EmployeeDraft,
    },
    DeleteEmployees {
        ids: Vec<EmployeeId>,
    },
}
