//! Form-view interaction state.
//!
//! One employee draft, switchable between create and edit mode. Validation
//! errors are tracked per field and only shown once the field has been
//! touched; submission is blocked while invalid or while a save is in
//! flight. A successful save schedules a delayed return to the listing so
//! the user can read the notification first.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use shared::domain::{Employee, EmployeeDraft, EmployeeId, Gender};
use shared::validation::{DraftInput, Field};

/// How long the success notification stays before the form navigates back.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EmployeeId),
}

/// The store call a valid submission resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAction {
    Insert(EmployeeDraft),
    Update(EmployeeId, EmployeeDraft),
}

pub struct EmployeeForm {
    mode: FormMode,
    input: DraftInput,
    touched: HashSet<Field>,
    errors: HashMap<Field, String>,
    /// Edit mode only: the record fetch has not come back yet.
    loading: bool,
    submitting: bool,
    redirect_at: Option<Instant>,
}

impl EmployeeForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            input: DraftInput::default(),
            touched: HashSet::new(),
            errors: HashMap::new(),
            loading: false,
            submitting: false,
            redirect_at: None,
        }
    }

    /// Edit mode starts loading; the caller issues the fetch and feeds the
    /// result back through `record_loaded`.
    pub fn edit(id: EmployeeId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            input: DraftInput::default(),
            touched: HashSet::new(),
            errors: HashMap::new(),
            loading: true,
            submitting: false,
            redirect_at: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn input(&self) -> &DraftInput {
        &self.input
    }

    /// Replaces the draft with the fetched record (edit mode).
    pub fn record_loaded(&mut self, employee: Employee) {
        let (_, draft) = employee.into_parts();
        self.input = DraftInput::from_draft(&draft);
        self.touched.clear();
        self.errors.clear();
        self.loading = false;
    }

    // -- Field mutation ----------------------------------------------------

    pub fn set_text(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.input.name = value,
            Field::Age => self.input.age = value,
            Field::Occupation => self.input.occupation = value,
            Field::Phone => self.input.phone = value,
            Field::Mail => self.input.mail = value,
            Field::Gender => return,
        }
        self.revalidate(field);
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.input.gender = Some(gender);
        self.touched.insert(Field::Gender);
        self.revalidate(Field::Gender);
    }

    /// Marks a field as interacted with; errors for it become visible.
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
        self.revalidate(field);
    }

    fn revalidate(&mut self, field: Field) {
        match self.input.validate_field(field) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(err) => {
                self.errors.insert(field, err.message);
            }
        }
    }

    /// The inline message for a field, shown only once it has been touched.
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if !self.touched.contains(&field) {
            return None;
        }
        self.errors.get(&field).map(String::as_str)
    }

    // -- Submission --------------------------------------------------------

    pub fn is_valid(&self) -> bool {
        self.input.validate().is_ok()
    }

    /// Submit control gating: disabled while loading, in flight, invalid, or
    /// already redirecting.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.submitting && self.redirect_at.is_none() && self.is_valid()
    }

    /// Full-schema validation, then the store action for the caller to
    /// dispatch. On any field failure: every field becomes touched, all
    /// errors visible, and no action is produced.
    pub fn submit(&mut self) -> Option<SubmitAction> {
        match self.input.validate() {
            Ok(draft) => {
                self.submitting = true;
                match &self.mode {
                    FormMode::Create => Some(SubmitAction::Insert(draft)),
                    FormMode::Edit(id) => Some(SubmitAction::Update(id.clone(), draft)),
                }
            }
            Err(errors) => {
                self.touched.extend(Field::ALL);
                self.errors = errors
                    .into_iter()
                    .map(|err| (err.field, err.message))
                    .collect();
                None
            }
        }
    }

    /// Save came back successful: schedule the delayed return to the listing.
    pub fn save_succeeded(&mut self, now: Instant) {
        self.submitting = false;
        self.redirect_at = Some(now + REDIRECT_DELAY);
    }

    /// Save failed: keep every buffer for a user-initiated retry.
    pub fn save_failed(&mut self) {
        self.submitting = false;
    }

    /// True once the scheduled redirect should fire.
    pub fn redirect_due(&self, now: Instant) -> bool {
        self.redirect_at.is_some_and(|at| now >= at)
    }
}
