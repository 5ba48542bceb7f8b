//! The eframe application: view routing, event drain, and rendering for the
//! listing and form views.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{EmployeeId, Gender};
use shared::validation::Field;

use crate::backend_bridge::commands::StoreCommand;
use crate::controller::events::{UiErrorContext, UiEvent};
use crate::controller::form::{EmployeeForm, SubmitAction};
use crate::controller::orchestration::dispatch_store_command;
use crate::controller::table::{Column, DeleteRequest, EmployeeTable, SortDirection};

/// How long a notification stays up before auto-dismissing.
const NOTIFICATION_TTL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    fn fill(self) -> egui::Color32 {
        match self {
            Self::Success => egui::Color32::from_rgb(46, 125, 50),
            Self::Error => egui::Color32::from_rgb(198, 40, 40),
            Self::Info => egui::Color32::from_rgb(2, 119, 189),
        }
    }
}

#[derive(Debug, Clone)]
struct Notification {
    severity: Severity,
    message: String,
    shown_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Listing,
    Form,
}

pub struct AdminApp {
    cmd_tx: Sender<StoreCommand>,
    ui_rx: Receiver<UiEvent>,
    view: View,
    table: EmployeeTable,
    form: Option<EmployeeForm>,
    notification: Option<Notification>,
    queue_status: String,
    loading: bool,
}

impl AdminApp {
    pub fn new(cmd_tx: Sender<StoreCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            view: View::Listing,
            table: EmployeeTable::new(),
            form: None,
            notification: None,
            queue_status: String::new(),
            loading: true,
        };
        app.dispatch(StoreCommand::LoadEmployees);
        app
    }

    fn dispatch(&mut self, cmd: StoreCommand) {
        dispatch_store_command(&self.cmd_tx, cmd, &mut self.queue_status);
    }

    fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.notification = Some(Notification {
            severity,
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    /// Navigating to the listing always resynchronizes with the store.
    fn back_to_listing(&mut self) {
        self.form = None;
        self.view = View::Listing;
        self.loading = true;
        self.dispatch(StoreCommand::LoadEmployees);
    }

    fn open_create_form(&mut self) {
        self.form = Some(EmployeeForm::create());
        self.view = View::Form;
    }

    fn open_edit_form(&mut self, id: EmployeeId) {
        self.form = Some(EmployeeForm::edit(id.clone()));
        self.view = View::Form;
        self.dispatch(StoreCommand::FetchEmployee { id });
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::EmployeesLoaded(rows) => {
                self.loading = false;
                self.table.set_rows(rows);
            }
            UiEvent::EmployeeFetched(employee) => {
                if let Some(form) = self.form.as_mut() {
                    form.record_loaded(employee);
                }
            }
            UiEvent::EmployeeSaved { updated } => {
                if let Some(form) = self.form.as_mut() {
                    form.save_succeeded(Instant::now());
                }
                let message = if updated {
                    "Employee updated successfully!"
                } else {
                    "Employee saved successfully!"
                };
                self.notify(Severity::Success, message);
            }
            UiEvent::EmployeesDeleted { count } => {
                self.table.delete_succeeded();
                tracing::debug!(count, "delete confirmed by store, reloading");
                let message = if count == 1 {
                    "Employee deleted successfully!"
                } else {
                    "Selected employees deleted successfully!"
                };
                self.notify(Severity::Success, message);
                self.loading = true;
                self.dispatch(StoreCommand::LoadEmployees);
            }
            UiEvent::Error(err) => {
                match err.context() {
                    UiErrorContext::LoadListing => {
                        // Keep whatever collection we already had.
                        self.loading = false;
                        self.notify(
                            Severity::Error,
                            format!("Error fetching employees: {}", err.message()),
                        );
                    }
                    UiErrorContext::FetchRecord => {
                        self.notify(Severity::Error, "Could not fetch employee data.");
                        self.back_to_listing();
                    }
                    UiErrorContext::Save => {
                        if let Some(form) = self.form.as_mut() {
                            form.save_failed();
                        }
                        self.notify(
                            Severity::Error,
                            format!("Failed to save data: {}", err.message()),
                        );
                    }
                    UiErrorContext::Delete => {
                        // Selection stays untouched for a user-initiated retry.
                        self.notify(
                            Severity::Error,
                            format!("Error deleting employees: {}", err.message()),
                        );
                    }
                    UiErrorContext::BackendStartup => {
                        self.notify(Severity::Error, err.message().to_string());
                    }
                }
            }
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn expire_notification(&mut self) {
        if let Some(notification) = &self.notification {
            if notification.shown_at.elapsed() >= NOTIFICATION_TTL {
                self.notification = None;
            }
        }
    }

    // -- Banner ------------------------------------------------------------

    fn banner_ui(&mut self, ctx: &egui::Context) {
        let mut clear_notification = false;
        let mut clear_status = false;

        if !self.queue_status.is_empty() || self.notification.is_some() {
            egui::TopBottomPanel::top("notification_banner").show(ctx, |ui| {
                if !self.queue_status.is_empty() {
                    ui.horizontal(|ui| {
                        ui.colored_label(Severity::Error.fill(), &self.queue_status);
                        if ui.small_button("Dismiss").clicked() {
                            clear_status = true;
                        }
                    });
                }
                if let Some(notification) = &self.notification {
                    ui.horizontal(|ui| {
                        ui.colored_label(notification.severity.fill(), &notification.message);
                        if ui.small_button("Dismiss").clicked() {
                            clear_notification = true;
                        }
                    });
                }
            });
        }

        if clear_status {
            self.queue_status.clear();
        }
        if clear_notification {
            self.notification = None;
        }
    }

    // -- Listing view ------------------------------------------------------

    fn listing_toolbar_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let mut mail_filter = self.table.mail_filter().to_string();
            let response = ui.add(
                egui::TextEdit::singleline(&mut mail_filter)
                    .hint_text("Filter by email...")
                    .desired_width(180.0),
            );
            if response.changed() {
                self.table.set_mail_filter(mail_filter);
            }

            let mut global_filter = self.table.global_filter().to_string();
            let response = ui.add(
                egui::TextEdit::singleline(&mut global_filter)
                    .hint_text("Search all columns...")
                    .desired_width(180.0),
            );
            if response.changed() {
                self.table.set_global_filter(global_filter);
            }

            if self.table.selected_count() > 0 {
                let label = if self.table.select_all_data() {
                    "Delete All".to_string()
                } else {
                    format!("Delete Selected ({})", self.table.selected_count())
                };
                if ui
                    .add(egui::Button::new(label).fill(Severity::Error.fill()))
                    .clicked()
                {
                    if self.table.request_delete_selected() == DeleteRequest::NothingSelected {
                        self.notify(Severity::Info, "Please select records to delete.");
                    }
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.menu_button("Columns", |ui| {
                    for column in Column::ALL {
                        let mut visible = self.table.is_visible(column);
                        if ui.checkbox(&mut visible, column.label()).changed() {
                            self.table.set_visible(column, visible);
                        }
                    }
                });
                if ui.button("Add Employee").clicked() {
                    self.open_create_form();
                }
            });
        });
    }

    fn sort_indicator(&self, column: Column) -> &'static str {
        match self.table.sort() {
            Some((sorted, SortDirection::Ascending)) if sorted == column => " ^",
            Some((sorted, SortDirection::Descending)) if sorted == column => " v",
            _ => "",
        }
    }

    fn listing_grid_ui(&mut self, ui: &mut egui::Ui) {
        let visible_columns: Vec<Column> = Column::ALL
            .into_iter()
            .filter(|column| self.table.is_visible(*column))
            .collect();
        let page_rows: Vec<shared::domain::Employee> =
            self.table.page_rows().into_iter().cloned().collect();

        let mut edit_target: Option<EmployeeId> = None;

        egui::Grid::new("employee_grid")
            .striped(true)
            .min_col_width(60.0)
            .show(ui, |ui| {
                // Header row.
                let mut select_all = self.table.select_all_data();
                if ui.checkbox(&mut select_all, "").changed() {
                    self.table.set_select_all(select_all);
                }
                for column in &visible_columns {
                    if column.sortable() {
                        let label = format!("{}{}", column.label(), self.sort_indicator(*column));
                        if ui.button(label).clicked() {
                            self.table.toggle_sort(*column);
                        }
                    } else {
                        ui.strong(column.label());
                    }
                }
                ui.strong("Actions");
                ui.end_row();

                for row in &page_rows {
                    let mut selected = self.table.is_selected(&row.id);
                    if ui.checkbox(&mut selected, "").changed() {
                        self.table.toggle_row(row.id.clone());
                    }
                    for column in &visible_columns {
                        match column {
                            Column::Name => ui.label(&row.name),
                            Column::Age => ui.label(row.age.to_string()),
                            Column::Gender => ui.label(row.gender.label()),
                            Column::Occupation => ui.label(&row.occupation),
                            Column::Phone => ui.label(&row.phone),
                            Column::Mail => ui.label(&row.mail),
                        };
                    }
                    ui.horizontal(|ui| {
                        if ui.small_button("Edit").clicked() {
                            edit_target = Some(row.id.clone());
                        }
                        if ui.small_button("Delete").clicked() {
                            self.table.request_delete_row(row.id.clone());
                        }
                    });
                    ui.end_row();
                }
            });

        if page_rows.is_empty() {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                if self.loading {
                    ui.spinner();
                } else {
                    ui.label("No results.");
                }
            });
        }

        if let Some(id) = edit_target {
            self.open_edit_form(id);
        }
    }

    fn listing_pagination_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(self.table.can_next_page(), egui::Button::new("Next"))
                    .clicked()
                {
                    self.table.next_page();
                }
                if ui
                    .add_enabled(self.table.can_previous_page(), egui::Button::new("Previous"))
                    .clicked()
                {
                    self.table.previous_page();
                }
                ui.label(format!(
                    "Page {} of {}",
                    self.table.page_index() + 1,
                    self.table.page_count()
                ));
            });
        });
    }

    fn listing_ui(&mut self, ui: &mut egui::Ui) {
        self.listing_toolbar_ui(ui);
        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| {
            self.listing_grid_ui(ui);
        });
        ui.separator();
        self.listing_pagination_ui(ui);
    }

    fn confirm_modal_ui(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.table.pending_delete() else {
            return;
        };
        let message = pending.message.clone();

        let mut decision: Option<bool> = None;
        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        decision = Some(false);
                    }
                    if ui.button("Ok").clicked() {
                        decision = Some(true);
                    }
                });
            });

        match decision {
            Some(true) => {
                if let Some(ids) = self.table.confirm_delete() {
                    self.dispatch(StoreCommand::DeleteEmployees { ids });
                }
            }
            Some(false) => self.table.cancel_delete(),
            None => {}
        }
    }

    // -- Form view ---------------------------------------------------------

    fn form_text_field(
        ui: &mut egui::Ui,
        form: &mut EmployeeForm,
        field: Field,
        placeholder: &str,
    ) {
        let mut value = match field {
            Field::Name => form.input().name.clone(),
            Field::Age => form.input().age.clone(),
            Field::Occupation => form.input().occupation.clone(),
            Field::Phone => form.input().phone.clone(),
            Field::Mail => form.input().mail.clone(),
            Field::Gender => return,
        };

        ui.label(format!("{} *", field.label()));
        let response = ui.add(
            egui::TextEdit::singleline(&mut value)
                .hint_text(placeholder)
                .desired_width(320.0),
        );
        if response.changed() {
            form.set_text(field, value);
        }
        if response.lost_focus() {
            form.touch(field);
        }
        if let Some(message) = form.visible_error(field) {
            ui.colored_label(Severity::Error.fill(), message);
        }
        ui.add_space(6.0);
    }

    fn form_ui(&mut self, ui: &mut egui::Ui) {
        let mut submit_action: Option<SubmitAction> = None;
        let mut cancel_clicked = false;

        {
            let Some(form) = self.form.as_mut() else {
                return;
            };

            let title = if form.is_edit() {
                "Edit Employee"
            } else {
                "Add New Employee"
            };
            ui.vertical_centered(|ui| ui.heading(title));
            ui.add_space(12.0);

            if form.is_loading() {
                ui.vertical_centered(|ui| {
                    ui.spinner();
                    ui.label("Loading employee...");
                });
                return;
            }

            Self::form_text_field(ui, form, Field::Name, "Enter name");
            Self::form_text_field(ui, form, Field::Age, "Enter age");
            Self::form_text_field(ui, form, Field::Occupation, "Enter occupation");
            Self::form_text_field(ui, form, Field::Phone, "Enter phone");
            Self::form_text_field(ui, form, Field::Mail, "Enter mail");

            ui.label("gender *");
            ui.horizontal(|ui| {
                for gender in Gender::ALL {
                    if ui
                        .radio(form.input().gender == Some(gender), gender.label())
                        .clicked()
                    {
                        form.set_gender(gender);
                    }
                }
            });
            if let Some(message) = form.visible_error(Field::Gender) {
                ui.colored_label(Severity::Error.fill(), message);
            }

            ui.add_space(16.0);
            if ui.button("Cancel").clicked() {
                cancel_clicked = true;
            }
            let save_label = if form.is_submitting() {
                "Saving..."
            } else {
                "Save Employee"
            };
            if ui
                .add_enabled(form.can_submit(), egui::Button::new(save_label))
                .clicked()
            {
                submit_action = form.submit();
            }
        }

        match submit_action {
            Some(SubmitAction::Insert(draft)) => {
                self.dispatch(StoreCommand::CreateEmployee { draft });
            }
            Some(SubmitAction::Update(id, draft)) => {
                self.dispatch(StoreCommand::UpdateEmployee { id, draft });
            }
            None => {}
        }
        if cancel_clicked {
            self.back_to_listing();
        }
    }
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.expire_notification();

        let redirect_due = self
            .form
            .as_ref()
            .is_some_and(|form| form.redirect_due(Instant::now()));
        if redirect_due {
            self.back_to_listing();
        }

        self.banner_ui(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Listing => self.listing_ui(ui),
            View::Form => self.form_ui(ui),
        });

        self.confirm_modal_ui(ctx);

        // Timers (banner expiry, delayed redirect) need frames even without
        // input.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}
