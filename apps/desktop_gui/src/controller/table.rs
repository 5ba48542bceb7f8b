//! Listing-view interaction state.
//!
//! Owns the in-memory employee collection and every transient bit of table
//! state: sort order, filters, column visibility, row selection, the
//! select-all-data flag, pagination, and the pending delete confirmation.
//! Sorting, filtering and paging are purely in-memory; only `load` and the
//! delete operations reach the network, and both are driven by the caller.

use std::collections::HashSet;

use shared::domain::{Employee, EmployeeId};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Data columns of the listing grid, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Age,
    Gender,
    Occupation,
    Phone,
    Mail,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Name,
        Column::Age,
        Column::Gender,
        Column::Occupation,
        Column::Phone,
        Column::Mail,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Occupation => "Occupation",
            Self::Phone => "Phone",
            Self::Mail => "Email",
        }
    }

    /// Only the two columns the listing offers sort toggles for.
    pub fn sortable(self) -> bool {
        matches!(self, Self::Name | Self::Mail)
    }

    fn compare(self, a: &Employee, b: &Employee) -> std::cmp::Ordering {
        match self {
            Self::Age => a.age.cmp(&b.age),
            _ => self.text_of(a).cmp(&self.text_of(b)),
        }
    }

    fn text_of(self, employee: &Employee) -> String {
        match self {
            Self::Name => employee.name.clone(),
            Self::Age => employee.age.to_string(),
            Self::Gender => employee.gender.label().to_string(),
            Self::Occupation => employee.occupation.clone(),
            Self::Phone => employee.phone.clone(),
            Self::Mail => employee.mail.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// What a delete confirmation was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteKind {
    /// Toolbar bulk delete over the selection (or everything, when the
    /// select-all-data flag is set).
    Bulk,
    /// Row-level delete of a single record.
    Single,
}

/// A delete waiting on user confirmation. Holds the resolved target set and
/// the message shown in the dialog; no store call happens until `confirm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub kind: DeleteKind,
    pub targets: Vec<EmployeeId>,
    pub message: String,
}

/// Outcome of a delete request, before any confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRequest {
    /// Nothing to delete; surface an informational notice and stop.
    NothingSelected,
    /// A `PendingDelete` is now held and needs user confirmation.
    ConfirmationRequired,
}

pub struct EmployeeTable {
    rows: Vec<Employee>,
    sort: Option<(Column, SortDirection)>,
    mail_filter: String,
    global_filter: String,
    hidden: HashSet<Column>,
    selected: HashSet<EmployeeId>,
    select_all_data: bool,
    page_index: usize,
    page_size: usize,
    pending_delete: Option<PendingDelete>,
}

impl EmployeeTable {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            sort: None,
            mail_filter: String::new(),
            global_filter: String::new(),
            hidden: HashSet::new(),
            selected: HashSet::new(),
            select_all_data: false,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            pending_delete: None,
        }
    }

    /// Replaces the whole collection after a `load`. Selection is pruned to
    /// ids that still exist; everything else carries over.
    pub fn set_rows(&mut self, rows: Vec<Employee>) {
        let live: HashSet<&EmployeeId> = rows.iter().map(|row| &row.id).collect();
        self.selected.retain(|id| live.contains(id));
        if self.selected.is_empty() {
            self.select_all_data = false;
        }
        self.rows = rows;
        self.clamp_page();
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    // -- Sorting -----------------------------------------------------------

    pub fn sort(&self) -> Option<(Column, SortDirection)> {
        self.sort
    }

    /// Click-to-sort: first click ascending, second descending, and switching
    /// columns starts ascending again.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == column => {
                Some((column, SortDirection::Descending))
            }
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    // -- Filtering ---------------------------------------------------------

    pub fn mail_filter(&self) -> &str {
        &self.mail_filter
    }

    pub fn set_mail_filter(&mut self, text: String) {
        self.mail_filter = text;
        self.clamp_page();
    }

    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    pub fn set_global_filter(&mut self, text: String) {
        self.global_filter = text;
        self.clamp_page();
    }

    fn matches_filters(&self, employee: &Employee) -> bool {
        let mail_needle = self.mail_filter.trim().to_lowercase();
        if !mail_needle.is_empty() && !employee.mail.to_lowercase().contains(&mail_needle) {
            return false;
        }
        let needle = self.global_filter.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        Column::ALL
            .iter()
            .any(|column| column.text_of(employee).to_lowercase().contains(&needle))
    }

    // -- Column visibility -------------------------------------------------

    pub fn is_visible(&self, column: Column) -> bool {
        !self.hidden.contains(&column)
    }

    pub fn set_visible(&mut self, column: Column, visible: bool) {
        if visible {
            self.hidden.remove(&column);
        } else {
            self.hidden.insert(column);
        }
    }

    // -- Derived row sets --------------------------------------------------

    /// All rows passing the filters, in sort order. Stable: rows with equal
    /// sort keys keep their loaded (id-ascending) order.
    pub fn visible_rows(&self) -> Vec<&Employee> {
        let mut rows: Vec<&Employee> = self
            .rows
            .iter()
            .filter(|row| self.matches_filters(row))
            .collect();
        if let Some((column, direction)) = self.sort {
            match direction {
                SortDirection::Ascending => rows.sort_by(|a, b| column.compare(a, b)),
                SortDirection::Descending => rows.sort_by(|a, b| column.compare(b, a)),
            }
        }
        rows
    }

    /// The slice of `visible_rows` on the current page.
    pub fn page_rows(&self) -> Vec<&Employee> {
        self.visible_rows()
            .into_iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }

    // -- Pagination --------------------------------------------------------

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_count(&self) -> usize {
        let visible = self.visible_rows().len();
        if visible == 0 {
            1
        } else {
            visible.div_ceil(self.page_size)
        }
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.page_index -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.page_index += 1;
        }
    }

    fn clamp_page(&mut self) {
        let last = self.page_count() - 1;
        if self.page_index > last {
            self.page_index = last;
        }
    }

    // -- Selection ---------------------------------------------------------

    pub fn is_selected(&self, id: &EmployeeId) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn toggle_row(&mut self, id: EmployeeId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        } else {
            self.select_all_data = false;
        }
    }

    pub fn select_all_data(&self) -> bool {
        self.select_all_data
    }

    /// The header checkbox. Checking selects every row passing the current
    /// filter, across pages, and records intent to act on the entire remote
    /// collection; unchecking clears both.
    pub fn set_select_all(&mut self, checked: bool) {
        self.select_all_data = checked;
        if checked {
            self.selected = self
                .visible_rows()
                .iter()
                .map(|row| row.id.clone())
                .collect();
        } else {
            self.selected.clear();
        }
    }

    // -- Delete flow -------------------------------------------------------

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    /// Toolbar delete over the current selection. With the select-all-data
    /// flag set the target is every loaded row; otherwise the selected ids.
    pub fn request_delete_selected(&mut self) -> DeleteRequest {
        let (targets, message) = if self.select_all_data {
            (
                self.rows.iter().map(|row| row.id.clone()).collect(),
                "Are you sure you want to delete ALL employees?".to_string(),
            )
        } else {
            let mut targets: Vec<EmployeeId> = self.selected.iter().cloned().collect();
            targets.sort();
            let message = format!(
                "Are you sure you want to delete {} selected employee(s)?",
                targets.len()
            );
            (targets, message)
        };

        if targets.is_empty() {
            return DeleteRequest::NothingSelected;
        }

        self.pending_delete = Some(PendingDelete {
            kind: DeleteKind::Bulk,
            targets,
            message,
        });
        DeleteRequest::ConfirmationRequired
    }

    /// Row-level delete of one record.
    pub fn request_delete_row(&mut self, id: EmployeeId) -> DeleteRequest {
        self.pending_delete = Some(PendingDelete {
            kind: DeleteKind::Single,
            targets: vec![id],
            message: "Are you sure you want to delete this employee?".to_string(),
        });
        DeleteRequest::ConfirmationRequired
    }

    /// User confirmed: hands out the target set exactly once and leaves the
    /// pending state. The caller issues the store call.
    pub fn confirm_delete(&mut self) -> Option<Vec<EmployeeId>> {
        self.pending_delete.take().map(|pending| pending.targets)
    }

    /// User declined: discard the pending target set, no store interaction.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// A confirmed delete came back successful: clear the selection and the
    /// select-all-data flag. The caller triggers the reload.
    pub fn delete_succeeded(&mut self) {
        self.selected.clear();
        self.select_all_data = false;
    }
}

impl Default for EmployeeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Gender;

    fn employee(id: &str, name: &str, age: u32, mail: &str) -> Employee {
        Employee {
            id: EmployeeId(id.to_string()),
            name: name.to_string(),
            age,
            gender: Gender::Other,
            occupation: "Engineer".to_string(),
            phone: "+14155550123".to_string(),
            mail: mail.to_string(),
        }
    }

    fn table_with(rows: Vec<Employee>) -> EmployeeTable {
        let mut table = EmployeeTable::new();
        table.set_rows(rows);
        table
    }

    fn names(rows: &[&Employee]) -> Vec<String> {
        rows.iter().map(|row| row.name.clone()).collect()
    }

    #[test]
    fn sorting_ascending_then_descending_reverses_exactly() {
        let mut table = table_with(vec![
            employee("1", "Carol", 41, "carol@example.com"),
            employee("2", "Alice", 30, "alice@example.com"),
            employee("3", "Bob", 25, "bob@example.com"),
        ]);

        table.toggle_sort(Column::Name);
        let ascending = names(&table.visible_rows());
        assert_eq!(ascending, vec!["Alice", "Bob", "Carol"]);

        table.toggle_sort(Column::Name);
        let descending = names(&table.visible_rows());
        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(descending, reversed);
    }

    #[test]
    fn switching_sort_column_starts_ascending_again() {
        let mut table = table_with(vec![
            employee("1", "Bob", 25, "zz@example.com"),
            employee("2", "Alice", 30, "aa@example.com"),
        ]);

        table.toggle_sort(Column::Name);
        table.toggle_sort(Column::Name);
        assert_eq!(table.sort(), Some((Column::Name, SortDirection::Descending)));

        table.toggle_sort(Column::Mail);
        assert_eq!(table.sort(), Some((Column::Mail, SortDirection::Ascending)));
    }

    #[test]
    fn global_filter_is_case_insensitive_and_idempotent() {
        let mut table = table_with(vec![
            employee("1", "Alice", 30, "alice@example.com"),
            employee("2", "Bob", 25, "bob@example.com"),
        ]);

        table.set_global_filter("bob".to_string());
        let first = names(&table.visible_rows());
        assert_eq!(first, vec!["Bob"]);

        table.set_global_filter("bob".to_string());
        assert_eq!(names(&table.visible_rows()), first);
    }

    #[test]
    fn mail_filter_narrows_to_matching_addresses() {
        let mut table = table_with(vec![
            employee("1", "Alice", 30, "alice@corp.example"),
            employee("2", "Bob", 25, "bob@other.example"),
        ]);

        table.set_mail_filter("CORP".to_string());
        assert_eq!(names(&table.visible_rows()), vec!["Alice"]);
    }

    #[test]
    fn filtering_clamps_the_page_index() {
        let rows: Vec<Employee> = (0..25)
            .map(|n| employee(&format!("{n:02}"), &format!("Person{n:02}"), 20 + n, "p@example.com"))
            .collect();
        let mut table = table_with(rows);

        table.next_page();
        table.next_page();
        assert_eq!(table.page_index(), 2);

        table.set_global_filter("Person00".to_string());
        assert_eq!(table.page_index(), 0);
        assert_eq!(table.page_count(), 1);
        assert!(!table.can_next_page());
    }

    #[test]
    fn pagination_walks_the_visible_set_in_page_sized_chunks() {
        let rows: Vec<Employee> = (0..12)
            .map(|n| employee(&format!("{n:02}"), &format!("Person{n:02}"), 20 + n, "p@example.com"))
            .collect();
        let mut table = table_with(rows);

        assert_eq!(table.page_rows().len(), DEFAULT_PAGE_SIZE);
        assert!(table.can_next_page());
        assert!(!table.can_previous_page());

        table.next_page();
        assert_eq!(table.page_rows().len(), 2);
        assert!(!table.can_next_page());
    }

    #[test]
    fn empty_delete_request_is_informational_and_holds_nothing() {
        let mut table = table_with(vec![employee("1", "Alice", 30, "a@example.com")]);

        assert_eq!(table.request_delete_selected(), DeleteRequest::NothingSelected);
        assert!(table.pending_delete().is_none());
        assert!(table.confirm_delete().is_none());
    }

    #[test]
    fn bulk_delete_over_a_selection_counts_the_targets_in_the_message() {
        let mut table = table_with(vec![
            employee("1", "Alice", 30, "a@example.com"),
            employee("2", "Bob", 25, "b@example.com"),
            employee("3", "Carol", 41, "c@example.com"),
        ]);
        table.toggle_row(EmployeeId("1".into()));
        table.toggle_row(EmployeeId("3".into()));

        assert_eq!(
            table.request_delete_selected(),
            DeleteRequest::ConfirmationRequired
        );
        let pending = table.pending_delete().expect("pending delete");
        assert_eq!(pending.kind, DeleteKind::Bulk);
        assert_eq!(
            pending.message,
            "Are you sure you want to delete 2 selected employee(s)?"
        );
        assert_eq!(
            pending.targets,
            vec![EmployeeId("1".into()), EmployeeId("3".into())]
        );
    }

    #[test]
    fn select_all_data_widens_the_target_to_every_loaded_row() {
        let mut table = table_with(vec![
            employee("1", "Alice", 30, "a@example.com"),
            employee("2", "Bob", 25, "b@example.com"),
        ]);
        table.set_select_all(true);

        assert_eq!(table.selected_count(), 2);
        table.request_delete_selected();
        let pending = table.pending_delete().expect("pending delete");
        assert_eq!(pending.message, "Are you sure you want to delete ALL employees?");
        assert_eq!(pending.targets.len(), 2);
    }

    #[test]
    fn header_toggle_selects_only_rows_passing_the_filter() {
        let mut table = table_with(vec![
            employee("1", "Alice", 30, "a@example.com"),
            employee("2", "Bob", 25, "b@example.com"),
        ]);
        table.set_global_filter("bob".to_string());
        table.set_select_all(true);

        assert!(table.is_selected(&EmployeeId("2".into())));
        assert!(!table.is_selected(&EmployeeId("1".into())));
    }

    #[test]
    fn cancel_discards_the_pending_target_set() {
        let mut table = table_with(vec![employee("1", "Alice", 30, "a@example.com")]);
        table.request_delete_row(EmployeeId("1".into()));
        assert!(table.pending_delete().is_some());

        table.cancel_delete();
        assert!(table.pending_delete().is_none());
        assert!(table.confirm_delete().is_none());
    }

    #[test]
    fn confirm_hands_out_the_targets_exactly_once() {
        let mut table = table_with(vec![employee("1", "Alice", 30, "a@example.com")]);
        table.request_delete_row(EmployeeId("1".into()));

        assert_eq!(table.confirm_delete(), Some(vec![EmployeeId("1".into())]));
        assert_eq!(table.confirm_delete(), None);
    }

    #[test]
    fn delete_success_clears_selection_and_select_all_flag() {
        let mut table = table_with(vec![
            employee("1", "Alice", 30, "a@example.com"),
            employee("2", "Bob", 25, "b@example.com"),
        ]);
        table.set_select_all(true);
        table.request_delete_selected();
        table.confirm_delete();

        table.delete_succeeded();
        assert_eq!(table.selected_count(), 0);
        assert!(!table.select_all_data());
    }

    #[test]
    fn reload_prunes_selection_to_surviving_rows() {
        let mut table = table_with(vec![
            employee("1", "Alice", 30, "a@example.com"),
            employee("2", "Bob", 25, "b@example.com"),
        ]);
        table.toggle_row(EmployeeId("1".into()));
        table.toggle_row(EmployeeId("2".into()));

        table.set_rows(vec![employee("2", "Bob", 25, "b@example.com")]);
        assert!(!table.is_selected(&EmployeeId("1".into())));
        assert!(table.is_selected(&EmployeeId("2".into())));
    }
}
