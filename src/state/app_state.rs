//! Application state definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of rows per list page
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    ForgotPassword,
    Dashboard,
    Projects,
    ProjectCreate,
    ProjectEdit,
    Estimations,
    EstimationCreate,
    EstimationEdit,
}

impl View {
    /// Views reachable before a session exists
    pub fn is_auth(&self) -> bool {
        matches!(self, View::Login | View::Register | View::ForgotPassword)
    }
}

/// Authenticated session returned by the API
#[allow(dead_code)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Project record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    #[default]
    Processing,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "In Transit")]
    InTransit,
    Rejected,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::Processing,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
        ProjectStatus::InTransit,
        ProjectStatus::Rejected,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::InTransit => "In Transit",
            Self::Rejected => "Rejected",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Processing => Self::Completed,
            Self::Completed => Self::OnHold,
            Self::OnHold => Self::InTransit,
            Self::InTransit => Self::Rejected,
            Self::Rejected => Self::Processing,
        }
    }
}

/// Estimation record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EstimationStatus {
    #[default]
    Created,
    Processing,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "In Transit")]
    InTransit,
    Rejected,
}

impl EstimationStatus {
    pub const ALL: [EstimationStatus; 5] = [
        EstimationStatus::Created,
        EstimationStatus::Processing,
        EstimationStatus::OnHold,
        EstimationStatus::InTransit,
        EstimationStatus::Rejected,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Processing => "Processing",
            Self::OnHold => "On Hold",
            Self::InTransit => "In Transit",
            Self::Rejected => "Rejected",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Created => Self::Processing,
            Self::Processing => Self::OnHold,
            Self::OnHold => Self::InTransit,
            Self::InTransit => Self::Rejected,
            Self::Rejected => Self::Created,
        }
    }
}

/// Project record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub customer: String,
    pub ref_number: String,
    pub project_name: String,
    pub project_number: String,
    pub area_location: String,
    pub address: String,
    pub status: ProjectStatus,
    pub due_date: NaiveDate,
    pub contact: String,
    pub manager: String,
    pub staff: String,
    pub email: String,
    pub comments: String,
    pub created_at: NaiveDate,
}

/// A single priced line within an estimation section.
///
/// `total` is a display cache recomputed through the pricing calculator on
/// every quantity/price/margin edit; aggregates never read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
    pub unit: String,
    pub quantity: f64,
    pub price: f64,
    pub margin: f64,
    pub total: f64,
}

/// Named grouping of items within an estimation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub items: Vec<Item>,
}

/// Estimation record: ordered sections of ordered items plus metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimation {
    pub id: String,
    pub version: String,
    pub project: String,
    pub client: String,
    pub status: EstimationStatus,
    pub created_at: NaiveDate,
    pub last_modified: NaiveDate,
    pub sections: Vec<Section>,
}

/// Sort field for the projects list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectSortField {
    #[default]
    CreatedAt,
    DueDate,
    Customer,
    ProjectName,
    Status,
}

impl ProjectSortField {
    pub fn next(&self) -> Self {
        match self {
            Self::CreatedAt => Self::DueDate,
            Self::DueDate => Self::Customer,
            Self::Customer => Self::ProjectName,
            Self::ProjectName => Self::Status,
            Self::Status => Self::CreatedAt,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CreatedAt => "Created",
            Self::DueDate => "Due",
            Self::Customer => "Customer",
            Self::ProjectName => "Name",
            Self::Status => "Status",
        }
    }
}

/// Sort field for the estimations list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EstimationSortField {
    #[default]
    CreatedAt,
    LastModified,
    Version,
    Project,
    Client,
    Status,
}

impl EstimationSortField {
    pub fn next(&self) -> Self {
        match self {
            Self::CreatedAt => Self::LastModified,
            Self::LastModified => Self::Version,
            Self::Version => Self::Project,
            Self::Project => Self::Client,
            Self::Client => Self::Status,
            Self::Status => Self::CreatedAt,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CreatedAt => "Created",
            Self::LastModified => "Modified",
            Self::Version => "Version",
            Self::Project => "Project",
            Self::Client => "Client",
            Self::Status => "Status",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Query passed to the API when listing projects
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectFilters {
    pub search: String,
    pub statuses: Vec<ProjectStatus>,
    pub due_date: Option<NaiveDate>,
    pub sort_field: ProjectSortField,
    pub sort_direction: SortDirection,
}

/// Query passed to the API when listing estimations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EstimationFilters {
    pub search: String,
    pub status: Option<EstimationStatus>,
    pub sort_field: EstimationSortField,
    pub sort_direction: SortDirection,
}

/// Which list filter is currently capturing keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterInput {
    #[default]
    None,
    Search,
    DueDate,
}

/// Pending delete confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmDelete {
    Project(String),
    Estimation(String),
}

/// Multi-select status picker overlay for the projects list
#[derive(Debug, Clone, Default)]
pub struct StatusPicker {
    pub cursor: usize,
    pub checked: [bool; ProjectStatus::ALL.len()],
}

impl StatusPicker {
    /// Open the picker pre-checked from the active filter
    pub fn from_filter(statuses: &[ProjectStatus]) -> Self {
        let mut picker = Self::default();
        for (idx, status) in ProjectStatus::ALL.iter().enumerate() {
            picker.checked[idx] = statuses.contains(status);
        }
        picker
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < ProjectStatus::ALL.len() {
            self.cursor += 1;
        }
    }

    pub fn toggle_current(&mut self) {
        self.checked[self.cursor] = !self.checked[self.cursor];
    }

    /// Collect the checked statuses in display order
    pub fn selected(&self) -> Vec<ProjectStatus> {
        ProjectStatus::ALL
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.checked[*idx])
            .map(|(_, status)| *status)
            .collect()
    }
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub session: Option<Session>,

    // Data
    pub projects: Vec<Project>,
    pub estimations: Vec<Estimation>,

    // Selection and paging (shared by both list views)
    pub selected_index: usize,
    pub page: usize,
    pub page_size: usize,

    // Filters
    pub project_filters: ProjectFilters,
    pub estimation_filters: EstimationFilters,
    pub filter_input: FilterInput,
    /// Text buffer for the due-date filter while it is being typed
    pub due_date_input: String,
    pub status_picker: Option<StatusPicker>,

    // Transient UI state
    pub loading: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
    pub confirm_delete: Option<ConfirmDelete>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_view: View::default(),
            session: None,
            projects: Vec::new(),
            estimations: Vec::new(),
            selected_index: 0,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            project_filters: ProjectFilters::default(),
            estimation_filters: EstimationFilters::default(),
            filter_input: FilterInput::None,
            due_date_input: String::new(),
            status_picker: None,
            loading: false,
            status_message: None,
            error_message: None,
            confirm_delete: None,
        }
    }
}

impl AppState {
    /// Move selection down within the current page
    pub fn move_selection_down(&mut self, total: usize) {
        let rows = self.page_rows(total);
        if rows > 0 && self.selected_index < rows - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection and paging (after filters change or data reloads)
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.page = 0;
    }

    /// Number of pages for `total` records (at least 1)
    pub fn page_count(&self, total: usize) -> usize {
        if total == 0 {
            1
        } else {
            total.div_ceil(self.page_size)
        }
    }

    /// Index range of the current page within the record list
    pub fn page_range(&self, total: usize) -> std::ops::Range<usize> {
        let start = (self.page * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    /// Number of rows on the current page
    pub fn page_rows(&self, total: usize) -> usize {
        self.page_range(total).len()
    }

    /// Absolute index of the selected row within the record list
    pub fn selected_record_index(&self, total: usize) -> Option<usize> {
        let range = self.page_range(total);
        let idx = range.start + self.selected_index;
        if range.contains(&idx) {
            Some(idx)
        } else {
            None
        }
    }

    pub fn next_page(&mut self, total: usize) {
        if self.page + 1 < self.page_count(total) {
            self.page += 1;
            self.selected_index = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.selected_index = 0;
        }
    }

    /// Clear transient messages before handling the next action
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_login() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Login);
        assert!(state.session.is_none());
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_auth_views() {
        assert!(View::Login.is_auth());
        assert!(View::Register.is_auth());
        assert!(View::ForgotPassword.is_auth());
        assert!(!View::Dashboard.is_auth());
        assert!(!View::Estimations.is_auth());
    }

    #[test]
    fn test_selection_moves_within_page() {
        let mut state = AppState::default();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);

        state.move_selection_down(3);
        state.move_selection_down(3);
        assert_eq!(state.selected_index, 2);

        // Clamped at the last row of the page
        state.move_selection_down(3);
        assert_eq!(state.selected_index, 2);
    }

    #[test]
    fn test_selection_ignores_empty_list() {
        let mut state = AppState::default();
        state.move_selection_down(0);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_page_count() {
        let state = AppState::default();
        assert_eq!(state.page_count(0), 1);
        assert_eq!(state.page_count(9), 1);
        assert_eq!(state.page_count(10), 2);
        assert_eq!(state.page_count(27), 3);
    }

    #[test]
    fn test_page_range_clamps_to_total() {
        let mut state = AppState::default();
        assert_eq!(state.page_range(4), 0..4);
        assert_eq!(state.page_range(20), 0..9);

        state.page = 2;
        assert_eq!(state.page_range(20), 18..20);
    }

    #[test]
    fn test_page_navigation() {
        let mut state = AppState::default();
        state.selected_index = 5;

        state.next_page(20);
        assert_eq!(state.page, 1);
        assert_eq!(state.selected_index, 0);

        state.next_page(20);
        assert_eq!(state.page, 2);

        // No page past the last
        state.next_page(20);
        assert_eq!(state.page, 2);

        state.prev_page();
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_selected_record_index_offsets_by_page() {
        let mut state = AppState::default();
        state.page = 1;
        state.selected_index = 2;
        assert_eq!(state.selected_record_index(20), Some(11));
        assert_eq!(state.selected_record_index(10), None);
    }

    #[test]
    fn test_sort_field_cycles() {
        let mut field = ProjectSortField::default();
        for _ in 0..5 {
            field = field.next();
        }
        assert_eq!(field, ProjectSortField::CreatedAt);

        let mut field = EstimationSortField::default();
        for _ in 0..6 {
            field = field.next();
        }
        assert_eq!(field, EstimationSortField::CreatedAt);
    }

    #[test]
    fn test_sort_direction_toggles() {
        assert_eq!(SortDirection::Asc.toggle(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggle(), SortDirection::Asc);
    }

    #[test]
    fn test_status_labels_round_trip_serde() {
        let json = serde_json::to_string(&ProjectStatus::OnHold).unwrap();
        assert_eq!(json, "\"On Hold\"");
        let parsed: ProjectStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ProjectStatus::OnHold);

        let json = serde_json::to_string(&EstimationStatus::InTransit).unwrap();
        assert_eq!(json, "\"In Transit\"");
    }

    #[test]
    fn test_status_cycles_cover_all_variants() {
        let mut seen = vec![ProjectStatus::default()];
        let mut status = ProjectStatus::default();
        for _ in 0..4 {
            status = status.next();
            seen.push(status);
        }
        for expected in ProjectStatus::ALL {
            assert!(seen.contains(&expected));
        }
    }

    #[test]
    fn test_status_picker_round_trip() {
        let mut picker = StatusPicker::from_filter(&[ProjectStatus::Completed]);
        assert_eq!(picker.selected(), vec![ProjectStatus::Completed]);

        picker.move_down();
        picker.toggle_current(); // toggles Completed off
        assert!(picker.selected().is_empty());

        picker.move_up();
        picker.toggle_current(); // checks Processing
        assert_eq!(picker.selected(), vec![ProjectStatus::Processing]);
    }

    #[test]
    fn test_status_picker_cursor_clamps() {
        let mut picker = StatusPicker::default();
        picker.move_up();
        assert_eq!(picker.cursor, 0);
        for _ in 0..10 {
            picker.move_down();
        }
        assert_eq!(picker.cursor, ProjectStatus::ALL.len() - 1);
    }
}
