//! Application state and core logic

use crate::api::ApiClient;
use crate::config::TuiConfig;
use crate::state::{
    AppState, ConfirmDelete, EstimationFocus, EstimationForm, EstimationStatus, FilterInput,
    FormState, ForgotPasswordForm, LoginForm, ProjectForm, RegisterForm, View,
};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Backend client (the in-memory mock in the shipping binary)
    pub api: Box<dyn ApiClient>,
    /// Active form, if a form view is open
    pub form: FormState,
    /// Persisted preferences
    config: TuiConfig,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance; starts on the login screen
    pub fn new(api: Box<dyn ApiClient>) -> Self {
        let config = TuiConfig::load().unwrap_or_else(|err| {
            tracing::warn!("failed to load config: {err:#}");
            TuiConfig::default()
        });

        let mut state = AppState::default();
        if let Some((field, direction)) = config.project_sort() {
            state.project_filters.sort_field = field;
            state.project_filters.sort_direction = direction;
        }
        if let Some((field, direction)) = config.estimation_sort() {
            state.estimation_filters.sort_field = field;
            state.estimation_filters.sort_direction = direction;
        }
        if let Some(size) = config.page_size {
            state.page_size = size.max(1);
        }

        Self {
            state,
            api,
            form: FormState::Login(LoginForm::new()),
            config,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.state.clear_messages();

        if self.state.status_picker.is_some() {
            self.handle_status_picker_key(key).await?;
            return Ok(());
        }
        if self.state.confirm_delete.is_some() {
            self.handle_confirm_key(key).await?;
            return Ok(());
        }
        if self.state.filter_input != FilterInput::None {
            self.handle_filter_input_key(key).await?;
            return Ok(());
        }

        match self.state.current_view {
            View::Login => self.handle_login_key(key).await?,
            View::Register => self.handle_register_key(key).await?,
            View::ForgotPassword => self.handle_forgot_key(key).await?,
            View::Dashboard => self.handle_dashboard_key(key).await?,
            View::Projects => self.handle_projects_key(key).await?,
            View::Estimations => self.handle_estimations_key(key).await?,
            View::ProjectCreate | View::ProjectEdit => self.handle_project_form_key(key).await?,
            View::EstimationCreate | View::EstimationEdit => {
                self.handle_estimation_form_key(key).await?
            }
        }
        Ok(())
    }

    // Auth views

    async fn handle_login_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.current_view = View::Register;
                self.form = FormState::Register(RegisterForm::new());
            }
            KeyCode::Char('f') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.current_view = View::ForgotPassword;
                self.form = FormState::ForgotPassword(ForgotPasswordForm::new());
            }
            KeyCode::Enter => self.submit_login().await?,
            _ => self.handle_form_navigation(key),
        }
        Ok(())
    }

    async fn handle_register_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.state.current_view = View::Login;
                self.form = FormState::Login(LoginForm::new());
            }
            KeyCode::Enter => self.submit_register().await?,
            _ => self.handle_form_navigation(key),
        }
        Ok(())
    }

    async fn handle_forgot_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.state.current_view = View::Login;
                self.form = FormState::Login(LoginForm::new());
            }
            KeyCode::Enter => self.submit_forgot_password().await?,
            _ => self.handle_form_navigation(key),
        }
        Ok(())
    }

    async fn submit_login(&mut self) -> Result<()> {
        let FormState::Login(form) = &self.form else {
            return Ok(());
        };
        if let Some(problem) = form.validate() {
            self.state.error_message = Some(problem);
            return Ok(());
        }
        let email = form.email.as_text().to_string();
        let password = form.password.as_text().to_string();
        match self.api.login(&email, &password).await {
            Ok(session) => {
                tracing::info!(email = %session.email, "signed in");
                self.state.session = Some(session);
                self.state.current_view = View::Dashboard;
                self.form = FormState::None;
                self.refresh_all().await;
            }
            Err(err) => {
                self.state.error_message = Some(format!("Login failed: {err}"));
            }
        }
        Ok(())
    }

    async fn submit_register(&mut self) -> Result<()> {
        let FormState::Register(form) = &self.form else {
            return Ok(());
        };
        if let Some(problem) = form.validate() {
            self.state.error_message = Some(problem);
            return Ok(());
        }
        let name = form.name.as_text().to_string();
        let email = form.email.as_text().to_string();
        let password = form.password.as_text().to_string();
        match self.api.register(&name, &email, &password).await {
            Ok(session) => {
                self.state.session = Some(session);
                self.state.current_view = View::Dashboard;
                self.form = FormState::None;
                self.refresh_all().await;
            }
            Err(err) => {
                self.state.error_message = Some(format!("Registration failed: {err}"));
            }
        }
        Ok(())
    }

    async fn submit_forgot_password(&mut self) -> Result<()> {
        let FormState::ForgotPassword(form) = &self.form else {
            return Ok(());
        };
        if let Some(problem) = form.validate() {
            self.state.error_message = Some(problem);
            return Ok(());
        }
        let email = form.email.as_text().to_string();
        match self.api.forgot_password(&email).await {
            Ok(message) => {
                self.state.status_message = Some(message);
                self.state.current_view = View::Login;
                self.form = FormState::Login(LoginForm::new());
            }
            Err(err) => {
                self.state.error_message = Some(format!("Request failed: {err}"));
            }
        }
        Ok(())
    }

    // Dashboard

    async fn handle_dashboard_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('r') => self.refresh_all().await,
            _ => self.handle_nav_key(key).await,
        }
        Ok(())
    }

    // List views

    async fn handle_projects_key(&mut self, key: KeyEvent) -> Result<()> {
        let total = self.state.projects.len();
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(total),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('h') | KeyCode::Left => self.state.prev_page(),
            KeyCode::Char('l') | KeyCode::Right => self.state.next_page(total),
            KeyCode::Char('/') => {
                self.state.filter_input = FilterInput::Search;
            }
            KeyCode::Char('D') => {
                self.state.due_date_input = self
                    .state
                    .project_filters
                    .due_date
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                self.state.filter_input = FilterInput::DueDate;
            }
            KeyCode::Char('f') => {
                self.state.status_picker = Some(crate::state::StatusPicker::from_filter(
                    &self.state.project_filters.statuses,
                ));
            }
            KeyCode::Char('s') => {
                self.state.project_filters.sort_field =
                    self.state.project_filters.sort_field.next();
                self.persist_sort_prefs();
                self.state.reset_selection();
                self.load_projects().await;
            }
            KeyCode::Char('S') => {
                self.state.project_filters.sort_direction =
                    self.state.project_filters.sort_direction.toggle();
                self.persist_sort_prefs();
                self.state.reset_selection();
                self.load_projects().await;
            }
            KeyCode::Char('n') => {
                self.state.current_view = View::ProjectCreate;
                self.form = FormState::Project(Box::new(ProjectForm::new()));
            }
            KeyCode::Char('e') | KeyCode::Enter => self.open_project_edit().await,
            KeyCode::Char('d') | KeyCode::Char('x') => {
                if let Some(idx) = self.state.selected_record_index(total) {
                    let id = self.state.projects[idx].id.clone();
                    self.state.confirm_delete = Some(ConfirmDelete::Project(id));
                }
            }
            KeyCode::Char('r') => self.load_projects().await,
            KeyCode::Esc => self.state.current_view = View::Dashboard,
            _ => self.handle_nav_key(key).await,
        }
        Ok(())
    }

    async fn handle_estimations_key(&mut self, key: KeyEvent) -> Result<()> {
        let total = self.state.estimations.len();
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(total),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('h') | KeyCode::Left => self.state.prev_page(),
            KeyCode::Char('l') | KeyCode::Right => self.state.next_page(total),
            KeyCode::Char('/') => {
                self.state.filter_input = FilterInput::Search;
            }
            KeyCode::Char('f') => {
                self.state.estimation_filters.status =
                    next_status_filter(self.state.estimation_filters.status);
                self.state.reset_selection();
                self.load_estimations().await;
            }
            KeyCode::Char('s') => {
                self.state.estimation_filters.sort_field =
                    self.state.estimation_filters.sort_field.next();
                self.persist_sort_prefs();
                self.state.reset_selection();
                self.load_estimations().await;
            }
            KeyCode::Char('S') => {
                self.state.estimation_filters.sort_direction =
                    self.state.estimation_filters.sort_direction.toggle();
                self.persist_sort_prefs();
                self.state.reset_selection();
                self.load_estimations().await;
            }
            KeyCode::Char('n') => {
                self.state.current_view = View::EstimationCreate;
                self.form = FormState::Estimation(Box::new(EstimationForm::new(next_version())));
            }
            KeyCode::Char('e') | KeyCode::Enter => self.open_estimation_edit().await,
            KeyCode::Char('d') | KeyCode::Char('x') => {
                if let Some(idx) = self.state.selected_record_index(total) {
                    let id = self.state.estimations[idx].id.clone();
                    self.state.confirm_delete = Some(ConfirmDelete::Estimation(id));
                }
            }
            KeyCode::Char('r') => self.load_estimations().await,
            KeyCode::Esc => self.state.current_view = View::Dashboard,
            _ => self.handle_nav_key(key).await,
        }
        Ok(())
    }

    /// Number-key navigation shared by the signed-in views
    async fn handle_nav_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('1') => {
                self.state.current_view = View::Dashboard;
                self.refresh_all().await;
            }
            KeyCode::Char('2') => {
                self.state.current_view = View::Projects;
                self.state.reset_selection();
                self.load_projects().await;
            }
            KeyCode::Char('3') => {
                self.state.current_view = View::Estimations;
                self.state.reset_selection();
                self.load_estimations().await;
            }
            _ => {}
        }
    }

    // Record forms

    async fn handle_project_form_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('w') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit_project_form().await?;
            return Ok(());
        }
        match key.code {
            KeyCode::Esc => {
                self.state.current_view = View::Projects;
                self.form = FormState::None;
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if matches!(&self.form, FormState::Project(f) if f.is_status_active()) =>
            {
                if let FormState::Project(form) = &mut self.form {
                    form.cycle_status();
                }
            }
            _ => self.handle_form_navigation(key),
        }
        Ok(())
    }

    async fn handle_estimation_form_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('w') {
                self.submit_estimation_form().await?;
            } else if let FormState::Estimation(form) = &mut self.form {
                match key.code {
                    KeyCode::Char('a') => form.add_item(),
                    KeyCode::Char('s') => form.add_section(),
                    KeyCode::Char('d') => form.remove_item(),
                    KeyCode::Char('x') => form.remove_section(),
                    _ => {}
                }
            }
            return Ok(());
        }
        match key.code {
            KeyCode::Esc => {
                self.state.current_view = View::Estimations;
                self.form = FormState::None;
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if matches!(&self.form, FormState::Estimation(f) if f.focus == EstimationFocus::Status) =>
            {
                if let FormState::Estimation(form) = &mut self.form {
                    form.cycle_status();
                }
            }
            _ => self.handle_form_navigation(key),
        }
        Ok(())
    }

    /// Tab/typing/backspace handling shared by every form view
    fn handle_form_navigation(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.input_char(c);
            }
            _ => {}
        }
    }

    async fn submit_project_form(&mut self) -> Result<()> {
        let FormState::Project(form) = &self.form else {
            return Ok(());
        };
        let errors = form.validate();
        if let Some(first) = errors.first() {
            self.state.error_message = Some(first.clone());
            return Ok(());
        }
        let record = form.to_project(Self::today());
        let result = match &form.id {
            Some(id) => self.api.update_project(id, record).await,
            None => self.api.create_project(record).await,
        };
        match result {
            Ok(saved) => {
                tracing::info!(id = %saved.id, "project saved");
                self.state.status_message = Some("Project saved".to_string());
                self.state.current_view = View::Projects;
                self.form = FormState::None;
                self.load_projects().await;
            }
            Err(err) => {
                self.state.error_message = Some(format!("Save failed: {err}"));
            }
        }
        Ok(())
    }

    async fn submit_estimation_form(&mut self) -> Result<()> {
        let FormState::Estimation(form) = &mut self.form else {
            return Ok(());
        };
        if !form.validate() {
            self.state.error_message = form.errors.first().cloned();
            return Ok(());
        }
        let record = form.to_estimation(Self::today());
        let result = match &form.id {
            Some(id) => self.api.update_estimation(id, record).await,
            None => self.api.create_estimation(record).await,
        };
        match result {
            Ok(saved) => {
                tracing::info!(id = %saved.id, version = %saved.version, "estimation saved");
                self.state.status_message = Some("Estimation saved".to_string());
                self.state.current_view = View::Estimations;
                self.form = FormState::None;
                self.load_estimations().await;
            }
            Err(err) => {
                self.state.error_message = Some(format!("Save failed: {err}"));
            }
        }
        Ok(())
    }

    async fn open_project_edit(&mut self) {
        let total = self.state.projects.len();
        let Some(idx) = self.state.selected_record_index(total) else {
            return;
        };
        let id = self.state.projects[idx].id.clone();
        match self.api.get_project(&id).await {
            Ok(Some(project)) => {
                self.form = FormState::Project(Box::new(ProjectForm::from_project(&project)));
                self.state.current_view = View::ProjectEdit;
            }
            Ok(None) => {
                self.state.error_message = Some("Project no longer exists".to_string());
                self.load_projects().await;
            }
            Err(err) => {
                self.state.error_message = Some(format!("Load failed: {err}"));
            }
        }
    }

    async fn open_estimation_edit(&mut self) {
        let total = self.state.estimations.len();
        let Some(idx) = self.state.selected_record_index(total) else {
            return;
        };
        let id = self.state.estimations[idx].id.clone();
        match self.api.get_estimation(&id).await {
            Ok(Some(estimation)) => {
                self.form =
                    FormState::Estimation(Box::new(EstimationForm::from_estimation(&estimation)));
                self.state.current_view = View::EstimationEdit;
            }
            Ok(None) => {
                self.state.error_message = Some("Estimation no longer exists".to_string());
                self.load_estimations().await;
            }
            Err(err) => {
                self.state.error_message = Some(format!("Load failed: {err}"));
            }
        }
    }

    // Overlays

    async fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let pending = self.state.confirm_delete.take();
                match pending {
                    Some(ConfirmDelete::Project(id)) => match self.api.delete_project(&id).await {
                        Ok(()) => {
                            self.state.status_message = Some("Project deleted".to_string());
                            self.load_projects().await;
                        }
                        Err(err) => {
                            self.state.error_message = Some(format!("Delete failed: {err}"));
                        }
                    },
                    Some(ConfirmDelete::Estimation(id)) => {
                        match self.api.delete_estimation(&id).await {
                            Ok(()) => {
                                self.state.status_message = Some("Estimation deleted".to_string());
                                self.load_estimations().await;
                            }
                            Err(err) => {
                                self.state.error_message = Some(format!("Delete failed: {err}"));
                            }
                        }
                    }
                    None => {}
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.state.confirm_delete = None;
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_filter_input_key(&mut self, key: KeyEvent) -> Result<()> {
        let is_search = self.state.filter_input == FilterInput::Search;
        match key.code {
            KeyCode::Enter => {
                if !is_search {
                    let text = self.state.due_date_input.trim().to_string();
                    if text.is_empty() {
                        self.state.project_filters.due_date = None;
                    } else {
                        match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
                            Ok(due) => self.state.project_filters.due_date = Some(due),
                            Err(_) => {
                                self.state.error_message =
                                    Some("Due date filter must be YYYY-MM-DD".to_string());
                                return Ok(());
                            }
                        }
                    }
                }
                self.state.filter_input = FilterInput::None;
                self.state.reset_selection();
                self.reload_current_list().await;
            }
            KeyCode::Esc => {
                if is_search {
                    self.active_search_mut().clear();
                } else {
                    self.state.due_date_input.clear();
                    self.state.project_filters.due_date = None;
                }
                self.state.filter_input = FilterInput::None;
                self.state.reset_selection();
                self.reload_current_list().await;
            }
            KeyCode::Backspace => {
                if is_search {
                    self.active_search_mut().pop();
                } else {
                    self.state.due_date_input.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if is_search {
                    self.active_search_mut().push(c);
                } else {
                    self.state.due_date_input.push(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_status_picker_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(picker) = &mut self.state.status_picker else {
            return Ok(());
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => picker.move_down(),
            KeyCode::Char('k') | KeyCode::Up => picker.move_up(),
            KeyCode::Char(' ') => picker.toggle_current(),
            KeyCode::Enter => {
                self.state.project_filters.statuses = picker.selected();
                self.state.status_picker = None;
                self.state.reset_selection();
                self.load_projects().await;
            }
            KeyCode::Esc => {
                self.state.status_picker = None;
            }
            _ => {}
        }
        Ok(())
    }

    /// Search buffer for whichever list view is active
    fn active_search_mut(&mut self) -> &mut String {
        if self.state.current_view == View::Estimations {
            &mut self.state.estimation_filters.search
        } else {
            &mut self.state.project_filters.search
        }
    }

    async fn reload_current_list(&mut self) {
        match self.state.current_view {
            View::Estimations => self.load_estimations().await,
            _ => self.load_projects().await,
        }
    }

    // Data loading

    async fn load_projects(&mut self) {
        self.state.loading = true;
        let filters = self.state.project_filters.clone();
        match self.api.list_projects(&filters).await {
            Ok(projects) => {
                self.state.projects = projects;
                let total = self.state.projects.len();
                if self.state.selected_record_index(total).is_none() {
                    self.state.reset_selection();
                }
            }
            Err(err) => {
                tracing::warn!("list_projects failed: {err:#}");
                self.state.error_message = Some(format!("Failed to load projects: {err}"));
            }
        }
        self.state.loading = false;
    }

    async fn load_estimations(&mut self) {
        self.state.loading = true;
        let filters = self.state.estimation_filters.clone();
        match self.api.list_estimations(&filters).await {
            Ok(estimations) => {
                self.state.estimations = estimations;
                let total = self.state.estimations.len();
                if self.state.selected_record_index(total).is_none() {
                    self.state.reset_selection();
                }
            }
            Err(err) => {
                tracing::warn!("list_estimations failed: {err:#}");
                self.state.error_message = Some(format!("Failed to load estimations: {err}"));
            }
        }
        self.state.loading = false;
    }

    /// Reload both record sets (dashboard aggregates read from both)
    async fn refresh_all(&mut self) {
        self.load_projects().await;
        self.load_estimations().await;
    }

    fn persist_sort_prefs(&mut self) {
        self.config.project_sort_field = Some(
            match self.state.project_filters.sort_field {
                crate::state::ProjectSortField::CreatedAt => "created",
                crate::state::ProjectSortField::DueDate => "due",
                crate::state::ProjectSortField::Customer => "customer",
                crate::state::ProjectSortField::ProjectName => "name",
                crate::state::ProjectSortField::Status => "status",
            }
            .to_string(),
        );
        self.config.project_sort_direction =
            Some(direction_key(self.state.project_filters.sort_direction).to_string());
        self.config.estimation_sort_field = Some(
            match self.state.estimation_filters.sort_field {
                crate::state::EstimationSortField::CreatedAt => "created",
                crate::state::EstimationSortField::LastModified => "modified",
                crate::state::EstimationSortField::Version => "version",
                crate::state::EstimationSortField::Project => "project",
                crate::state::EstimationSortField::Client => "client",
                crate::state::EstimationSortField::Status => "status",
            }
            .to_string(),
        );
        self.config.estimation_sort_direction =
            Some(direction_key(self.state.estimation_filters.sort_direction).to_string());
        if let Err(err) = self.config.save() {
            tracing::warn!("failed to save config: {err:#}");
        }
    }
}

fn direction_key(direction: crate::state::SortDirection) -> &'static str {
    match direction {
        crate::state::SortDirection::Asc => "asc",
        crate::state::SortDirection::Desc => "desc",
    }
}

/// Cycle the estimation status filter: off, then each status in order
fn next_status_filter(current: Option<EstimationStatus>) -> Option<EstimationStatus> {
    match current {
        None => Some(EstimationStatus::ALL[0]),
        Some(status) => {
            let idx = EstimationStatus::ALL.iter().position(|s| *s == status);
            match idx {
                Some(i) if i + 1 < EstimationStatus::ALL.len() => {
                    Some(EstimationStatus::ALL[i + 1])
                }
                _ => None,
            }
        }
    }
}

/// Five-digit version number for a new estimation, derived from the clock
fn next_version() -> String {
    let millis = Utc::now().timestamp_millis().unsigned_abs();
    format!("{:05}", millis % 100_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockApi, MockApiClient};
    use crate::state::{EstimationFocus, ItemColumn, ProjectSortField, SortDirection};
    use anyhow::anyhow;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// App signed in on the seeded instant mock, parked on the dashboard
    async fn signed_in_app() -> App {
        let mut app = App::new(Box::new(MockApi::instant()));
        if let FormState::Login(form) = &mut app.form {
            for c in "admin@example.com".chars() {
                form.email.push_char(c);
            }
            for c in "secret".chars() {
                form.password.push_char(c);
            }
        }
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app
    }

    #[tokio::test]
    async fn test_login_flow_loads_data() {
        let app = signed_in_app().await;
        assert_eq!(app.state.current_view, View::Dashboard);
        assert!(app.state.session.is_some());
        assert_eq!(app.state.projects.len(), 6);
        assert_eq!(app.state.estimations.len(), 5);
    }

    #[tokio::test]
    async fn test_login_with_blank_fields_shows_error() {
        let mut app = App::new(Box::new(MockApi::instant()));
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.current_view, View::Login);
        assert_eq!(
            app.state.error_message.as_deref(),
            Some("Email is required")
        );
    }

    #[tokio::test]
    async fn test_number_keys_switch_views() {
        let mut app = signed_in_app().await;
        app.handle_key(key(KeyCode::Char('2'))).await.unwrap();
        assert_eq!(app.state.current_view, View::Projects);
        app.handle_key(key(KeyCode::Char('3'))).await.unwrap();
        assert_eq!(app.state.current_view, View::Estimations);
        app.handle_key(key(KeyCode::Char('1'))).await.unwrap();
        assert_eq!(app.state.current_view, View::Dashboard);
    }

    #[tokio::test]
    async fn test_sort_cycle_reloads_list() {
        let mut app = signed_in_app().await;
        app.handle_key(key(KeyCode::Char('2'))).await.unwrap();
        let before = app.state.project_filters.sort_field;
        app.handle_key(key(KeyCode::Char('s'))).await.unwrap();
        assert_eq!(app.state.project_filters.sort_field, before.next());

        app.state.project_filters.sort_field = ProjectSortField::Customer;
        app.state.project_filters.sort_direction = SortDirection::Asc;
        app.handle_key(key(KeyCode::Char('r'))).await.unwrap();
        assert_eq!(app.state.projects[0].customer, "Ella Lewis");
    }

    #[tokio::test]
    async fn test_search_filters_estimations() {
        let mut app = signed_in_app().await;
        app.handle_key(key(KeyCode::Char('3'))).await.unwrap();

        app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
        for c in "rosie".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.estimations.len(), 1);
        assert_eq!(app.state.estimations[0].project, "Rosie Pearson");

        // Esc clears the search and restores the full list
        app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.estimations.len(), 5);
    }

    #[tokio::test]
    async fn test_status_filter_cycles_off_after_all() {
        let mut app = signed_in_app().await;
        app.handle_key(key(KeyCode::Char('3'))).await.unwrap();

        app.handle_key(key(KeyCode::Char('f'))).await.unwrap();
        assert_eq!(
            app.state.estimation_filters.status,
            Some(EstimationStatus::Created)
        );
        assert_eq!(app.state.estimations.len(), 2);

        for _ in 0..4 {
            app.handle_key(key(KeyCode::Char('f'))).await.unwrap();
        }
        assert_eq!(app.state.estimation_filters.status, None);
        assert_eq!(app.state.estimations.len(), 5);
    }

    #[tokio::test]
    async fn test_status_picker_applies_multi_select() {
        let mut app = signed_in_app().await;
        app.handle_key(key(KeyCode::Char('2'))).await.unwrap();

        app.handle_key(key(KeyCode::Char('f'))).await.unwrap();
        assert!(app.state.status_picker.is_some());

        // Check Processing and Completed
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert!(app.state.status_picker.is_none());
        assert_eq!(app.state.projects.len(), 3);
    }

    #[tokio::test]
    async fn test_due_date_filter_round_trip() {
        let mut app = signed_in_app().await;
        app.handle_key(key(KeyCode::Char('2'))).await.unwrap();

        app.handle_key(key(KeyCode::Char('D'))).await.unwrap();
        for c in "2024-02-15".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.projects.len(), 1);
        assert_eq!(app.state.projects[0].customer, "Michael Jones");

        app.handle_key(key(KeyCode::Char('D'))).await.unwrap();
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.projects.len(), 6);
    }

    #[tokio::test]
    async fn test_invalid_due_date_filter_is_rejected() {
        let mut app = signed_in_app().await;
        app.handle_key(key(KeyCode::Char('2'))).await.unwrap();

        app.handle_key(key(KeyCode::Char('D'))).await.unwrap();
        for c in "nope".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.state.error_message.is_some());
        // Still in input mode so the user can correct it
        assert_eq!(app.state.filter_input, FilterInput::DueDate);
    }

    #[tokio::test]
    async fn test_delete_flow_with_confirmation() {
        let mut app = signed_in_app().await;
        app.handle_key(key(KeyCode::Char('2'))).await.unwrap();

        app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
        assert!(app.state.confirm_delete.is_some());

        // 'n' cancels
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        assert!(app.state.confirm_delete.is_none());
        assert_eq!(app.state.projects.len(), 6);

        // 'y' deletes
        app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('y'))).await.unwrap();
        assert_eq!(app.state.projects.len(), 5);
        assert_eq!(app.state.status_message.as_deref(), Some("Project deleted"));
    }

    #[tokio::test]
    async fn test_create_estimation_via_form() {
        let mut app = signed_in_app().await;
        app.handle_key(key(KeyCode::Char('3'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(app.state.current_view, View::EstimationCreate);

        if let FormState::Estimation(form) = &mut app.form {
            for c in "Harbor Upgrade".chars() {
                form.project.push_char(c);
            }
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Title);
        }
        for c in "Dredging".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        if let FormState::Estimation(form) = &mut app.form {
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Quantity);
        }
        for c in "10".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        if let FormState::Estimation(form) = &mut app.form {
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Price);
        }
        for c in "100".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }

        app.handle_key(ctrl('w')).await.unwrap();
        assert_eq!(app.state.current_view, View::Estimations);
        assert_eq!(app.state.estimations.len(), 6);
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("Estimation saved")
        );
        let created = app
            .state
            .estimations
            .iter()
            .find(|e| e.project == "Harbor Upgrade")
            .unwrap();
        assert_eq!(created.sections[0].items[0].total, 1000.0);
    }

    #[tokio::test]
    async fn test_invalid_estimation_form_stays_open() {
        let mut app = signed_in_app().await;
        app.handle_key(key(KeyCode::Char('3'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();

        app.handle_key(ctrl('w')).await.unwrap();
        assert_eq!(app.state.current_view, View::EstimationCreate);
        assert_eq!(
            app.state.error_message.as_deref(),
            Some("Project is required")
        );
        assert_eq!(app.state.estimations.len(), 5);
    }

    #[tokio::test]
    async fn test_edit_estimation_round_trip() {
        let mut app = signed_in_app().await;
        app.handle_key(key(KeyCode::Char('3'))).await.unwrap();

        // Narrow the list to one record with line items, then open it
        app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
        for c in "christine".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.estimations.len(), 1);

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.current_view, View::EstimationEdit);

        let edited_id = match &app.form {
            FormState::Estimation(form) => form.id.clone().unwrap(),
            _ => panic!("estimation form expected"),
        };
        for c in " II".chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
        app.handle_key(ctrl('w')).await.unwrap();
        assert_eq!(app.state.current_view, View::Estimations);

        let edited = app
            .state
            .estimations
            .iter()
            .find(|e| e.id == edited_id)
            .unwrap();
        assert!(edited.project.ends_with(" II"));
    }

    #[tokio::test]
    async fn test_project_form_escape_discards() {
        let mut app = signed_in_app().await;
        app.handle_key(key(KeyCode::Char('2'))).await.unwrap();
        app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
        assert_eq!(app.state.current_view, View::ProjectCreate);

        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.current_view, View::Projects);
        assert!(matches!(app.form, FormState::None));
        assert_eq!(app.state.projects.len(), 6);
    }

    #[tokio::test]
    async fn test_api_failure_surfaces_error_message() {
        let mut mock = MockApiClient::new();
        mock.expect_list_projects()
            .returning(|_| Err(anyhow!("backend offline")));

        let mut app = App::new(Box::new(mock));
        app.state.current_view = View::Projects;
        app.load_projects().await;

        assert!(app
            .state
            .error_message
            .as_deref()
            .unwrap()
            .contains("backend offline"));
        assert!(app.state.projects.is_empty());
    }

    #[tokio::test]
    async fn test_register_then_forgot_password_navigation() {
        let mut app = App::new(Box::new(MockApi::instant()));
        app.handle_key(ctrl('r')).await.unwrap();
        assert_eq!(app.state.current_view, View::Register);
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.current_view, View::Login);

        app.handle_key(ctrl('f')).await.unwrap();
        assert_eq!(app.state.current_view, View::ForgotPassword);
        if let FormState::ForgotPassword(form) = &mut app.form {
            for c in "admin@example.com".chars() {
                form.email.push_char(c);
            }
        }
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.current_view, View::Login);
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("Password reset email sent")
        );
    }

    #[test]
    fn test_next_status_filter_cycles_through_all() {
        let mut current = None;
        let mut seen = 0;
        loop {
            current = next_status_filter(current);
            match current {
                Some(_) => seen += 1,
                None => break,
            }
        }
        assert_eq!(seen, EstimationStatus::ALL.len());
    }

    #[test]
    fn test_next_version_is_five_digits() {
        let version = next_version();
        assert_eq!(version.len(), 5);
        assert!(version.chars().all(|c| c.is_ascii_digit()));
    }
}
