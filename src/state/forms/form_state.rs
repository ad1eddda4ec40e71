//! Form state management and form structs

use super::field::FormField;
use crate::pricing::{self, Summary};
use crate::state::{Estimation, EstimationStatus, Item, Project, ProjectStatus, Section};
use crate::validate;
use chrono::NaiveDate;
use uuid::Uuid;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Enum representing all possible form states
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    Login(LoginForm),
    Register(RegisterForm),
    ForgotPassword(ForgotPasswordForm),
    Project(Box<ProjectForm>),
    Estimation(Box<EstimationForm>),
}

impl FormState {
    pub fn next_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.next_field(),
            FormState::Register(f) => f.next_field(),
            FormState::ForgotPassword(f) => f.next_field(),
            FormState::Project(f) => f.next_field(),
            FormState::Estimation(f) => f.next_field(),
        }
    }

    pub fn prev_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.prev_field(),
            FormState::Register(f) => f.prev_field(),
            FormState::ForgotPassword(f) => f.prev_field(),
            FormState::Project(f) => f.prev_field(),
            FormState::Estimation(f) => f.prev_field(),
        }
    }

    /// Route a typed character to the focused field
    pub fn input_char(&mut self, c: char) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.get_active_field_mut().push_char(c),
            FormState::Register(f) => f.get_active_field_mut().push_char(c),
            FormState::ForgotPassword(f) => f.get_active_field_mut().push_char(c),
            FormState::Project(f) => {
                if !f.is_status_active() {
                    f.get_active_field_mut().push_char(c);
                }
            }
            FormState::Estimation(f) => f.input_char(c),
        }
    }

    /// Route a backspace to the focused field
    pub fn backspace(&mut self) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.get_active_field_mut().pop_char(),
            FormState::Register(f) => f.get_active_field_mut().pop_char(),
            FormState::ForgotPassword(f) => f.get_active_field_mut().pop_char(),
            FormState::Project(f) => {
                if !f.is_status_active() {
                    f.get_active_field_mut().pop_char();
                }
            }
            FormState::Estimation(f) => f.backspace(),
        }
    }
}

// Login form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: FormField,
    pub password: FormField,
    pub active_field_index: usize,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: FormField::text("email", "Email"),
            password: FormField::password("password", "Password"),
            active_field_index: 0,
        }
    }

    /// Submit-time validation; returns the first problem found
    pub fn validate(&self) -> Option<String> {
        if !validate::validate_required(self.email.as_text()) {
            return Some("Email is required".to_string());
        }
        if !validate::validate_required(self.password.as_text()) {
            return Some("Password is required".to_string());
        }
        None
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for LoginForm {
    fn field_count(&self) -> usize {
        2
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(1);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.email,
            _ => &mut self.password,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.email),
            1 => Some(&self.password),
            _ => None,
        }
    }
}

// Register form
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: FormField,
    pub email: FormField,
    pub password: FormField,
    pub active_field_index: usize,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("name", "Name"),
            email: FormField::text("email", "Email"),
            password: FormField::password("password", "Password"),
            active_field_index: 0,
        }
    }

    pub fn validate(&self) -> Option<String> {
        if !validate::validate_required(self.name.as_text()) {
            return Some("Name is required".to_string());
        }
        if !validate::validate_email(self.email.as_text()) {
            return Some("Enter a valid email address".to_string());
        }
        if !validate::validate_password(self.password.as_text()) {
            return Some("Password must be at least 6 characters".to_string());
        }
        None
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for RegisterForm {
    fn field_count(&self) -> usize {
        3
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(2);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.name,
            1 => &mut self.email,
            _ => &mut self.password,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.email),
            2 => Some(&self.password),
            _ => None,
        }
    }
}

// Forgot password form
#[derive(Debug, Clone)]
pub struct ForgotPasswordForm {
    pub email: FormField,
    pub active_field_index: usize,
}

impl ForgotPasswordForm {
    pub fn new() -> Self {
        Self {
            email: FormField::text("email", "Email"),
            active_field_index: 0,
        }
    }

    pub fn validate(&self) -> Option<String> {
        if !validate::validate_email(self.email.as_text()) {
            return Some("Enter a valid email address".to_string());
        }
        None
    }
}

impl Default for ForgotPasswordForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for ForgotPasswordForm {
    fn field_count(&self) -> usize {
        1
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, _index: usize) {
        self.active_field_index = 0;
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        &mut self.email
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.email),
            _ => None,
        }
    }
}

// Project create/edit form
#[derive(Debug, Clone)]
pub struct ProjectForm {
    pub id: Option<String>,
    pub customer: FormField,
    pub ref_number: FormField,
    pub project_name: FormField,
    pub project_number: FormField,
    pub area_location: FormField,
    pub address: FormField,
    pub due_date: FormField,
    pub contact: FormField,
    pub manager: FormField,
    pub staff: FormField,
    pub email: FormField,
    pub comments: FormField,
    pub status: ProjectStatus,
    pub active_field_index: usize,
}

/// Index of the status selector within the project form's tab order
const PROJECT_STATUS_INDEX: usize = 12;

impl ProjectForm {
    pub fn new() -> Self {
        Self {
            id: None,
            customer: FormField::text("customer", "Customer"),
            ref_number: FormField::text("ref_number", "Reference Number"),
            project_name: FormField::text("project_name", "Project Name"),
            project_number: FormField::text("project_number", "Project Number"),
            area_location: FormField::text("area_location", "Area Location"),
            address: FormField::text("address", "Address"),
            due_date: FormField::text("due_date", "Due Date (YYYY-MM-DD)"),
            contact: FormField::text("contact", "Contact"),
            manager: FormField::text("manager", "Manager"),
            staff: FormField::text("staff", "Staff"),
            email: FormField::text("email", "Email"),
            comments: FormField::text("comments", "Comments"),
            status: ProjectStatus::default(),
            active_field_index: 0,
        }
    }

    pub fn from_project(project: &Project) -> Self {
        Self {
            id: Some(project.id.clone()),
            customer: FormField::text_with_value("customer", "Customer", project.customer.clone()),
            ref_number: FormField::text_with_value(
                "ref_number",
                "Reference Number",
                project.ref_number.clone(),
            ),
            project_name: FormField::text_with_value(
                "project_name",
                "Project Name",
                project.project_name.clone(),
            ),
            project_number: FormField::text_with_value(
                "project_number",
                "Project Number",
                project.project_number.clone(),
            ),
            area_location: FormField::text_with_value(
                "area_location",
                "Area Location",
                project.area_location.clone(),
            ),
            address: FormField::text_with_value("address", "Address", project.address.clone()),
            due_date: FormField::text_with_value(
                "due_date",
                "Due Date (YYYY-MM-DD)",
                project.due_date.to_string(),
            ),
            contact: FormField::text_with_value("contact", "Contact", project.contact.clone()),
            manager: FormField::text_with_value("manager", "Manager", project.manager.clone()),
            staff: FormField::text_with_value("staff", "Staff", project.staff.clone()),
            email: FormField::text_with_value("email", "Email", project.email.clone()),
            comments: FormField::text_with_value("comments", "Comments", project.comments.clone()),
            status: project.status,
            active_field_index: 0,
        }
    }

    /// Whether the status selector row is focused
    pub fn is_status_active(&self) -> bool {
        self.active_field_index == PROJECT_STATUS_INDEX
    }

    pub fn cycle_status(&mut self) {
        self.status = self.status.next();
    }

    /// Submit-time validation; returns all problems found
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !validate::validate_required(self.customer.as_text()) {
            errors.push("Customer is required".to_string());
        }
        if !validate::validate_required(self.ref_number.as_text()) {
            errors.push("Reference number is required".to_string());
        }
        if !validate::validate_required(self.project_name.as_text()) {
            errors.push("Project name is required".to_string());
        }
        if !validate::validate_required(self.project_number.as_text()) {
            errors.push("Project number is required".to_string());
        }
        let due = self.due_date.as_text().trim();
        if !due.is_empty() && NaiveDate::parse_from_str(due, "%Y-%m-%d").is_err() {
            errors.push("Due date must be YYYY-MM-DD".to_string());
        }
        let email = self.email.as_text().trim();
        if !email.is_empty() && !validate::validate_email(email) {
            errors.push("Enter a valid email address".to_string());
        }
        errors
    }

    /// Build the record to send; `today` fills in a blank due date and, for
    /// new records, `created_at`.
    pub fn to_project(&self, today: NaiveDate) -> Project {
        let due_date = NaiveDate::parse_from_str(self.due_date.as_text().trim(), "%Y-%m-%d")
            .unwrap_or(today);
        Project {
            id: self.id.clone().unwrap_or_default(),
            customer: self.customer.as_text().to_string(),
            ref_number: self.ref_number.as_text().to_string(),
            project_name: self.project_name.as_text().to_string(),
            project_number: self.project_number.as_text().to_string(),
            area_location: self.area_location.as_text().to_string(),
            address: self.address.as_text().to_string(),
            status: self.status,
            due_date,
            contact: self.contact.as_text().to_string(),
            manager: self.manager.as_text().to_string(),
            staff: self.staff.as_text().to_string(),
            email: self.email.as_text().to_string(),
            comments: self.comments.as_text().to_string(),
            created_at: today,
        }
    }
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for ProjectForm {
    fn field_count(&self) -> usize {
        13 // 12 text fields + status selector
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(PROJECT_STATUS_INDEX);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.customer,
            1 => &mut self.ref_number,
            2 => &mut self.project_name,
            3 => &mut self.project_number,
            4 => &mut self.area_location,
            5 => &mut self.address,
            6 => &mut self.due_date,
            7 => &mut self.contact,
            8 => &mut self.manager,
            9 => &mut self.staff,
            10 => &mut self.email,
            // Status row has no text field; comments doubles as the dummy
            _ => &mut self.comments,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.customer),
            1 => Some(&self.ref_number),
            2 => Some(&self.project_name),
            3 => Some(&self.project_number),
            4 => Some(&self.area_location),
            5 => Some(&self.address),
            6 => Some(&self.due_date),
            7 => Some(&self.contact),
            8 => Some(&self.manager),
            9 => Some(&self.staff),
            10 => Some(&self.email),
            11 => Some(&self.comments),
            _ => None,
        }
    }
}

/// Editable columns of an estimation line item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemColumn {
    Title,
    Description,
    Unit,
    Quantity,
    Price,
    Margin,
}

impl ItemColumn {
    pub const ALL: [ItemColumn; 6] = [
        ItemColumn::Title,
        ItemColumn::Description,
        ItemColumn::Unit,
        ItemColumn::Quantity,
        ItemColumn::Price,
        ItemColumn::Margin,
    ];

    /// Columns whose edits change the item's computed total
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Quantity | Self::Price | Self::Margin)
    }
}

/// Edit buffers for a single line item
#[derive(Debug, Clone)]
pub struct ItemEdit {
    pub id: String,
    pub title: FormField,
    pub description: FormField,
    pub unit: FormField,
    pub quantity: FormField,
    pub price: FormField,
    pub margin: FormField,
    pub total: f64,
}

impl ItemEdit {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: FormField::text("title", "Item Name"),
            description: FormField::text("description", "Description"),
            unit: FormField::text("unit", "Unit"),
            quantity: FormField::number("quantity", "Quantity"),
            price: FormField::number("price", "Price"),
            margin: FormField::number("margin", "Margin (%)"),
            total: 0.0,
        }
    }

    /// Load buffers from a stored item, recomputing the total rather than
    /// trusting the stored cache.
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            title: FormField::text_with_value("title", "Item Name", item.title.clone()),
            description: FormField::text_with_value(
                "description",
                "Description",
                item.description.clone(),
            ),
            unit: FormField::text_with_value("unit", "Unit", item.unit.clone()),
            quantity: FormField::number_with_value("quantity", "Quantity", item.quantity),
            price: FormField::number_with_value("price", "Price", item.price),
            margin: FormField::number_with_value("margin", "Margin (%)", item.margin),
            total: pricing::item_total(item.quantity, item.price, item.margin),
        }
    }

    pub fn field_mut(&mut self, column: ItemColumn) -> &mut FormField {
        match column {
            ItemColumn::Title => &mut self.title,
            ItemColumn::Description => &mut self.description,
            ItemColumn::Unit => &mut self.unit,
            ItemColumn::Quantity => &mut self.quantity,
            ItemColumn::Price => &mut self.price,
            ItemColumn::Margin => &mut self.margin,
        }
    }

    pub fn field(&self, column: ItemColumn) -> &FormField {
        match column {
            ItemColumn::Title => &self.title,
            ItemColumn::Description => &self.description,
            ItemColumn::Unit => &self.unit,
            ItemColumn::Quantity => &self.quantity,
            ItemColumn::Price => &self.price,
            ItemColumn::Margin => &self.margin,
        }
    }

    /// Refresh the cached total from the current buffers
    pub fn recompute_total(&mut self) {
        self.total = pricing::item_total(
            self.quantity.as_amount(),
            self.price.as_amount(),
            self.margin.as_amount(),
        );
    }

    pub fn to_item(&self) -> Item {
        let quantity = self.quantity.as_amount();
        let price = self.price.as_amount();
        let margin = self.margin.as_amount();
        Item {
            id: self.id.clone(),
            title: self.title.as_text().to_string(),
            description: self.description.as_text().to_string(),
            unit: self.unit.as_text().to_string(),
            quantity,
            price,
            margin,
            total: pricing::item_total(quantity, price, margin),
        }
    }
}

impl Default for ItemEdit {
    fn default() -> Self {
        Self::new()
    }
}

/// Edit buffers for a section and its items
#[derive(Debug, Clone)]
pub struct SectionEdit {
    pub id: String,
    pub name: FormField,
    pub items: Vec<ItemEdit>,
}

impl SectionEdit {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: FormField::text_with_value("name", "Section Name", "Sample Section".to_string()),
            items: vec![ItemEdit::new()],
        }
    }

    pub fn from_section(section: &Section) -> Self {
        let items = if section.items.is_empty() {
            vec![ItemEdit::new()]
        } else {
            section.items.iter().map(ItemEdit::from_item).collect()
        };
        Self {
            id: section.id.clone(),
            name: FormField::text_with_value("name", "Section Name", section.name.clone()),
            items,
        }
    }

    pub fn to_section(&self) -> Section {
        Section {
            id: self.id.clone(),
            name: self.name.as_text().to_string(),
            items: self.items.iter().map(ItemEdit::to_item).collect(),
        }
    }
}

impl Default for SectionEdit {
    fn default() -> Self {
        Self::new()
    }
}

/// Focus position within the estimation form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimationFocus {
    Project,
    Client,
    Status,
    SectionName(usize),
    Item(usize, usize, ItemColumn),
}

// Estimation create/edit form
#[derive(Debug, Clone)]
pub struct EstimationForm {
    pub id: Option<String>,
    pub version: String,
    pub project: FormField,
    pub client: FormField,
    pub status: EstimationStatus,
    pub sections: Vec<SectionEdit>,
    pub focus: EstimationFocus,
    pub errors: Vec<String>,
}

impl EstimationForm {
    pub fn new(version: String) -> Self {
        Self {
            id: None,
            version,
            project: FormField::text("project", "Project"),
            client: FormField::text("client", "Client"),
            status: EstimationStatus::default(),
            sections: vec![SectionEdit::new()],
            focus: EstimationFocus::Project,
            errors: Vec::new(),
        }
    }

    pub fn from_estimation(estimation: &Estimation) -> Self {
        let sections = if estimation.sections.is_empty() {
            vec![SectionEdit::new()]
        } else {
            estimation
                .sections
                .iter()
                .map(SectionEdit::from_section)
                .collect()
        };
        Self {
            id: Some(estimation.id.clone()),
            version: estimation.version.clone(),
            project: FormField::text_with_value("project", "Project", estimation.project.clone()),
            client: FormField::text_with_value("client", "Client", estimation.client.clone()),
            status: estimation.status,
            sections,
            focus: EstimationFocus::Project,
            errors: Vec::new(),
        }
    }

    /// Linear tab order across header, section names, and item cells
    fn positions(&self) -> Vec<EstimationFocus> {
        let mut order = vec![
            EstimationFocus::Project,
            EstimationFocus::Client,
            EstimationFocus::Status,
        ];
        for (s_idx, section) in self.sections.iter().enumerate() {
            order.push(EstimationFocus::SectionName(s_idx));
            for i_idx in 0..section.items.len() {
                for column in ItemColumn::ALL {
                    order.push(EstimationFocus::Item(s_idx, i_idx, column));
                }
            }
        }
        order
    }

    pub fn next_field(&mut self) {
        let order = self.positions();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(current + 1) % order.len()];
    }

    pub fn prev_field(&mut self) {
        let order = self.positions();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(current + order.len() - 1) % order.len()];
    }

    /// The focused text buffer, if the focus is not the status selector
    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        match self.focus {
            EstimationFocus::Project => Some(&mut self.project),
            EstimationFocus::Client => Some(&mut self.client),
            EstimationFocus::Status => None,
            EstimationFocus::SectionName(s) => self.sections.get_mut(s).map(|sec| &mut sec.name),
            EstimationFocus::Item(s, i, column) => self
                .sections
                .get_mut(s)
                .and_then(|sec| sec.items.get_mut(i))
                .map(|item| item.field_mut(column)),
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.focused_field_mut() {
            field.push_char(c);
        }
        self.after_edit();
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.pop_char();
        }
        self.after_edit();
    }

    /// Recompute the focused item's total after a numeric edit
    fn after_edit(&mut self) {
        if let EstimationFocus::Item(s, i, column) = self.focus {
            if column.is_numeric() {
                if let Some(item) = self
                    .sections
                    .get_mut(s)
                    .and_then(|sec| sec.items.get_mut(i))
                {
                    item.recompute_total();
                }
            }
        }
    }

    pub fn cycle_status(&mut self) {
        self.status = self.status.next();
    }

    /// Index of the section the focus is in, if any
    fn focused_section(&self) -> Option<usize> {
        match self.focus {
            EstimationFocus::SectionName(s) | EstimationFocus::Item(s, _, _) => Some(s),
            _ => None,
        }
    }

    /// Append a section after the focused one (or at the end) and focus its name
    pub fn add_section(&mut self) {
        let at = self
            .focused_section()
            .map(|s| s + 1)
            .unwrap_or(self.sections.len());
        self.sections.insert(at, SectionEdit::new());
        self.focus = EstimationFocus::SectionName(at);
    }

    /// Remove the focused section; the last remaining section stays
    pub fn remove_section(&mut self) {
        if self.sections.len() <= 1 {
            return;
        }
        if let Some(s) = self.focused_section() {
            self.sections.remove(s);
            let s = s.min(self.sections.len() - 1);
            self.focus = EstimationFocus::SectionName(s);
        }
    }

    /// Append an item to the focused section and focus its title
    pub fn add_item(&mut self) {
        if let Some(s) = self.focused_section() {
            let section = &mut self.sections[s];
            section.items.push(ItemEdit::new());
            self.focus = EstimationFocus::Item(s, section.items.len() - 1, ItemColumn::Title);
        }
    }

    /// Remove the focused item; each section keeps at least one
    pub fn remove_item(&mut self) {
        if let EstimationFocus::Item(s, i, _) = self.focus {
            let section = &mut self.sections[s];
            if section.items.len() <= 1 {
                return;
            }
            section.items.remove(i);
            let i = i.min(section.items.len() - 1);
            self.focus = EstimationFocus::Item(s, i, ItemColumn::Title);
        }
    }

    /// Sub-total / margin / grand total recomputed from the raw buffers
    pub fn summary(&self) -> Summary {
        let sections: Vec<Section> = self.sections.iter().map(SectionEdit::to_section).collect();
        pricing::summarize(&sections)
    }

    /// Submit-time validation; populates `errors` and reports success
    pub fn validate(&mut self) -> bool {
        let mut errors = Vec::new();
        if !validate::validate_required(self.project.as_text()) {
            errors.push("Project is required".to_string());
        }
        for (s_idx, section) in self.sections.iter().enumerate() {
            if !validate::validate_required(section.name.as_text()) {
                errors.push(format!("Section {} name is required", s_idx + 1));
            }
            for (i_idx, item) in section.items.iter().enumerate() {
                let place = format!("section {}, item {}", s_idx + 1, i_idx + 1);
                if !validate::validate_required(item.title.as_text()) {
                    errors.push(format!("Item name is required ({place})"));
                }
                let quantity = item.quantity.as_text().trim();
                if !quantity.is_empty() && !validate::validate_number(quantity) {
                    errors.push(format!("Quantity must be a valid number ({place})"));
                }
                let price = item.price.as_text().trim();
                if !price.is_empty() && !validate::validate_number(price) {
                    errors.push(format!("Price must be a valid number ({place})"));
                }
                let margin = item.margin.as_text().trim();
                if !margin.is_empty() && !validate::validate_percentage(margin) {
                    errors.push(format!("Margin must be between 0 and 100 ({place})"));
                }
            }
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Build the record to send; item totals are recomputed on the way out
    pub fn to_estimation(&self, today: NaiveDate) -> Estimation {
        Estimation {
            id: self.id.clone().unwrap_or_default(),
            version: self.version.clone(),
            project: self.project.as_text().to_string(),
            client: self.client.as_text().to_string(),
            status: self.status,
            created_at: today,
            last_modified: today,
            sections: self.sections.iter().map(SectionEdit::to_section).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn type_into(form: &mut EstimationForm, text: &str) {
        for c in text.chars() {
            form.input_char(c);
        }
    }

    fn sample_estimation() -> Estimation {
        Estimation {
            id: "e1".to_string(),
            version: "00001".to_string(),
            project: "Christine Brooks".to_string(),
            client: "089 Kutch Green Apt. 448".to_string(),
            status: EstimationStatus::Created,
            created_at: NaiveDate::from_ymd_opt(2019, 9, 4).unwrap(),
            last_modified: NaiveDate::from_ymd_opt(2022, 1, 12).unwrap(),
            sections: vec![Section {
                id: "s1".to_string(),
                name: "Development".to_string(),
                items: vec![Item {
                    id: "i1".to_string(),
                    title: "Frontend Development".to_string(),
                    description: "React application development".to_string(),
                    unit: "hours".to_string(),
                    quantity: 200.0,
                    price: 75.0,
                    margin: 20.0,
                    // Deliberately stale; the form must recompute
                    total: 1.0,
                }],
            }],
        }
    }

    mod login_form {
        use super::*;

        #[test]
        fn test_field_cycle() {
            let mut form = LoginForm::new();
            assert_eq!(form.active_field_index, 0);
            form.next_field();
            assert_eq!(form.active_field_index, 1);
            form.next_field();
            assert_eq!(form.active_field_index, 0);
            form.prev_field();
            assert_eq!(form.active_field_index, 1);
        }

        #[test]
        fn test_validate_requires_both_fields() {
            let mut form = LoginForm::new();
            assert!(form.validate().is_some());
            form.email.push_char('a');
            assert!(form.validate().is_some());
            form.password.push_char('x');
            assert!(form.validate().is_none());
        }

        #[test]
        fn test_password_field_is_masked() {
            let form = LoginForm::new();
            assert!(form.password.masked);
            assert!(!form.email.masked);
        }
    }

    mod register_form {
        use super::*;

        #[test]
        fn test_validate_checks_email_and_password() {
            let mut form = RegisterForm::new();
            for c in "Admin".chars() {
                form.name.push_char(c);
            }
            for c in "bad-email".chars() {
                form.email.push_char(c);
            }
            for c in "secret1".chars() {
                form.password.push_char(c);
            }
            assert_eq!(
                form.validate(),
                Some("Enter a valid email address".to_string())
            );

            form.email.clear();
            for c in "admin@example.com".chars() {
                form.email.push_char(c);
            }
            assert!(form.validate().is_none());

            form.password.clear();
            for c in "abc".chars() {
                form.password.push_char(c);
            }
            assert_eq!(
                form.validate(),
                Some("Password must be at least 6 characters".to_string())
            );
        }
    }

    mod project_form {
        use super::*;

        #[test]
        fn test_required_fields() {
            let form = ProjectForm::new();
            let errors = form.validate();
            assert!(errors.contains(&"Customer is required".to_string()));
            assert!(errors.contains(&"Reference number is required".to_string()));
            assert!(errors.contains(&"Project name is required".to_string()));
            assert!(errors.contains(&"Project number is required".to_string()));
        }

        #[test]
        fn test_due_date_format_checked_when_present() {
            let mut form = ProjectForm::new();
            for c in "tomorrow".chars() {
                form.due_date.push_char(c);
            }
            assert!(form
                .validate()
                .contains(&"Due date must be YYYY-MM-DD".to_string()));

            form.due_date.clear();
            for c in "2024-02-14".chars() {
                form.due_date.push_char(c);
            }
            assert!(!form
                .validate()
                .contains(&"Due date must be YYYY-MM-DD".to_string()));
        }

        #[test]
        fn test_status_row_cycles_instead_of_typing() {
            let mut form = ProjectForm::new();
            form.set_active_field(PROJECT_STATUS_INDEX);
            assert!(form.is_status_active());
            form.cycle_status();
            assert_eq!(form.status, ProjectStatus::Completed);
        }

        #[test]
        fn test_to_project_parses_due_date() {
            let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
            let mut form = ProjectForm::new();
            for c in "2024-06-30".chars() {
                form.due_date.push_char(c);
            }
            let project = form.to_project(today);
            assert_eq!(
                project.due_date,
                NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
            );
            assert_eq!(project.created_at, today);

            // Blank due date falls back to today
            let project = ProjectForm::new().to_project(today);
            assert_eq!(project.due_date, today);
        }

        #[test]
        fn test_from_project_round_trips_fields() {
            let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
            let mut form = ProjectForm::new();
            for c in "Olivia Martin".chars() {
                form.customer.push_char(c);
            }
            form.status = ProjectStatus::OnHold;
            let project = form.to_project(today);

            let reloaded = ProjectForm::from_project(&project);
            assert_eq!(reloaded.customer.as_text(), "Olivia Martin");
            assert_eq!(reloaded.status, ProjectStatus::OnHold);
            assert_eq!(reloaded.due_date.as_text(), today.to_string());
        }
    }

    mod estimation_form {
        use super::*;

        #[test]
        fn test_new_form_has_one_section_with_one_item() {
            let form = EstimationForm::new("00042".to_string());
            assert_eq!(form.sections.len(), 1);
            assert_eq!(form.sections[0].items.len(), 1);
            assert_eq!(form.sections[0].name.as_text(), "Sample Section");
            assert_eq!(form.focus, EstimationFocus::Project);
        }

        #[test]
        fn test_tab_order_walks_header_then_cells() {
            let mut form = EstimationForm::new("00042".to_string());
            form.next_field();
            assert_eq!(form.focus, EstimationFocus::Client);
            form.next_field();
            assert_eq!(form.focus, EstimationFocus::Status);
            form.next_field();
            assert_eq!(form.focus, EstimationFocus::SectionName(0));
            form.next_field();
            assert_eq!(form.focus, EstimationFocus::Item(0, 0, ItemColumn::Title));

            // Wraps from the last item cell back to the header
            for _ in 0..6 {
                form.next_field();
            }
            assert_eq!(form.focus, EstimationFocus::Project);
            form.prev_field();
            assert_eq!(form.focus, EstimationFocus::Item(0, 0, ItemColumn::Margin));
        }

        #[test]
        fn test_numeric_edit_recomputes_item_total() {
            let mut form = EstimationForm::new("00042".to_string());
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Quantity);
            type_into(&mut form, "200");
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Price);
            type_into(&mut form, "75");
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Margin);
            type_into(&mut form, "20");
            assert_eq!(form.sections[0].items[0].total, 18000.0);

            form.backspace(); // margin becomes "2"
            assert_eq!(form.sections[0].items[0].total, 15300.0);
        }

        #[test]
        fn test_text_edit_does_not_touch_total() {
            let mut form = EstimationForm::new("00042".to_string());
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Quantity);
            type_into(&mut form, "2");
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Price);
            type_into(&mut form, "50");
            let total = form.sections[0].items[0].total;

            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Title);
            type_into(&mut form, "Cabling");
            assert_eq!(form.sections[0].items[0].total, total);
        }

        #[test]
        fn test_add_and_remove_section() {
            let mut form = EstimationForm::new("00042".to_string());
            form.focus = EstimationFocus::SectionName(0);
            form.add_section();
            assert_eq!(form.sections.len(), 2);
            assert_eq!(form.focus, EstimationFocus::SectionName(1));

            form.remove_section();
            assert_eq!(form.sections.len(), 1);
            assert_eq!(form.focus, EstimationFocus::SectionName(0));

            // The last section cannot be removed
            form.remove_section();
            assert_eq!(form.sections.len(), 1);
        }

        #[test]
        fn test_add_and_remove_item() {
            let mut form = EstimationForm::new("00042".to_string());
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Unit);
            form.add_item();
            assert_eq!(form.sections[0].items.len(), 2);
            assert_eq!(form.focus, EstimationFocus::Item(0, 1, ItemColumn::Title));

            form.remove_item();
            assert_eq!(form.sections[0].items.len(), 1);

            // The last item in a section cannot be removed
            form.remove_item();
            assert_eq!(form.sections[0].items.len(), 1);
        }

        #[test]
        fn test_summary_recomputes_from_raw_buffers() {
            let mut form = EstimationForm::new("00042".to_string());
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Quantity);
            type_into(&mut form, "200");
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Price);
            type_into(&mut form, "75");
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Margin);
            type_into(&mut form, "20");

            // Corrupt the cached total; the summary must not notice
            form.sections[0].items[0].total = -1.0;

            let summary = form.summary();
            assert_eq!(summary.sub_total, 15000.0);
            assert_eq!(summary.margin_total, 3000.0);
            assert_eq!(summary.grand_total, 18000.0);
        }

        #[test]
        fn test_validate_collects_errors() {
            let mut form = EstimationForm::new("00042".to_string());
            form.sections[0].name.clear();
            assert!(!form.validate());
            assert!(form.errors.contains(&"Project is required".to_string()));
            assert!(form
                .errors
                .contains(&"Section 1 name is required".to_string()));
            assert!(form
                .errors
                .iter()
                .any(|e| e.starts_with("Item name is required")));
        }

        #[test]
        fn test_validate_margin_range() {
            let mut form = EstimationForm::new("00042".to_string());
            type_into(&mut form, "Rewire"); // project (focus starts there)
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Title);
            type_into(&mut form, "Panel");
            form.focus = EstimationFocus::Item(0, 0, ItemColumn::Margin);
            type_into(&mut form, "150");
            assert!(!form.validate());
            assert!(form
                .errors
                .iter()
                .any(|e| e.starts_with("Margin must be between 0 and 100")));
        }

        #[test]
        fn test_from_estimation_recomputes_stale_totals() {
            let form = EstimationForm::from_estimation(&sample_estimation());
            assert_eq!(form.sections[0].items[0].total, 18000.0);
            assert_eq!(form.version, "00001");
            assert_eq!(form.id.as_deref(), Some("e1"));
        }

        #[test]
        fn test_from_estimation_with_no_sections_gets_a_blank_one() {
            let mut estimation = sample_estimation();
            estimation.sections.clear();
            let form = EstimationForm::from_estimation(&estimation);
            assert_eq!(form.sections.len(), 1);
            assert_eq!(form.sections[0].items.len(), 1);
        }

        #[test]
        fn test_to_estimation_stamps_last_modified() {
            let today = NaiveDate::from_ymd_opt(2024, 7, 29).unwrap();
            let mut form = EstimationForm::from_estimation(&sample_estimation());
            type_into(&mut form, " Jr"); // appends to project field
            let out = form.to_estimation(today);
            assert_eq!(out.project, "Christine Brooks Jr");
            assert_eq!(out.last_modified, today);
            assert_eq!(out.sections[0].items[0].total, 18000.0);
        }
    }
}
