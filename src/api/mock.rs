//! In-memory mock backend with simulated request latency
//!
//! There is no server; records live in a [`Store`] owned by the client and
//! survive only for the process lifetime. Reads and writes clone values in
//! and out so callers never alias the stored data.

use crate::api::ApiClient;
use crate::state::{
    Estimation, EstimationFilters, EstimationSortField, Item, Project, ProjectFilters,
    ProjectSortField, ProjectStatus, Section, Session, SortDirection,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::cmp::Ordering;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Simulated latency for list/create/update calls
const LIST_DELAY: Duration = Duration::from_millis(500);
/// Simulated latency for lookup/delete calls
const LOOKUP_DELAY: Duration = Duration::from_millis(300);

/// Typed failures surfaced by the mock API
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error("estimation not found: {0}")]
    EstimationNotFound(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email not found")]
    EmailNotFound,
}

/// The fake database: plain vectors, owned by the client
#[derive(Debug, Default)]
struct Store {
    projects: Vec<Project>,
    estimations: Vec<Estimation>,
}

/// In-memory implementation of [`ApiClient`]
pub struct MockApi {
    store: Store,
    list_delay: Duration,
    lookup_delay: Duration,
}

impl MockApi {
    /// Seeded store with production-like latency
    pub fn new() -> Self {
        Self {
            store: seed_store(),
            list_delay: LIST_DELAY,
            lookup_delay: LOOKUP_DELAY,
        }
    }

    /// Seeded store with zero latency, for tests
    pub fn instant() -> Self {
        Self {
            store: seed_store(),
            list_delay: Duration::ZERO,
            lookup_delay: Duration::ZERO,
        }
    }

    /// Empty store with zero latency, for tests
    pub fn empty() -> Self {
        Self {
            store: Store::default(),
            list_delay: Duration::ZERO,
            lookup_delay: Duration::ZERO,
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiClient for MockApi {
    async fn login(&mut self, email: &str, password: &str) -> Result<Session> {
        tokio::time::sleep(self.list_delay).await;
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::InvalidCredentials.into());
        }
        tracing::info!(email, "login");
        Ok(Session {
            user_id: "1".to_string(),
            name: "Admin User".to_string(),
            email: email.to_string(),
            token: format!("mock-token-{}", Uuid::new_v4()),
        })
    }

    async fn register(&mut self, name: &str, email: &str, _password: &str) -> Result<Session> {
        tokio::time::sleep(self.list_delay).await;
        tracing::info!(email, "register");
        Ok(Session {
            user_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            token: format!("mock-token-{}", Uuid::new_v4()),
        })
    }

    async fn forgot_password(&mut self, email: &str) -> Result<String> {
        tokio::time::sleep(self.list_delay).await;
        if email.is_empty() {
            return Err(ApiError::EmailNotFound.into());
        }
        Ok("Password reset email sent".to_string())
    }

    async fn list_projects(&mut self, filters: &ProjectFilters) -> Result<Vec<Project>> {
        tokio::time::sleep(self.list_delay).await;
        let mut filtered: Vec<Project> = self
            .store
            .projects
            .iter()
            .filter(|p| project_matches(p, filters))
            .cloned()
            .collect();
        sort_projects(&mut filtered, filters.sort_field, filters.sort_direction);
        tracing::debug!(count = filtered.len(), "list_projects");
        Ok(filtered)
    }

    async fn get_project(&mut self, id: &str) -> Result<Option<Project>> {
        tokio::time::sleep(self.lookup_delay).await;
        Ok(self.store.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn create_project(&mut self, draft: Project) -> Result<Project> {
        tokio::time::sleep(self.list_delay).await;
        let project = Project {
            id: Uuid::new_v4().to_string(),
            created_at: Self::today(),
            ..draft
        };
        self.store.projects.push(project.clone());
        tracing::info!(id = %project.id, "create_project");
        Ok(project)
    }

    async fn update_project(&mut self, id: &str, patch: Project) -> Result<Project> {
        tokio::time::sleep(self.list_delay).await;
        let existing = self
            .store
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::ProjectNotFound(id.to_string()))?;
        let updated = Project {
            id: existing.id.clone(),
            created_at: existing.created_at,
            ..patch
        };
        *existing = updated.clone();
        tracing::info!(id, "update_project");
        Ok(updated)
    }

    async fn delete_project(&mut self, id: &str) -> Result<()> {
        tokio::time::sleep(self.lookup_delay).await;
        let before = self.store.projects.len();
        self.store.projects.retain(|p| p.id != id);
        if self.store.projects.len() == before {
            return Err(ApiError::ProjectNotFound(id.to_string()).into());
        }
        tracing::info!(id, "delete_project");
        Ok(())
    }

    async fn list_estimations(&mut self, filters: &EstimationFilters) -> Result<Vec<Estimation>> {
        tokio::time::sleep(self.list_delay).await;
        let mut filtered: Vec<Estimation> = self
            .store
            .estimations
            .iter()
            .filter(|e| estimation_matches(e, filters))
            .cloned()
            .collect();
        sort_estimations(&mut filtered, filters.sort_field, filters.sort_direction);
        tracing::debug!(count = filtered.len(), "list_estimations");
        Ok(filtered)
    }

    async fn get_estimation(&mut self, id: &str) -> Result<Option<Estimation>> {
        tokio::time::sleep(self.lookup_delay).await;
        Ok(self.store.estimations.iter().find(|e| e.id == id).cloned())
    }

    async fn create_estimation(&mut self, draft: Estimation) -> Result<Estimation> {
        tokio::time::sleep(self.list_delay).await;
        let version = if draft.version.is_empty() {
            format!("{:05}", self.store.estimations.len() + 1)
        } else {
            draft.version.clone()
        };
        let estimation = Estimation {
            id: Uuid::new_v4().to_string(),
            version,
            created_at: Self::today(),
            ..draft
        };
        self.store.estimations.push(estimation.clone());
        tracing::info!(id = %estimation.id, version = %estimation.version, "create_estimation");
        Ok(estimation)
    }

    async fn update_estimation(&mut self, id: &str, patch: Estimation) -> Result<Estimation> {
        tokio::time::sleep(self.list_delay).await;
        let existing = self
            .store
            .estimations
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ApiError::EstimationNotFound(id.to_string()))?;
        let updated = Estimation {
            id: existing.id.clone(),
            created_at: existing.created_at,
            ..patch
        };
        *existing = updated.clone();
        tracing::info!(id, "update_estimation");
        Ok(updated)
    }

    async fn delete_estimation(&mut self, id: &str) -> Result<()> {
        tokio::time::sleep(self.lookup_delay).await;
        let before = self.store.estimations.len();
        self.store.estimations.retain(|e| e.id != id);
        if self.store.estimations.len() == before {
            return Err(ApiError::EstimationNotFound(id.to_string()).into());
        }
        tracing::info!(id, "delete_estimation");
        Ok(())
    }
}

fn project_matches(project: &Project, filters: &ProjectFilters) -> bool {
    if !filters.search.is_empty() {
        let needle = filters.search.to_lowercase();
        let hit = project.customer.to_lowercase().contains(&needle)
            || project.project_name.to_lowercase().contains(&needle)
            || project.ref_number.to_lowercase().contains(&needle)
            || project.project_number.to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }
    if !filters.statuses.is_empty() && !filters.statuses.contains(&project.status) {
        return false;
    }
    if let Some(due) = filters.due_date {
        if project.due_date != due {
            return false;
        }
    }
    true
}

fn estimation_matches(estimation: &Estimation, filters: &EstimationFilters) -> bool {
    if !filters.search.is_empty() {
        let needle = filters.search.to_lowercase();
        let hit = estimation.project.to_lowercase().contains(&needle)
            || estimation.client.to_lowercase().contains(&needle)
            || estimation.version.to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }
    if let Some(status) = filters.status {
        if estimation.status != status {
            return false;
        }
    }
    true
}

fn sort_projects(projects: &mut [Project], field: ProjectSortField, direction: SortDirection) {
    projects.sort_by(|a, b| {
        let cmp = match field {
            ProjectSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            ProjectSortField::DueDate => a.due_date.cmp(&b.due_date),
            ProjectSortField::Customer => compare_text(&a.customer, &b.customer),
            ProjectSortField::ProjectName => compare_text(&a.project_name, &b.project_name),
            ProjectSortField::Status => a.status.label().cmp(b.status.label()),
        };
        apply_direction(cmp, direction)
    });
}

fn sort_estimations(
    estimations: &mut [Estimation],
    field: EstimationSortField,
    direction: SortDirection,
) {
    estimations.sort_by(|a, b| {
        let cmp = match field {
            EstimationSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            EstimationSortField::LastModified => a.last_modified.cmp(&b.last_modified),
            EstimationSortField::Version => a.version.cmp(&b.version),
            EstimationSortField::Project => compare_text(&a.project, &b.project),
            EstimationSortField::Client => compare_text(&a.client, &b.client),
            EstimationSortField::Status => a.status.label().cmp(b.status.label()),
        };
        apply_direction(cmp, direction)
    });
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn apply_direction(cmp: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => cmp,
        SortDirection::Desc => cmp.reverse(),
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// Representative records so the lists and dashboard render non-empty
fn seed_store() -> Store {
    let projects = vec![
        Project {
            id: "1".to_string(),
            customer: "Olivia Martin".to_string(),
            ref_number: "89PQRS6789T1U2V3".to_string(),
            project_name: "Sarah Williams".to_string(),
            project_number: "PQRST9012R".to_string(),
            area_location: "Telangana".to_string(),
            address: "Mumbai, Maharastra".to_string(),
            status: ProjectStatus::Processing,
            due_date: date(2024, 2, 14),
            contact: "Sarah Williams".to_string(),
            manager: String::new(),
            staff: String::new(),
            email: String::new(),
            comments: "Initial project setup".to_string(),
            created_at: date(2024, 1, 10),
        },
        Project {
            id: "2".to_string(),
            customer: "Michael Jones".to_string(),
            ref_number: "67KLMN2345P6Q7R8".to_string(),
            project_name: "Robert Johnson".to_string(),
            project_number: "ABCDE1234F".to_string(),
            area_location: "Uttar Pradesh".to_string(),
            address: "Bhiwani, Haryana".to_string(),
            status: ProjectStatus::Completed,
            due_date: date(2024, 2, 15),
            contact: "Robert Johnson".to_string(),
            manager: String::new(),
            staff: String::new(),
            email: String::new(),
            comments: "Project completed successfully".to_string(),
            created_at: date(2024, 1, 20),
        },
        Project {
            id: "3".to_string(),
            customer: "John Doe".to_string(),
            ref_number: "23PQRS54567T8U9V1".to_string(),
            project_name: "Isabella Anderson".to_string(),
            project_number: "XYZAB6789C".to_string(),
            area_location: "Delhi".to_string(),
            address: "Avadi, Tamil Nadu".to_string(),
            status: ProjectStatus::OnHold,
            due_date: date(2024, 2, 16),
            contact: "Isabella Anderson".to_string(),
            manager: String::new(),
            staff: String::new(),
            email: String::new(),
            comments: "Waiting for approval".to_string(),
            created_at: date(2023, 10, 25),
        },
        Project {
            id: "4".to_string(),
            customer: "Ella Lewis".to_string(),
            ref_number: "78STUV2345W6X7YB".to_string(),
            project_name: "Christopher White".to_string(),
            project_number: "PQRST9012R".to_string(),
            area_location: "Karnataka".to_string(),
            address: "North Dum Dum, West Bengal".to_string(),
            status: ProjectStatus::InTransit,
            due_date: date(2024, 2, 17),
            contact: "Christopher White".to_string(),
            manager: String::new(),
            staff: String::new(),
            email: String::new(),
            comments: "In progress".to_string(),
            created_at: date(2024, 1, 5),
        },
        Project {
            id: "5".to_string(),
            customer: "James Rodriguez".to_string(),
            ref_number: "45KLMN8901P2Q3R4".to_string(),
            project_name: "Jane Smith".to_string(),
            project_number: "RSTUV90128".to_string(),
            area_location: "Andhra Pradesh".to_string(),
            address: "Anantapur, Andhra Pradesh".to_string(),
            status: ProjectStatus::Completed,
            due_date: date(2024, 2, 18),
            contact: "Jane Smith".to_string(),
            manager: String::new(),
            staff: String::new(),
            email: String::new(),
            comments: "Delivered".to_string(),
            created_at: date(2024, 1, 15),
        },
        Project {
            id: "6".to_string(),
            customer: "Sarah Williams".to_string(),
            ref_number: "89KLMN6789P1Q2R3".to_string(),
            project_name: "John Doe".to_string(),
            project_number: "VWXYZ2345X".to_string(),
            area_location: "West Bengal".to_string(),
            address: "Vadodara, Gujarat".to_string(),
            status: ProjectStatus::Rejected,
            due_date: date(2024, 2, 20),
            contact: "John Doe".to_string(),
            manager: String::new(),
            staff: String::new(),
            email: String::new(),
            comments: "Requirements not met".to_string(),
            created_at: date(2024, 1, 8),
        },
    ];

    let estimations = vec![
        Estimation {
            id: "1".to_string(),
            version: "00001".to_string(),
            project: "Christine Brooks".to_string(),
            client: "089 Kutch Green Apt. 448".to_string(),
            status: crate::state::EstimationStatus::Created,
            created_at: date(2019, 9, 4),
            last_modified: date(2022, 1, 12),
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
                    total: 18000.0,
                }],
            }],
        },
        Estimation {
            id: "2".to_string(),
            version: "00002".to_string(),
            project: "Rosie Pearson".to_string(),
            client: "979 Immanuel Ferry Suite 526".to_string(),
            status: crate::state::EstimationStatus::Processing,
            created_at: date(2019, 5, 28),
            last_modified: date(2024, 7, 29),
            sections: vec![Section {
                id: "s1".to_string(),
                name: "Design".to_string(),
                items: vec![Item {
                    id: "i1".to_string(),
                    title: "UI/UX Design".to_string(),
                    description: "Complete design system".to_string(),
                    unit: "hours".to_string(),
                    quantity: 80.0,
                    price: 100.0,
                    margin: 15.0,
                    total: 9200.0,
                }],
            }],
        },
        Estimation {
            id: "3".to_string(),
            version: "00003".to_string(),
            project: "Darrell Caldwell".to_string(),
            client: "8587 Frida Ports".to_string(),
            status: crate::state::EstimationStatus::Rejected,
            created_at: date(2019, 11, 23),
            last_modified: date(2022, 3, 16),
            sections: vec![],
        },
        Estimation {
            id: "4".to_string(),
            version: "00004".to_string(),
            project: "Gilbert Johnston".to_string(),
            client: "768 Destiny Lake Suite 600".to_string(),
            status: crate::state::EstimationStatus::Created,
            created_at: date(2019, 2, 5),
            last_modified: date(2021, 12, 10),
            sections: vec![],
        },
        Estimation {
            id: "5".to_string(),
            version: "00005".to_string(),
            project: "Alan Cain".to_string(),
            client: "042 Mylene Throughway".to_string(),
            status: crate::state::EstimationStatus::OnHold,
            created_at: date(2019, 7, 29),
            last_modified: date(2022, 3, 21),
            sections: vec![],
        },
    ];

    Store {
        projects,
        estimations,
    }
}
