//! Trait abstraction for the backend API to enable mocking in tests

use crate::state::{Estimation, EstimationFilters, Project, ProjectFilters, Session};
use anyhow::Result;
use async_trait::async_trait;

/// Trait for backend API operations, enabling mocking in tests.
///
/// The only shipping implementation is the in-memory [`crate::api::MockApi`];
/// the app is written against this trait so a real transport could be dropped
/// in behind it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Authenticate and open a session
    async fn login(&mut self, email: &str, password: &str) -> Result<Session>;

    /// Create an account and open a session
    async fn register(&mut self, name: &str, email: &str, password: &str) -> Result<Session>;

    /// Request a password reset; returns the confirmation message
    async fn forgot_password(&mut self, email: &str) -> Result<String>;

    /// List projects matching the filters, sorted
    async fn list_projects(&mut self, filters: &ProjectFilters) -> Result<Vec<Project>>;

    /// Fetch one project by id
    async fn get_project(&mut self, id: &str) -> Result<Option<Project>>;

    /// Create a project; the server assigns id and creation date
    async fn create_project(&mut self, draft: Project) -> Result<Project>;

    /// Replace a project's fields, keeping its id and creation date
    async fn update_project(&mut self, id: &str, patch: Project) -> Result<Project>;

    /// Delete a project by id
    async fn delete_project(&mut self, id: &str) -> Result<()>;

    /// List estimations matching the filters, sorted
    async fn list_estimations(&mut self, filters: &EstimationFilters) -> Result<Vec<Estimation>>;

    /// Fetch one estimation by id
    async fn get_estimation(&mut self, id: &str) -> Result<Option<Estimation>>;

    /// Create an estimation; the server assigns id, creation date, and a
    /// version number when the draft has none
    async fn create_estimation(&mut self, draft: Estimation) -> Result<Estimation>;

    /// Replace an estimation's fields, keeping its id and creation date
    async fn update_estimation(&mut self, id: &str, patch: Estimation) -> Result<Estimation>;

    /// Delete an estimation by id
    async fn delete_estimation(&mut self, id: &str) -> Result<()>;
}
