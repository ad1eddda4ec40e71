//! Configuration handling for the TUI

use crate::state::{EstimationSortField, ProjectSortField, SortDirection};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Project list sort field
    pub project_sort_field: Option<String>,
    /// Project list sort direction
    pub project_sort_direction: Option<String>,
    /// Estimation list sort field
    pub estimation_sort_field: Option<String>,
    /// Estimation list sort direction
    pub estimation_sort_direction: Option<String>,
    /// Rows per list page
    pub page_size: Option<usize>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "estima", "estima-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    pub fn project_sort(&self) -> Option<(ProjectSortField, SortDirection)> {
        let field = match self.project_sort_field.as_deref()? {
            "created" => ProjectSortField::CreatedAt,
            "due" => ProjectSortField::DueDate,
            "customer" => ProjectSortField::Customer,
            "name" => ProjectSortField::ProjectName,
            "status" => ProjectSortField::Status,
            _ => return None,
        };
        Some((field, parse_direction(self.project_sort_direction.as_deref())))
    }

    pub fn estimation_sort(&self) -> Option<(EstimationSortField, SortDirection)> {
        let field = match self.estimation_sort_field.as_deref()? {
            "created" => EstimationSortField::CreatedAt,
            "modified" => EstimationSortField::LastModified,
            "version" => EstimationSortField::Version,
            "project" => EstimationSortField::Project,
            "client" => EstimationSortField::Client,
            "status" => EstimationSortField::Status,
            _ => return None,
        };
        Some((
            field,
            parse_direction(self.estimation_sort_direction.as_deref()),
        ))
    }
}

fn parse_direction(value: Option<&str>) -> SortDirection {
    match value {
        Some("asc") => SortDirection::Asc,
        _ => SortDirection::Desc,
    }
}
