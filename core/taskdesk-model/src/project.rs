use crate::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project as offered in scope pickers (`list_projects`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub workspace_name: Option<String>,
}

impl Record for ProjectOption {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A workspace as listed by `list_workspaces`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRow {
    pub id: String,
    pub name: String,
    /// `personal`, `work` or `custom`.
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for WorkspaceRow {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for `create_workspace`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWorkspaceInput {
    pub name: String,
    #[serde(default = "default_workspace_kind")]
    pub kind: String,
}

fn default_workspace_kind() -> String {
    "custom".into()
}

/// Input for `create_project`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectInput {
    pub workspace_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `active`, `paused` or `archived`.
    #[serde(default = "default_project_status")]
    pub status: String,
}

fn default_project_status() -> String {
    "active".into()
}

/// One result of `search_docs` or `search_ideas`.
///
/// The backend answers with `[id, title]` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct SearchHit {
    pub id: String,
    pub title: String,
}

impl From<(String, String)> for SearchHit {
    fn from((id, title): (String, String)) -> Self {
        Self { id, title }
    }
}

impl From<SearchHit> for (String, String) {
    fn from(hit: SearchHit) -> Self {
        (hit.id, hit.title)
    }
}
