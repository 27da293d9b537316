use crate::status::status_impls;
use crate::{overlay, Record, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a task is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    Started,
    InProgress,
    StageComplete,
    Completed,
    Dropped,
}

impl Status for TaskStatus {
    const ALL: &'static [Self] = &[
        Self::Todo,
        Self::Started,
        Self::InProgress,
        Self::StageComplete,
        Self::Completed,
        Self::Dropped,
    ];
    const KIND: &'static str = "task";

    fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Started => "started",
            Self::InProgress => "in-progress",
            Self::StageComplete => "stage-complete",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }
}

status_impls!(TaskStatus);

impl TaskStatus {
    /// Whether the task has left the active workflow.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Completed | Self::Dropped)
    }
}

/// A task as listed by `list_tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub current_stage: Option<String>,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_est_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Record for TaskRow {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A single task as returned by `get_task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDetail {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub short_summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub current_stage: Option<String>,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_est_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for TaskDetail {
    fn id(&self) -> &str {
        &self.id
    }
}

impl From<TaskDetail> for TaskRow {
    fn from(d: TaskDetail) -> Self {
        Self {
            id: d.id,
            name: d.name,
            category: d.category,
            status: d.status,
            current_stage: d.current_stage,
            start_at: d.start_at,
            end_est_at: d.end_est_at,
            updated_at: d.updated_at,
        }
    }
}

/// Input for `add_task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_stage: Option<String>,
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_est_at: Option<DateTime<Utc>>,
}

/// Partial update for `update_task`; absent fields are left untouched.
///
/// The target id travels alongside the patch (`{ id, ...patch }`), so the
/// patch itself carries only the edited fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_est_at: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Folds a later patch into this one; fields set in `newer` win.
    pub fn merge(&mut self, newer: Self) {
        overlay(&mut self.name, newer.name);
        overlay(&mut self.category, newer.category);
        overlay(&mut self.short_summary, newer.short_summary);
        overlay(&mut self.description, newer.description);
        overlay(&mut self.status, newer.status);
        overlay(&mut self.current_stage, newer.current_stage);
        overlay(&mut self.start_at, newer.start_at);
        overlay(&mut self.end_est_at, newer.end_est_at);
    }
}

/// Input for `add_reason`: a note explaining a status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReasonInput {
    pub task_id: String,
    pub status: TaskStatus,
    pub note: String,
}
