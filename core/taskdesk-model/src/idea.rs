use crate::status::status_impls;
use crate::{overlay, Record, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an idea is on its way to becoming (or not becoming) work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdeaStatus {
    Inbox,
    Exploring,
    Building,
    Paused,
    Shipped,
    Dropped,
}

impl Status for IdeaStatus {
    const ALL: &'static [Self] = &[
        Self::Inbox,
        Self::Exploring,
        Self::Building,
        Self::Paused,
        Self::Shipped,
        Self::Dropped,
    ];
    const KIND: &'static str = "idea";

    fn as_str(&self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Exploring => "exploring",
            Self::Building => "building",
            Self::Paused => "paused",
            Self::Shipped => "shipped",
            Self::Dropped => "dropped",
        }
    }
}

status_impls!(IdeaStatus);

impl IdeaStatus {
    /// Inbox, exploring, building and paused ideas count as active.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Shipped | Self::Dropped)
    }
}

/// An idea as listed by `list_ideas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaRow {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub status: IdeaStatus,
    /// 0 (lowest) to 4 (highest).
    pub priority: i64,
    pub updated_at: DateTime<Utc>,
}

impl Record for IdeaRow {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A single idea as returned by `get_idea`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaDetail {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub status: IdeaStatus,
    pub priority: i64,
    pub effort_pts: i64,
    pub impact_pts: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for IdeaDetail {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for `add_idea`. The backend fills in defaults for absent fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaInput {
    pub project_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IdeaStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_pts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_pts: Option<i64>,
}

/// Partial update for `update_idea`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateIdeaInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IdeaStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_pts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_pts: Option<i64>,
}

impl UpdateIdeaInput {
    pub fn merge(&mut self, newer: Self) {
        overlay(&mut self.title, newer.title);
        overlay(&mut self.summary, newer.summary);
        overlay(&mut self.status, newer.status);
        overlay(&mut self.priority, newer.priority);
        overlay(&mut self.effort_pts, newer.effort_pts);
        overlay(&mut self.impact_pts, newer.impact_pts);
    }
}

/// Input for `create_task_from_idea`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdeaToTaskInput {
    pub idea_id: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_est_at: Option<DateTime<Utc>>,
}
