use crate::status::status_impls;
use crate::{overlay, Record, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state of a doc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    Draft,
    InReview,
    Published,
}

impl Status for DocStatus {
    const ALL: &'static [Self] = &[Self::Draft, Self::InReview, Self::Published];
    const KIND: &'static str = "doc";

    fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InReview => "in_review",
            Self::Published => "published",
        }
    }
}

status_impls!(DocStatus);

/// A doc as listed by `list_docs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocRow {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub status: DocStatus,
    pub updated_at: DateTime<Utc>,
}

impl Record for DocRow {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A single doc as returned by `get_doc`, body included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocDetail {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub body_md: String,
    #[serde(default)]
    pub body_html: String,
    #[serde(default)]
    pub cover_path: Option<String>,
    pub status: DocStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for DocDetail {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for `add_doc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocInput {
    pub project_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub body_md: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DocStatus>,
}

/// Input for `update_doc_body`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDocBodyInput {
    pub id: String,
    pub body_md: String,
}

/// Input for `update_doc_meta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDocMetaInput {
    pub id: String,
    #[serde(flatten)]
    pub patch: DocMetaPatch,
}

/// Metadata fields of a doc; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocMetaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DocStatus>,
}

impl DocMetaPatch {
    /// Folds a later patch into this one; fields set in `newer` win.
    pub fn merge(&mut self, newer: Self) {
        overlay(&mut self.title, newer.title);
        overlay(&mut self.slug, newer.slug);
        overlay(&mut self.cover_path, newer.cover_path);
        overlay(&mut self.status, newer.status);
    }
}
