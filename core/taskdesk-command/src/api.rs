//! Typed wrappers over the backend's record commands.

use crate::backend::CommandBackend;
use crate::error::{CommandError, CommandResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use taskdesk_model::{
    CreateProjectInput, CreateWorkspaceInput, DocDetail, DocInput, DocRow, IdeaDetail, IdeaInput,
    IdeaRow, IdeaToTaskInput, ProjectOption, SearchHit, TaskDetail, TaskInput, TaskPatch,
    TaskReasonInput, TaskRow, TaskStatus, UpdateDocBodyInput, UpdateDocMetaInput, UpdateIdeaInput,
    WorkspaceRow,
};
use tracing::debug;

/// Command names understood by the backend.
pub mod commands {
    pub const LIST_TASKS: &str = "list_tasks";
    pub const GET_TASK: &str = "get_task";
    pub const ADD_TASK: &str = "add_task";
    pub const UPDATE_TASK: &str = "update_task";
    pub const SET_TASK_STATUS: &str = "set_task_status";
    pub const ADD_REASON: &str = "add_reason";
    pub const LIST_IDEAS: &str = "list_ideas";
    pub const GET_IDEA: &str = "get_idea";
    pub const ADD_IDEA: &str = "add_idea";
    pub const UPDATE_IDEA: &str = "update_idea";
    pub const CREATE_TASK_FROM_IDEA: &str = "create_task_from_idea";
    pub const SEARCH_IDEAS: &str = "search_ideas";
    pub const LIST_DOCS: &str = "list_docs";
    pub const GET_DOC: &str = "get_doc";
    pub const ADD_DOC: &str = "add_doc";
    pub const UPDATE_DOC_BODY: &str = "update_doc_body";
    pub const UPDATE_DOC_META: &str = "update_doc_meta";
    pub const SEARCH_DOCS: &str = "search_docs";
    pub const LIST_WORKSPACES: &str = "list_workspaces";
    pub const CREATE_WORKSPACE: &str = "create_workspace";
    pub const LIST_PROJECTS: &str = "list_projects";
    pub const CREATE_PROJECT: &str = "create_project";
    pub const COUNT_TASKS_BY_PROJECT: &str = "count_tasks_by_project";
    pub const COUNT_IDEAS_BY_PROJECT: &str = "count_ideas_by_project";
    pub const COUNT_DOCS_BY_PROJECT: &str = "count_docs_by_project";
}

/// Builds `{ "id": id, ...payload }`.
///
/// `payload` must serialize to a JSON object; an `id` inside it is
/// overwritten so the target can never be redirected by the payload.
pub fn with_id<P: Serialize + ?Sized>(id: &str, payload: &P) -> CommandResult<Value> {
    match serde_json::to_value(payload)? {
        Value::Object(mut fields) => {
            fields.insert("id".into(), Value::String(id.to_string()));
            Ok(Value::Object(fields))
        }
        Value::Null => {
            let mut fields = Map::new();
            fields.insert("id".into(), Value::String(id.to_string()));
            Ok(Value::Object(fields))
        }
        other => Err(CommandError::InvalidPayload(format!(
            "expected an object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Typed client for the Taskdesk backend, one method per command in
/// [`commands`].
#[derive(Debug, Clone)]
pub struct Api<B> {
    backend: B,
}

impl<B: CommandBackend> Api<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Invokes `command` and decodes its reply.
    pub async fn call<R: DeserializeOwned>(&self, command: &str, args: Value) -> CommandResult<R> {
        debug!(command, "invoking command");
        let reply = self.backend.invoke(command, args).await?;
        Ok(serde_json::from_value(reply)?)
    }

    /// Invokes `command` and ignores its reply.
    async fn call_unit(&self, command: &str, args: Value) -> CommandResult<()> {
        debug!(command, "invoking command");
        self.backend.invoke(command, args).await.map(|_| ())
    }

    // ── Tasks ────────────────────────────────────────────────────

    pub async fn list_tasks(&self) -> CommandResult<Vec<TaskRow>> {
        self.call(commands::LIST_TASKS, json!({})).await
    }

    pub async fn get_task(&self, id: &str) -> CommandResult<TaskDetail> {
        self.call(commands::GET_TASK, json!({ "id": id })).await
    }

    /// Creates a task and returns its id.
    pub async fn add_task(&self, input: &TaskInput) -> CommandResult<String> {
        self.call(commands::ADD_TASK, json!({ "input": input })).await
    }

    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> CommandResult<()> {
        let input = with_id(id, patch)?;
        self.call_unit(commands::UPDATE_TASK, json!({ "input": input })).await
    }

    pub async fn set_task_status(&self, id: &str, status: TaskStatus) -> CommandResult<()> {
        self.call_unit(commands::SET_TASK_STATUS, json!({ "id": id, "status": status }))
            .await
    }

    pub async fn add_reason(&self, input: &TaskReasonInput) -> CommandResult<()> {
        self.call_unit(commands::ADD_REASON, json!({ "input": input })).await
    }

    // ── Ideas ────────────────────────────────────────────────────

    pub async fn list_ideas(&self, project_id: &str) -> CommandResult<Vec<IdeaRow>> {
        self.call(commands::LIST_IDEAS, json!({ "projectId": project_id }))
            .await
    }

    pub async fn get_idea(&self, id: &str) -> CommandResult<IdeaDetail> {
        self.call(commands::GET_IDEA, json!({ "id": id })).await
    }

    /// Creates an idea and returns its id.
    pub async fn add_idea(&self, input: &IdeaInput) -> CommandResult<String> {
        self.call(commands::ADD_IDEA, json!({ "input": input })).await
    }

    pub async fn update_idea(&self, id: &str, patch: &UpdateIdeaInput) -> CommandResult<()> {
        let input = with_id(id, patch)?;
        self.call_unit(commands::UPDATE_IDEA, json!({ "input": input })).await
    }

    /// Promotes an idea to a task and returns the new task's id.
    pub async fn create_task_from_idea(&self, input: &IdeaToTaskInput) -> CommandResult<String> {
        self.call(commands::CREATE_TASK_FROM_IDEA, json!({ "input": input }))
            .await
    }

    /// Title search over ideas, optionally within one project.
    pub async fn search_ideas(&self, query: &str, project_id: Option<&str>) -> CommandResult<Vec<SearchHit>> {
        self.call(commands::SEARCH_IDEAS, search_args(query, project_id)).await
    }

    // ── Docs ─────────────────────────────────────────────────────

    pub async fn list_docs(&self, project_id: &str) -> CommandResult<Vec<DocRow>> {
        self.call(commands::LIST_DOCS, json!({ "projectId": project_id }))
            .await
    }

    pub async fn get_doc(&self, id: &str) -> CommandResult<DocDetail> {
        self.call(commands::GET_DOC, json!({ "id": id })).await
    }

    /// Creates a doc and returns its id.
    pub async fn add_doc(&self, input: &DocInput) -> CommandResult<String> {
        self.call(commands::ADD_DOC, json!({ "input": input })).await
    }

    pub async fn update_doc_body(&self, id: &str, body_md: &str) -> CommandResult<()> {
        let input = UpdateDocBodyInput {
            id: id.to_string(),
            body_md: body_md.to_string(),
        };
        self.call_unit(commands::UPDATE_DOC_BODY, json!({ "input": input }))
            .await
    }

    pub async fn update_doc_meta(&self, input: &UpdateDocMetaInput) -> CommandResult<()> {
        self.call_unit(commands::UPDATE_DOC_META, json!({ "input": input }))
            .await
    }

    /// Title search over docs, optionally within one project.
    pub async fn search_docs(&self, query: &str, project_id: Option<&str>) -> CommandResult<Vec<SearchHit>> {
        self.call(commands::SEARCH_DOCS, search_args(query, project_id)).await
    }

    // ── Workspaces and projects ──────────────────────────────────

    pub async fn list_workspaces(&self) -> CommandResult<Vec<WorkspaceRow>> {
        self.call(commands::LIST_WORKSPACES, json!({})).await
    }

    /// Creates a workspace and returns its id.
    pub async fn create_workspace(&self, input: &CreateWorkspaceInput) -> CommandResult<String> {
        self.call(commands::CREATE_WORKSPACE, json!({ "input": input }))
            .await
    }

    pub async fn list_projects(&self, workspace_id: Option<&str>) -> CommandResult<Vec<ProjectOption>> {
        self.call(commands::LIST_PROJECTS, json!({ "workspaceId": workspace_id }))
            .await
    }

    /// Creates a project and returns its id.
    pub async fn create_project(&self, input: &CreateProjectInput) -> CommandResult<String> {
        self.call(commands::CREATE_PROJECT, json!({ "input": input }))
            .await
    }

    // ── Counts ───────────────────────────────────────────────────

    pub async fn count_tasks_by_project(&self, project_id: &str) -> CommandResult<i64> {
        self.count(commands::COUNT_TASKS_BY_PROJECT, project_id).await
    }

    pub async fn count_ideas_by_project(&self, project_id: &str) -> CommandResult<i64> {
        self.count(commands::COUNT_IDEAS_BY_PROJECT, project_id).await
    }

    pub async fn count_docs_by_project(&self, project_id: &str) -> CommandResult<i64> {
        self.count(commands::COUNT_DOCS_BY_PROJECT, project_id).await
    }

    async fn count(&self, command: &str, project_id: &str) -> CommandResult<i64> {
        self.call(command, json!({ "projectId": project_id })).await
    }
}

fn search_args(query: &str, project_id: Option<&str>) -> Value {
    json!({ "q": query, "projectId": project_id })
}
