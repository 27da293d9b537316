//! Column sets for the built-in list screens.

use crate::column::ColumnDescriptor;
use crate::value::CellValue;
use taskdesk_model::{DocRow, DocStatus, IdeaRow, IdeaStatus, Status, TaskRow, TaskStatus};

/// Columns of the task list: name, category, status, stage and dates.
pub fn task_columns() -> Vec<ColumnDescriptor<TaskRow>> {
    vec![
        ColumnDescriptor::text("name", |t: &TaskRow| CellValue::text(t.name.as_str()))
            .with_header("Name"),
        ColumnDescriptor::text("category", |t: &TaskRow| CellValue::text(t.category.as_str()))
            .with_header("Category"),
        ColumnDescriptor::enumeration("status", TaskStatus::options(), |t: &TaskRow| {
            CellValue::enumeration(t.status.as_str())
        })
        .with_header("Status"),
        ColumnDescriptor::text("current_stage", |t: &TaskRow| {
            CellValue::opt_text(t.current_stage.as_deref())
        })
        .with_header("Current Stage"),
        ColumnDescriptor::datetime("start_at", |t: &TaskRow| CellValue::opt_datetime(t.start_at))
            .with_header("Start"),
        ColumnDescriptor::datetime("end_est_at", |t: &TaskRow| {
            CellValue::opt_datetime(t.end_est_at)
        })
        .with_header("End (est)"),
        ColumnDescriptor::datetime("updated_at", |t: &TaskRow| CellValue::DateTime(t.updated_at))
            .with_header("Updated"),
    ]
}

/// Columns of the idea list.
pub fn idea_columns() -> Vec<ColumnDescriptor<IdeaRow>> {
    vec![
        ColumnDescriptor::text("title", |i: &IdeaRow| CellValue::text(i.title.as_str()))
            .with_header("Title"),
        ColumnDescriptor::enumeration("status", IdeaStatus::options(), |i: &IdeaRow| {
            CellValue::enumeration(i.status.as_str())
        })
        .with_header("Status"),
        ColumnDescriptor::number("priority", |i: &IdeaRow| CellValue::from(i.priority))
            .with_header("Priority"),
        ColumnDescriptor::datetime("updated_at", |i: &IdeaRow| CellValue::DateTime(i.updated_at))
            .with_header("Updated"),
    ]
}

/// Columns of the doc list.
pub fn doc_columns() -> Vec<ColumnDescriptor<DocRow>> {
    vec![
        ColumnDescriptor::text("title", |d: &DocRow| CellValue::text(d.title.as_str()))
            .with_header("Title"),
        ColumnDescriptor::text("slug", |d: &DocRow| CellValue::opt_text(d.slug.as_deref()))
            .with_header("Slug"),
        ColumnDescriptor::enumeration("status", DocStatus::options(), |d: &DocRow| {
            CellValue::enumeration(d.status.as_str())
        })
        .with_header("Status"),
        ColumnDescriptor::datetime("updated_at", |d: &DocRow| CellValue::DateTime(d.updated_at))
            .with_header("Updated"),
    ]
}
