//! Record dump inspection for the `taskdesk` binary.
//!
//! Loads the JSON a list command returns, pushes it through a
//! [`RecordView`] with the built-in column presets and renders one page as
//! a plain-text table.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::Value;
use std::path::Path;
use taskdesk_model::{DocRow, IdeaRow, TaskRow};
use taskdesk_view::{presets, ColumnDescriptor, RecordView, SortDirection, ViewConfig};
use tracing::debug;

/// Which list a dump came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Tasks,
    Ideas,
    Docs,
}

/// View settings requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub search: Option<String>,
    /// `(column_id, input)` pairs, applied in order.
    pub filters: Vec<(String, String)>,
    pub sort: Option<String>,
    pub descending: bool,
    /// 1-based, as shown in the footer.
    pub page: usize,
    pub page_size: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search: None,
            filters: Vec::new(),
            sort: None,
            descending: false,
            page: 1,
            page_size: ViewConfig::default().default_page_size,
        }
    }
}

/// Parses `column=value` for `--filter`.
pub fn parse_filter_arg(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected column=value, got '{arg}'")),
    }
}

/// Reads a dump from disk and renders it.
pub fn render_file(path: &Path, kind: RecordKind, query: &Query) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    render_json(&raw, kind, query)
}

/// Renders a JSON array of rows of the given kind.
///
/// A dump wrapped as `{ "rows": [...] }` is accepted too.
pub fn render_json(raw: &str, kind: RecordKind, query: &Query) -> Result<String> {
    let mut value: Value = serde_json::from_str(raw).context("dump is not valid JSON")?;
    if let Some(rows) = value.get_mut("rows") {
        value = rows.take();
    }

    match kind {
        RecordKind::Tasks => {
            let rows: Vec<TaskRow> = serde_json::from_value(value).context("failed to parse tasks")?;
            render_rows(rows, presets::task_columns(), query)
        }
        RecordKind::Ideas => {
            let rows: Vec<IdeaRow> = serde_json::from_value(value).context("failed to parse ideas")?;
            render_rows(rows, presets::idea_columns(), query)
        }
        RecordKind::Docs => {
            let rows: Vec<DocRow> = serde_json::from_value(value).context("failed to parse docs")?;
            render_rows(rows, presets::doc_columns(), query)
        }
    }
}

fn render_rows<T>(rows: Vec<T>, columns: Vec<ColumnDescriptor<T>>, query: &Query) -> Result<String> {
    debug!(rows = rows.len(), "loaded dump");
    let config = ViewConfig {
        default_page_size: query.page_size,
    };
    let mut view = RecordView::with_config(rows, columns, config).context("invalid view setup")?;

    for (column, input) in &query.filters {
        view.set_column_filter_text(column, input)
            .with_context(|| format!("cannot filter on '{column}'"))?;
    }
    if let Some(search) = &query.search {
        view.set_global_filter(search.as_str());
    }
    if let Some(column) = &query.sort {
        let direction = if query.descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        view.set_sort_direction(column, Some(direction))
            .with_context(|| format!("cannot sort by '{column}'"))?;
    }
    view.go_to_page(query.page.saturating_sub(1));

    Ok(render_projection(&view))
}

/// Renders the current page as an aligned table with a page footer.
pub fn render_projection<T>(view: &RecordView<T>) -> String {
    let projection = view.projection();
    let columns = view.columns();

    let header: Vec<String> = columns.iter().map(|c| c.header().to_string()).collect();
    let cells: Vec<Vec<String>> = projection
        .page_rows
        .iter()
        .map(|row| columns.iter().map(|c| c.display(row)).collect())
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    if cells.is_empty() {
        out.push_str("(no matching rows)\n");
    }
    out.push_str(&format!(
        "Page {} of {} ({} matching)\n",
        projection.page_index + 1,
        projection.page_count,
        projection.total_matching
    ));
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
