use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use taskdesk_model::{Record, TaskRow, TaskStatus};
use taskdesk_view::presets::task_columns;
use taskdesk_view::{
    CellValue, ColumnDescriptor, FilterValue, RecordView, SortDirection, SortSpec, ViewConfig,
    ViewError,
};

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: String,
    status: String,
    score: Option<f64>,
}

impl Record for Row {
    fn id(&self) -> &str {
        &self.id
    }
}

fn row(id: &str, status: &str, score: Option<f64>) -> Row {
    Row {
        id: id.into(),
        status: status.into(),
        score,
    }
}

fn columns() -> Vec<ColumnDescriptor<Row>> {
    vec![
        ColumnDescriptor::text("id", |r: &Row| CellValue::text(r.id.as_str())),
        ColumnDescriptor::enumeration(
            "status",
            vec!["todo".into(), "done".into()],
            |r: &Row| CellValue::enumeration(r.status.as_str()),
        ),
        ColumnDescriptor::number("score", |r: &Row| {
            r.score.map_or(CellValue::Missing, CellValue::Number)
        }),
    ]
}

fn ids<T: Record>(rows: &[&T]) -> Vec<String> {
    rows.iter().map(|r| r.id().to_string()).collect()
}

fn sample() -> Vec<Row> {
    vec![
        row("a", "todo", Some(3.0)),
        row("b", "done", Some(1.0)),
        row("c", "todo", None),
    ]
}

fn numbered(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| row(&format!("r{i:02}"), if i % 2 == 0 { "todo" } else { "done" }, Some(i as f64)))
        .collect()
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn new_view_has_default_state() {
    let view = RecordView::new(sample(), columns()).unwrap();
    let state = view.state();

    assert!(state.sort().is_none());
    assert!(!state.is_filtered());
    assert_eq!(state.page().index, 0);
    assert_eq!(state.page().size, 10);
}

#[test]
fn duplicate_column_ids_are_rejected() {
    let mut cols = columns();
    cols.push(ColumnDescriptor::text("status", |r: &Row| CellValue::text(r.status.as_str())));

    let err = RecordView::new(sample(), cols).unwrap_err();
    assert_eq!(err, ViewError::DuplicateColumn("status".into()));
}

#[test]
fn zero_default_page_size_is_rejected() {
    let err = RecordView::with_config(sample(), columns(), ViewConfig { default_page_size: 0 })
        .unwrap_err();
    assert_eq!(err, ViewError::ZeroPageSize);
}

// ── Filtering ────────────────────────────────────────────────────

#[test]
fn status_filter_keeps_source_order() {
    let mut view = RecordView::new(sample(), columns()).unwrap();
    view.set_column_filter("status", FilterValue::exact("todo")).unwrap();

    let p = view.projection();
    assert_eq!(ids(&p.page_rows), vec!["a", "c"]);
    assert_eq!(p.total_matching, 2);
    assert_eq!(p.page_count, 1);
}

#[test]
fn column_filters_combine_with_and() {
    let mut view = RecordView::new(sample(), columns()).unwrap();
    view.set_column_filter("status", FilterValue::exact("todo")).unwrap();
    view.set_column_filter("score", FilterValue::predicate(|v| matches!(v, CellValue::Number(n) if *n > 2.0)))
        .unwrap();

    assert_eq!(ids(&view.projection().page_rows), vec!["a"]);
}

#[test]
fn text_filter_input_on_enum_column_matches_exactly() {
    let rows = vec![row("x", "todo", None), row("y", "todos", None)];
    let cols = vec![ColumnDescriptor::enumeration(
        "status",
        vec!["todo".into(), "todos".into()],
        |r: &Row| CellValue::enumeration(r.status.as_str()),
    )];
    let mut view = RecordView::new(rows, cols).unwrap();
    view.set_column_filter_text("status", "TODO").unwrap();

    assert_eq!(ids(&view.projection().page_rows), vec!["x"]);
}

#[test]
fn global_filter_matches_any_filterable_column() {
    let mut view = RecordView::new(sample(), columns()).unwrap();
    view.set_global_filter("DON");
    assert_eq!(ids(&view.projection().page_rows), vec!["b"]);

    view.set_global_filter("3");
    assert_eq!(ids(&view.projection().page_rows), vec!["a"]);
}

#[test]
fn global_filter_skips_non_filterable_columns() {
    let cols = vec![
        ColumnDescriptor::text("id", |r: &Row| CellValue::text(r.id.as_str())).with_filterable(false),
        ColumnDescriptor::text("status", |r: &Row| CellValue::text(r.status.as_str())),
    ];
    let mut view = RecordView::new(sample(), cols).unwrap();
    view.set_global_filter("a");

    assert_eq!(view.total_matching(), 0);
}

#[test]
fn blank_global_filter_clears() {
    let mut view = RecordView::new(sample(), columns()).unwrap();
    view.set_global_filter("todo");
    assert_eq!(view.total_matching(), 2);
    view.set_global_filter("   ");
    assert_eq!(view.state().global_filter(), None);
    assert_eq!(view.total_matching(), 3);
}

#[test]
fn filter_on_unknown_or_locked_column_fails() {
    let cols = vec![
        ColumnDescriptor::text("id", |r: &Row| CellValue::text(r.id.as_str())).with_filterable(false),
    ];
    let mut view = RecordView::new(sample(), cols).unwrap();

    assert_eq!(
        view.set_column_filter("nope", FilterValue::text("x")),
        Err(ViewError::UnknownColumn("nope".into()))
    );
    assert_eq!(
        view.set_column_filter("id", FilterValue::text("x")),
        Err(ViewError::NotFilterable("id".into()))
    );
}

#[test]
fn clear_filter_and_clear_filters() {
    let mut view = RecordView::new(sample(), columns()).unwrap();
    view.set_column_filter("status", FilterValue::exact("done")).unwrap();
    view.set_global_filter("b");
    assert_eq!(view.total_matching(), 1);

    view.clear_filter("status").unwrap();
    assert!(view.state().filter("status").is_none());
    assert_eq!(view.total_matching(), 1);

    view.clear_filters();
    assert!(!view.state().is_filtered());
    assert_eq!(view.total_matching(), 3);
}

// ── Sorting ──────────────────────────────────────────────────────

#[test]
fn sort_toggles_through_three_states() {
    let mut view = RecordView::new(sample(), columns()).unwrap();

    view.set_sort("score").unwrap();
    assert_eq!(view.state().sort(), Some(&SortSpec::asc("score")));
    assert_eq!(ids(&view.projection().page_rows), vec!["b", "a", "c"]);

    view.set_sort("score").unwrap();
    assert_eq!(view.state().sort(), Some(&SortSpec::desc("score")));
    assert_eq!(ids(&view.projection().page_rows), vec!["a", "b", "c"]);

    view.set_sort("score").unwrap();
    assert_eq!(view.state().sort(), None);
    assert_eq!(ids(&view.projection().page_rows), vec!["a", "b", "c"]);
}

#[test]
fn switching_sort_column_starts_ascending() {
    let mut view = RecordView::new(sample(), columns()).unwrap();
    view.set_sort("score").unwrap();
    view.set_sort("score").unwrap();
    view.set_sort("status").unwrap();

    assert_eq!(view.state().sort(), Some(&SortSpec::asc("status")));
    assert_eq!(ids(&view.projection().page_rows), vec!["b", "a", "c"]);
}

#[test]
fn missing_values_sort_last_descending_too() {
    let mut view = RecordView::new(sample(), columns()).unwrap();
    view.set_sort_direction("score", Some(SortDirection::Desc)).unwrap();

    let p = view.projection();
    assert_eq!(p.page_rows.last().map(|r| r.id.as_str()), Some("c"));
}

#[test]
fn unsortable_column_rejects_sort() {
    let cols = vec![ColumnDescriptor::text("id", |r: &Row| CellValue::text(r.id.as_str())).with_sortable(false)];
    let mut view = RecordView::new(sample(), cols).unwrap();
    assert_eq!(view.set_sort("id"), Err(ViewError::NotSortable("id".into())));
}

// ── Paging ───────────────────────────────────────────────────────

#[test]
fn paging_walks_forward_and_back() {
    let mut view = RecordView::new(numbered(25), columns()).unwrap();

    let p = view.projection();
    assert_eq!(p.page_count, 3);
    assert!(!p.can_prev);
    assert!(p.can_next);

    assert!(view.next_page());
    assert!(view.next_page());
    assert!(!view.next_page());
    let p = view.projection();
    assert_eq!(p.page_index, 2);
    assert_eq!(p.page_rows.len(), 5);
    assert!(!p.can_next);

    assert!(view.prev_page());
    assert_eq!(view.state().page().index, 1);
}

#[test]
fn go_to_page_clamps() {
    let mut view = RecordView::new(numbered(25), columns()).unwrap();
    view.go_to_page(99);
    assert_eq!(view.state().page().index, 2);
}

#[test]
fn filter_shrink_clamps_to_last_page() {
    let mut view = RecordView::new(numbered(40), columns()).unwrap();
    view.go_to_page(3);
    assert_eq!(view.state().page().index, 3);

    // 20 "todo" rows → 2 pages; page 3 no longer exists.
    view.set_column_filter_text("status", "todo").unwrap();
    let p = view.projection();
    assert_eq!(p.total_matching, 20);
    assert_eq!(p.page_index, 1);
    assert_eq!(p.page_rows.len(), 10);
}

#[test]
fn empty_result_stays_on_page_zero() {
    let mut view = RecordView::new(numbered(30), columns()).unwrap();
    view.go_to_page(2);
    view.set_global_filter("no such row");

    let p = view.projection();
    assert_eq!(p.page_index, 0);
    assert_eq!(p.page_count, 1);
    assert!(p.page_rows.is_empty());
}

#[test]
fn set_page_size_resets_to_first_page() {
    let mut view = RecordView::new(numbered(30), columns()).unwrap();
    view.go_to_page(2);
    view.set_page_size(4).unwrap();

    let p = view.projection();
    assert_eq!(p.page_index, 0);
    assert_eq!(p.page_count, 8);
    assert_eq!(view.set_page_size(0), Err(ViewError::ZeroPageSize));
}

// ── Source data ──────────────────────────────────────────────────

#[test]
fn set_records_rederives_and_clamps() {
    let mut view = RecordView::new(numbered(30), columns()).unwrap();
    view.go_to_page(2);
    view.set_records(numbered(12));

    let p = view.projection();
    assert_eq!(p.page_index, 1);
    assert_eq!(p.total_matching, 12);
}

#[test]
fn upsert_replaces_by_id_and_refilters() {
    let mut view = RecordView::new(sample(), columns()).unwrap();
    view.set_column_filter("status", FilterValue::exact("todo")).unwrap();

    view.upsert_record(row("a", "done", Some(3.0)));
    assert_eq!(ids(&view.projection().page_rows), vec!["c"]);
    assert_eq!(view.records().len(), 3);

    view.upsert_record(row("d", "todo", None));
    assert_eq!(ids(&view.projection().page_rows), vec!["c", "d"]);
}

#[test]
fn remove_record_by_id() {
    let mut view = RecordView::new(sample(), columns()).unwrap();
    assert!(view.remove_record("b"));
    assert!(!view.remove_record("b"));
    assert!(view.find("b").is_none());
    assert_eq!(view.total_matching(), 2);
}

#[test]
fn raw_json_records_can_be_viewed() {
    let rows = vec![
        json!({"id": "a", "status": "todo"}),
        json!({"id": "b", "status": "done"}),
        json!({"id": "c", "status": "todo"}),
    ];
    let cols = vec![ColumnDescriptor::text("status", |v: &serde_json::Value| {
        CellValue::from_json(&v["status"])
    })];
    let mut view = RecordView::new(rows, cols).unwrap();
    view.set_column_filter_text("status", "todo").unwrap();

    assert_eq!(ids(&view.projection().page_rows), vec!["a", "c"]);
}

// ── Presets ──────────────────────────────────────────────────────

fn task(id: &str, name: &str, status: TaskStatus, day: u32) -> TaskRow {
    TaskRow {
        id: id.into(),
        name: name.into(),
        category: "work".into(),
        status,
        current_stage: None,
        start_at: None,
        end_est_at: None,
        updated_at: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
    }
}

#[test]
fn task_preset_sorts_by_updated_and_filters_status() {
    let tasks = vec![
        task("t1", "Plan", TaskStatus::Todo, 3),
        task("t2", "Build", TaskStatus::InProgress, 1),
        task("t3", "Ship", TaskStatus::Todo, 2),
    ];
    let mut view = RecordView::new(tasks, task_columns()).unwrap();
    view.set_sort("updated_at").unwrap();
    assert_eq!(ids(&view.projection().page_rows), vec!["t2", "t3", "t1"]);

    view.set_column_filter_text("status", "todo").unwrap();
    assert_eq!(ids(&view.projection().page_rows), vec!["t3", "t1"]);
}

#[test]
fn task_preset_formats_missing_dates() {
    let view = RecordView::new(vec![task("t1", "Plan", TaskStatus::Todo, 3)], task_columns()).unwrap();
    let start = view.column("start_at").unwrap();
    let updated = view.column("updated_at").unwrap();

    assert_eq!(start.header(), "Start");
    assert_eq!(start.display(&view.records()[0]), "—");
    assert_eq!(updated.display(&view.records()[0]), "2024-03-03 09:00");
}

#[test]
fn date_filters_match_the_displayed_timestamp() {
    let mut late = task("t2", "Build", TaskStatus::Todo, 1);
    late.updated_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
    let tasks = vec![task("t1", "Plan", TaskStatus::Todo, 3), late];
    let mut view = RecordView::new(tasks, task_columns()).unwrap();

    view.set_column_filter_text("updated_at", "2024-05-01 12:30").unwrap();
    assert_eq!(ids(&view.projection().page_rows), vec!["t2"]);

    view.clear_filters();
    view.set_global_filter("2024-05-01 12:30");
    assert_eq!(ids(&view.projection().page_rows), vec!["t2"]);

    view.set_global_filter("T12:30:00Z");
    assert_eq!(view.total_matching(), 0, "stored form is not searchable");
}
