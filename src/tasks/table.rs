//! Markdown table tasks.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::{Task, TaskStatus};

const TASK_HEADERS: &[&str] = &["task", "title", "description", "item"];
const STATUS_HEADERS: &[&str] = &["status", "state", "progress"];
const PRIORITY_HEADERS: &[&str] = &["priority", "importance"];

/// A parsed table row: trimmed cell texts plus the 1-based line it starts on.
#[derive(Debug, Default)]
struct Row {
    cells: Vec<String>,
    line: usize,
}

/// Extracts tasks from every markdown table in `content`.
///
/// The first row of each table is its header. Tables with fewer than two
/// rows contribute nothing.
#[must_use]
pub fn parse_table_tasks(content: &str, file_path: Option<&str>) -> Vec<Task> {
    collect_tables(content)
        .iter()
        .flat_map(|rows| tasks_from_table(rows, file_path))
        .collect()
}

fn collect_tables(content: &str) -> Vec<Vec<Row>> {
    let mut tables = Vec::new();
    let mut rows: Vec<Row> = Vec::new();
    let mut row: Option<Row> = None;
    let mut cell: Option<String> = None;

    for (event, range) in Parser::new_ext(content, Options::ENABLE_TABLES).into_offset_iter() {
        match event {
            Event::Start(Tag::Table(_)) => rows.clear(),
            Event::Start(Tag::TableHead | Tag::TableRow) => {
                row = Some(Row { cells: Vec::new(), line: line_at(content, range.start) });
            }
            Event::Start(Tag::TableCell) => cell = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(cell) = cell.as_mut() {
                    cell.push_str(&text);
                }
            }
            Event::End(TagEnd::TableCell) => {
                if let (Some(row), Some(text)) = (row.as_mut(), cell.take()) {
                    row.cells.push(text.trim().to_string());
                }
            }
            Event::End(TagEnd::TableHead | TagEnd::TableRow) => {
                if let Some(row) = row.take().filter(|r| !r.cells.is_empty()) {
                    rows.push(row);
                }
            }
            Event::End(TagEnd::Table) => tables.push(std::mem::take(&mut rows)),
            _ => {}
        }
    }
    tables
}

fn line_at(content: &str, offset: usize) -> usize {
    content.get(..offset).map_or(0, |prefix| prefix.matches('\n').count()) + 1
}

/// Index of the first header cell containing any of `names`
/// (case-insensitive substring match).
fn find_column(header: &[String], names: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let cell = cell.to_lowercase();
        names.iter().any(|name| cell.contains(name))
    })
}

fn tasks_from_table(rows: &[Row], file_path: Option<&str>) -> Vec<Task> {
    let Some((header, body)) = rows.split_first() else {
        return Vec::new();
    };
    if body.is_empty() {
        return Vec::new();
    }

    let task_col = find_column(&header.cells, TASK_HEADERS).unwrap_or(0);
    let status_col = find_column(&header.cells, STATUS_HEADERS).unwrap_or(0);
    // unlike task and status, a missing priority column stays absent
    let priority_col = find_column(&header.cells, PRIORITY_HEADERS);
    let widest = task_col.max(status_col).max(priority_col.unwrap_or(0));

    body.iter()
        .filter(|row| row.cells.len() > widest)
        .filter(|row| !row.cells[task_col].is_empty())
        .map(|row| Task {
            title: row.cells[task_col].clone(),
            status: map_status_text(&row.cells[status_col]),
            file_path: file_path.map(str::to_string),
            line_number: Some(row.line),
            priority: priority_col
                .map(|col| row.cells[col].clone())
                .filter(|p| !p.is_empty()),
            description: None,
        })
        .collect()
}

/// Maps free-text status vocabulary onto [`TaskStatus`].
///
/// Unknown text maps to [`TaskStatus::Todo`].
#[must_use]
pub fn map_status_text(text: &str) -> TaskStatus {
    match text.trim().to_lowercase().as_str() {
        "done" | "completed" | "finished" | "complete" => TaskStatus::Done,
        "doing" | "in progress" | "working" => TaskStatus::Doing,
        "blocked" | "stuck" | "waiting" => TaskStatus::Blocked,
        _ => TaskStatus::Todo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_columns_are_located_by_name() {
        let content = "\
| Task | Status | Priority |
|------|--------|----------|
| Deploy | In Progress | High |
";
        let tasks = parse_table_tasks(content, Some("plan.md"));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Deploy");
        assert_eq!(tasks[0].status, TaskStatus::Doing);
        assert_eq!(tasks[0].priority.as_deref(), Some("High"));
        assert_eq!(tasks[0].line_number, Some(3));
        assert_eq!(tasks[0].file_path.as_deref(), Some("plan.md"));
    }

    #[test]
    fn columns_may_appear_in_any_order() {
        let content = "\
Intro paragraph.

| Owner | State | Work Item |
|-------|-------|-----------|
| ana | completed | Setup project |
| bo | working | Implement API |
| cy | not started | Write tests |
";
        let tasks = parse_table_tasks(content, None);
        let got: Vec<(&str, TaskStatus)> =
            tasks.iter().map(|t| (t.title.as_str(), t.status)).collect();
        assert_eq!(
            got,
            vec![
                ("Setup project", TaskStatus::Done),
                ("Implement API", TaskStatus::Doing),
                ("Write tests", TaskStatus::Todo),
            ]
        );
        assert!(tasks.iter().all(|t| t.priority.is_none()));
    }

    #[test]
    fn short_and_empty_rows_are_skipped() {
        let content = "\
| Priority | Status | Task |
|---|---|---|
| low | done |  |
| high | stuck | Ship it |
";
        let tasks = parse_table_tasks(content, None);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Ship it");
        assert_eq!(tasks[0].status, TaskStatus::Blocked);
        assert_eq!(tasks[0].priority.as_deref(), Some("high"));
    }

    #[test]
    fn no_priority_column_means_no_priority() {
        // the task cell is not reused as a priority
        let content = "| Task | Status |\n|---|---|\n| high | done |\n| Deploy | todo |\n";
        let tasks = parse_table_tasks(content, None);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "high");
        assert!(tasks.iter().all(|t| t.priority.is_none()));
    }

    #[test]
    fn header_only_table_yields_nothing() {
        let content = "| Task | Status |\n|---|---|\n";
        assert!(parse_table_tasks(content, None).is_empty());
    }

    #[test]
    fn pipes_without_delimiter_row_are_not_a_table() {
        let content = "| Task | Status |\n| Deploy | done |\n";
        assert!(parse_table_tasks(content, None).is_empty());
    }

    #[test]
    fn inline_formatting_is_flattened() {
        let content = "| Task | Status |\n|---|---|\n| Run `cargo test` | **Done** |\n";
        let tasks = parse_table_tasks(content, None);
        assert_eq!(tasks[0].title, "Run cargo test");
        assert_eq!(tasks[0].status, TaskStatus::Done);
    }

    #[test]
    fn multiple_tables_are_all_read() {
        let content = "\
| Task | Status |
|---|---|
| One | done |

Text between.

| Task | Status |
|---|---|
| Two | waiting |
";
        let tasks = parse_table_tasks(content, None);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].title, "Two");
        assert_eq!(tasks[1].status, TaskStatus::Blocked);
        assert_eq!(tasks[1].line_number, Some(9));
    }

    #[test]
    fn status_vocabulary() {
        assert_eq!(map_status_text("Finished"), TaskStatus::Done);
        assert_eq!(map_status_text(" Complete "), TaskStatus::Done);
        assert_eq!(map_status_text("pending"), TaskStatus::Todo);
        assert_eq!(map_status_text("DOING"), TaskStatus::Doing);
        assert_eq!(map_status_text("Waiting"), TaskStatus::Blocked);
        assert_eq!(map_status_text("almost there"), TaskStatus::Todo);
        assert_eq!(map_status_text(""), TaskStatus::Todo);
    }
}
