//! Checkbox list items: `- [ ]`, `- [x]`, `- [~]`, `- [!]` and friends.

use std::sync::LazyLock;

use regex::Regex;

use super::{Task, TaskStatus};

static CHECKBOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \[([ xX~!-])\] (.+)").expect("checkbox pattern"));

/// Priority tag forms, tried in order: `[high]`, `(high)`, `#high`.
static PRIORITY_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    const LEVELS: &str = "high|medium|low|urgent|critical";
    [
        Regex::new(&format!(r"(?i)\[({LEVELS})\]")).expect("bracket priority pattern"),
        Regex::new(&format!(r"(?i)\(({LEVELS})\)")).expect("paren priority pattern"),
        Regex::new(&format!(r"(?i)#({LEVELS})")).expect("hash priority pattern"),
    ]
});

static COLON_DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^:]+:\s*(.+)").expect("colon description pattern"));
static DASH_DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^-]+-\s*(.+)").expect("dash description pattern"));

fn marker_status(marker: &str) -> Option<TaskStatus> {
    match marker {
        " " => Some(TaskStatus::Todo),
        "x" | "X" => Some(TaskStatus::Done),
        "~" | "-" => Some(TaskStatus::Doing),
        "!" => Some(TaskStatus::Blocked),
        _ => None,
    }
}

/// Scans `content` line by line for checkbox tasks.
///
/// Each line is trimmed before matching. Line numbers are 1-based.
#[must_use]
pub fn parse_checkbox_tasks(content: &str, file_path: Option<&str>) -> Vec<Task> {
    let mut tasks = Vec::new();
    for (index, line) in content.split('\n').enumerate() {
        let Some(caps) = CHECKBOX_RE.captures(line.trim()) else {
            continue;
        };
        let Some(status) = marker_status(&caps[1]) else {
            continue;
        };
        let raw = caps[2].trim();
        tasks.push(Task {
            title: clean_title(raw),
            status,
            file_path: file_path.map(str::to_string),
            line_number: Some(index + 1),
            priority: extract_priority(raw),
            description: extract_description(raw),
        });
    }
    tasks
}

/// Returns the first priority tag in `text`, lowercased.
fn extract_priority(text: &str) -> Option<String> {
    PRIORITY_RES
        .iter()
        .find_map(|re| re.captures(text))
        .map(|caps| caps[1].to_lowercase())
}

fn strip_priority_tags(text: &str) -> String {
    PRIORITY_RES
        .iter()
        .fold(text.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
}

/// Returns the text after the first `:` (or, failing that, the first `-`),
/// with priority tags removed.
fn extract_description(text: &str) -> Option<String> {
    let caps = COLON_DESCRIPTION_RE.captures(text).or_else(|| DASH_DESCRIPTION_RE.captures(text))?;
    let description = strip_priority_tags(caps[1].trim());
    let description = description.trim();
    (!description.is_empty()).then(|| description.to_string())
}

/// Removes priority tags, then cuts everything from the first `:` and
/// then from the first `-`.
// Titles that legitimately contain a colon or hyphen are truncated too.
fn clean_title(text: &str) -> String {
    let mut title = strip_priority_tags(text);
    if let Some(pos) = title.find(':') {
        title.truncate(pos);
    }
    if let Some(pos) = title.find('-') {
        title.truncate(pos);
    }
    title.trim().to_string()
}
