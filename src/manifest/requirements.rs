//! `requirements.txt`: one requirement per line.

use std::sync::LazyLock;

use regex::Regex;

use super::{ManifestKind, Package, ParseOutcome};

static REQUIREMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9_-]+)(.*)$").expect("requirement pattern"));
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[=<>~!]+(.+)$").expect("version specifier pattern"));

pub(super) fn parse(content: &str) -> ParseOutcome {
    let packages = content
        .lines()
        .map(strip_comment)
        .filter(|line| !line.is_empty() && !line.starts_with('-'))
        .filter_map(|line| {
            let caps = REQUIREMENT_RE.captures(line)?;
            let name = caps[1].to_lowercase();
            let version = VERSION_RE
                .captures(caps[2].trim())
                .map(|v| v[1].trim().to_string())
                .filter(|v| !v.is_empty());
            Some(Package::new(name, version, ManifestKind::RequirementsTxt))
        })
        .collect();
    ParseOutcome::ok(packages)
}

/// Trims the line and drops a `#` comment (whole-line or trailing).
fn strip_comment(line: &str) -> &str {
    let line = line.trim();
    match line.find('#') {
        Some(pos) => line[..pos].trim_end(),
        None => line,
    }
}
