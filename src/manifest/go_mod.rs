//! `go.mod`: single-line `require` directives and `require ( ... )` blocks.

use std::sync::LazyLock;

use regex::Regex;

use super::{ManifestKind, Package, ParseOutcome};

static MAJOR_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+$").expect("major version suffix pattern"));

pub(super) fn parse(content: &str) -> ParseOutcome {
    let mut packages = Vec::new();
    let mut in_block = false;

    for raw in content.lines() {
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }
        if in_block {
            if line == ")" {
                in_block = false;
            } else if let Some(pkg) = requirement(line) {
                packages.push(pkg);
            }
            continue;
        }
        let Some(rest) = require_args(line) else {
            continue;
        };
        if rest == "(" {
            in_block = true;
        } else if let Some(pkg) = requirement(rest) {
            packages.push(pkg);
        }
    }
    ParseOutcome::ok(packages)
}

/// Arguments of a `require` directive; `requirex ...` is not one.
fn require_args(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("require")?;
    if rest.starts_with(char::is_whitespace) || rest.starts_with('(') {
        Some(rest.trim())
    } else {
        None
    }
}

fn strip_comment(line: &str) -> &str {
    let line = line.trim();
    match line.find("//") {
        Some(pos) => line[..pos].trim_end(),
        None => line,
    }
}

/// `github.com/gin-gonic/gin v1.9.1` becomes package `gin` at `v1.9.1`.
fn requirement(spec: &str) -> Option<Package> {
    let mut parts = spec.split_whitespace();
    let path = parts.next()?;
    let version = parts.next().map(str::to_string);
    let name = module_name(path)?;
    Some(Package::new(name, version, ManifestKind::GoMod))
}

/// Last path segment, lower-cased. A major-version suffix such as
/// `github.com/jackc/pgx/v5` names its parent segment instead.
fn module_name(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let (last, parents) = segments.split_last()?;
    let name = match parents.last() {
        Some(parent) if MAJOR_VERSION_RE.is_match(last) => parent,
        _ => last,
    };
    Some(name.to_lowercase())
}
