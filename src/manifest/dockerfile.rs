//! `Dockerfile`: base images from `FROM`, tools from `RUN`.

use super::{ManifestKind, Package, ParseOutcome};

/// Shell and package-manager tools recognized in `RUN` commands.
const COMMAND_TOOLS: &[&str] = &[
    "apt-get", "yum", "dnf", "pip", "npm", "yarn", "cargo", "go", "git", "curl", "wget", "tar",
    "unzip", "make", "cmake",
];

pub(super) fn parse(content: &str) -> ParseOutcome {
    let mut packages = Vec::new();
    for line in logical_lines(content) {
        if let Some(image) = instruction_args(&line, "FROM").and_then(base_image) {
            packages.push(Package::new(image, None, ManifestKind::Dockerfile));
        } else if let Some(command) = instruction_args(&line, "RUN") {
            let command = command.to_lowercase();
            packages.extend(
                COMMAND_TOOLS
                    .iter()
                    .filter(|tool| command.contains(*tool))
                    .map(|tool| Package::new(*tool, None, ManifestKind::Dockerfile)),
            );
        }
    }
    ParseOutcome::ok(packages)
}

/// Joins backslash-continued lines and drops blanks and comments.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending = String::new();
    for raw in content.lines() {
        let line = raw.trim();
        if line.starts_with('#') || (line.is_empty() && pending.is_empty()) {
            continue;
        }
        if let Some(head) = line.strip_suffix('\\') {
            pending.push_str(head.trim_end());
            pending.push(' ');
            continue;
        }
        pending.push_str(line);
        lines.push(std::mem::take(&mut pending));
    }
    if !pending.trim().is_empty() {
        lines.push(pending);
    }
    lines
}

/// Returns the arguments of `line` if it is the given instruction
/// (matched case-insensitively).
fn instruction_args<'a>(line: &'a str, instruction: &str) -> Option<&'a str> {
    let (head, rest) = line.split_once(char::is_whitespace)?;
    head.eq_ignore_ascii_case(instruction).then(|| rest.trim())
}

/// Reduces an image reference to its bare name: no flags, registry, path,
/// tag, or digest. `--platform=linux/amd64 ghcr.io/org/python:3.11 AS build`
/// becomes `python`.
fn base_image(args: &str) -> Option<String> {
    let reference = args.split_whitespace().find(|token| !token.starts_with("--"))?;
    let name = reference.rsplit('/').next().unwrap_or(reference);
    let name = name.split(['@', ':']).next().unwrap_or(name);
    (!name.is_empty()).then(|| name.to_lowercase())
}
