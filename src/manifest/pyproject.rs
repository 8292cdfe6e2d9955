//! `pyproject.toml`: PEP 621 dependencies and build requirements.

use toml::{Table, Value};

use super::{ManifestKind, Package, ParseOutcome};

const VERSION_OPERATORS: &[&str] = &[">=", "<=", "==", "~="];

pub(super) fn parse(content: &str) -> ParseOutcome {
    let data: Table = match toml::from_str(content) {
        Ok(data) => data,
        Err(e) => return ParseOutcome::failed(ManifestKind::PyprojectToml, e.to_string()),
    };

    let project = data.get("project").and_then(Value::as_table);
    let mut requirements: Vec<&str> = Vec::new();

    if let Some(deps) = project.and_then(|p| p.get("dependencies")) {
        requirements.extend(strings(deps));
    }
    if let Some(groups) =
        project.and_then(|p| p.get("optional-dependencies")).and_then(Value::as_table)
    {
        for deps in groups.values() {
            requirements.extend(strings(deps));
        }
    }
    if let Some(requires) = data
        .get("build-system")
        .and_then(Value::as_table)
        .and_then(|b| b.get("requires"))
    {
        requirements.extend(strings(requires));
    }

    let packages = requirements
        .into_iter()
        .filter_map(split_requirement)
        .map(|(name, version)| Package::new(name, version, ManifestKind::PyprojectToml))
        .collect();
    ParseOutcome::ok(packages)
}

fn strings(value: &Value) -> impl Iterator<Item = &str> {
    value.as_array().into_iter().flatten().filter_map(Value::as_str)
}

/// Splits `name>=1.0` at the earliest version operator.
fn split_requirement(requirement: &str) -> Option<(String, Option<String>)> {
    let cut = VERSION_OPERATORS
        .iter()
        .filter_map(|op| requirement.find(op))
        .min();
    let (name, version) = match cut {
        Some(pos) => {
            let version = requirement[pos + 2..].trim();
            (&requirement[..pos], (!version.is_empty()).then(|| version.to_string()))
        }
        None => (requirement, None),
    };
    let name = name.trim().to_lowercase();
    (!name.is_empty()).then_some((name, version))
}
