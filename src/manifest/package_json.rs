//! `package.json`: dependency maps plus tools referenced from `scripts`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{ManifestKind, Package, ParseOutcome};

const DEPENDENCY_SECTIONS: &[&str] = &["dependencies", "devDependencies", "peerDependencies"];

/// Build and test tools recognized inside npm scripts.
const SCRIPT_TOOLS: &[&str] = &[
    "webpack", "vite", "rollup", "jest", "mocha", "cypress", "eslint", "prettier", "typescript",
    "babel", "postcss", "tailwindcss",
];

static NUMERIC_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^0-9]*([0-9].*)$").expect("npm version pattern"));

pub(super) fn parse(content: &str) -> ParseOutcome {
    let data: Value = match serde_json::from_str(content) {
        Ok(data) => data,
        Err(e) => return ParseOutcome::failed(ManifestKind::PackageJson, e.to_string()),
    };
    let Some(root) = data.as_object() else {
        return ParseOutcome::failed(ManifestKind::PackageJson, "expected a JSON object");
    };

    let mut packages = Vec::new();
    for section in DEPENDENCY_SECTIONS {
        let Some(deps) = root.get(*section).and_then(Value::as_object) else {
            continue;
        };
        for (name, spec) in deps {
            let version = spec.as_str().and_then(numeric_version);
            packages.push(Package::new(name.to_lowercase(), version, ManifestKind::PackageJson));
        }
    }

    if let Some(scripts) = root.get("scripts").and_then(Value::as_object) {
        let text = scripts
            .values()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        packages.extend(
            SCRIPT_TOOLS
                .iter()
                .filter(|tool| text.contains(*tool))
                .map(|tool| Package::new(*tool, None, ManifestKind::PackageJson)),
        );
    }

    ParseOutcome::ok(packages)
}

/// Strips range operators (`^`, `~`, `>=`, ...) from an npm version spec.
fn numeric_version(spec: &str) -> Option<String> {
    let spec = spec.trim();
    if spec.is_empty() || spec == "*" {
        return None;
    }
    NUMERIC_VERSION_RE.captures(spec).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "web",
        "dependencies": { "React": "^18.2.0", "next": "13.4.0", "left-pad": "*" },
        "devDependencies": { "typescript": "~5.1.0", "tailwindcss": "latest" },
        "peerDependencies": { "react-dom": ">=18" },
        "scripts": { "build": "next build && Tailwindcss -i in.css", "test": "jest --ci" }
    }"#;

    #[test]
    fn collects_all_dependency_sections() {
        let pkgs = parse(SAMPLE).packages;
        let find = |n: &str| pkgs.iter().find(|p| p.name == n).cloned();
        assert_eq!(find("react").unwrap().version.as_deref(), Some("18.2.0"));
        assert_eq!(find("next").unwrap().version.as_deref(), Some("13.4.0"));
        assert_eq!(find("left-pad").unwrap().version, None);
        assert_eq!(find("typescript").unwrap().version.as_deref(), Some("5.1.0"));
        assert_eq!(find("tailwindcss").unwrap().version, None);
        assert_eq!(find("react-dom").unwrap().version.as_deref(), Some("18"));
    }

    #[test]
    fn scripts_contribute_versionless_tools() {
        let pkgs = parse(SAMPLE).packages;
        let from_scripts: Vec<&str> =
            pkgs.iter().skip(6).map(|p| p.name.as_str()).collect();
        assert_eq!(from_scripts, vec!["jest", "tailwindcss"]);
        assert!(pkgs.iter().skip(6).all(|p| p.version.is_none()));
    }

    #[test]
    fn popular_names_score_higher() {
        let pkgs = parse(SAMPLE).packages;
        let react = pkgs.iter().find(|p| p.name == "react").unwrap();
        let pad = pkgs.iter().find(|p| p.name == "left-pad").unwrap();
        assert!((react.confidence - 0.9).abs() < 1e-9);
        assert!((pad.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn invalid_json_is_a_warning() {
        let outcome = parse("{\"dependencies\": ");
        assert!(outcome.packages.is_empty());
        assert!(outcome.warning.is_some());
    }

    #[test]
    fn non_object_root_is_a_warning() {
        let outcome = parse("[1, 2, 3]");
        assert!(outcome.packages.is_empty());
        assert_eq!(outcome.warning.unwrap().message, "expected a JSON object");
    }

    #[test]
    fn odd_sections_are_ignored() {
        let outcome = parse(r#"{"dependencies": ["react"], "scripts": "jest"}"#);
        assert!(outcome.packages.is_empty());
        assert!(outcome.warning.is_none());
    }

    #[test]
    fn version_operators_are_stripped() {
        assert_eq!(numeric_version("^1.2.3").as_deref(), Some("1.2.3"));
        assert_eq!(numeric_version(">= 2").as_deref(), Some("2"));
        assert_eq!(numeric_version("*"), None);
        assert_eq!(numeric_version(""), None);
        assert_eq!(numeric_version("workspace:"), None);
    }
}
