//! `Cargo.toml`: `[dependencies]` and `[dev-dependencies]`.

use toml::{Table, Value};

use super::{ManifestKind, Package, ParseOutcome};

const SECTIONS: &[&str] = &["dependencies", "dev-dependencies"];

pub(super) fn parse(content: &str) -> ParseOutcome {
    let data: Table = match toml::from_str(content) {
        Ok(data) => data,
        Err(e) => return ParseOutcome::failed(ManifestKind::CargoToml, e.to_string()),
    };

    let packages = SECTIONS
        .iter()
        .filter_map(|section| data.get(*section).and_then(Value::as_table))
        .flat_map(|deps| deps.iter())
        .map(|(name, spec)| {
            Package::new(name.to_lowercase(), version(spec), ManifestKind::CargoToml)
        })
        .collect();
    ParseOutcome::ok(packages)
}

/// `serde = "1"` or `serde = { version = "1", ... }`.
fn version(spec: &Value) -> Option<String> {
    match spec {
        Value::String(v) => Some(v.clone()),
        Value::Table(t) => t.get("version").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_both_dependency_tables() {
        let content = r#"
[package]
name = "svc"

[dependencies]
tokio = { version = "1", features = ["full"] }
Serde = "1.0"
local = { path = "../local" }

[dev-dependencies]
criterion = "0.5"

[build-dependencies]
cc = "1"
"#;
        // keys come back in table order, where "Serde" sorts before "local"
        let pkgs = parse(content).packages;
        let got: Vec<(&str, Option<&str>)> =
            pkgs.iter().map(|p| (p.name.as_str(), p.version.as_deref())).collect();
        assert_eq!(
            got,
            vec![
                ("serde", Some("1.0")),
                ("local", None),
                ("tokio", Some("1")),
                ("criterion", Some("0.5")),
            ]
        );
        let tokio = pkgs.iter().find(|p| p.name == "tokio").unwrap();
        assert!((tokio.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn invalid_toml_is_a_warning() {
        let outcome = parse("[dependencies\nserde = ");
        assert!(outcome.packages.is_empty());
        assert_eq!(outcome.warning.unwrap().kind, ManifestKind::CargoToml);
    }

    #[test]
    fn workspace_root_without_dependencies() {
        let outcome = parse("[workspace]\nmembers = [\"a\"]\n");
        assert!(outcome.packages.is_empty());
        assert!(outcome.warning.is_none());
    }
}
