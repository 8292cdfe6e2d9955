//! Replaying adapter for the `ProjectFiles` port.

use std::path::Path;
use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;
use crate::manifest::ManifestEntry;
use crate::ports::files::{PortResult, ProjectFiles};

/// Replays recorded project file operations from a cassette.
///
/// Arguments are ignored; answers come back in recorded order per method.
pub struct ReplayingProjectFiles {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingProjectFiles {
    /// Creates a new replaying adapter from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next_output(&self, method: &str) -> serde_json::Value {
        let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
        replayer.next_interaction("files", method).output
    }
}

/// Extracts a Result from a cassette output JSON value.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`.
fn extract_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> PortResult<T> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}

impl ProjectFiles for ReplayingProjectFiles {
    fn discover_plan_file(
        &self,
        _root: &Path,
        _candidates: &[String],
    ) -> PortResult<Option<String>> {
        extract_result(&self.next_output("discover_plan_file"), "files::discover_plan_file")
    }

    fn discover_manifests(&self, _root: &Path) -> PortResult<Vec<ManifestEntry>> {
        extract_result(&self.next_output("discover_manifests"), "files::discover_manifests")
    }

    fn read_file(&self, _root: &Path, _relative_path: &str) -> PortResult<String> {
        extract_result(&self.next_output("read_file"), "files::read_file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::manifest::ManifestKind;
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(interactions: Vec<(&str, serde_json::Value)>) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: interactions
                .into_iter()
                .zip(0..)
                .map(|((method, output), seq)| Interaction {
                    seq,
                    port: "files".into(),
                    method: method.into(),
                    input: json!({}),
                    output,
                })
                .collect(),
        };
        CassetteReplayer::new(&cassette)
    }

    #[test]
    fn replays_plan_discovery() {
        let files = ReplayingProjectFiles::new(make_replayer(vec![
            ("discover_plan_file", json!({"ok": "docs/plan.md"})),
            ("discover_plan_file", json!({"ok": null})),
        ]));
        let root = Path::new("/checkout");
        assert_eq!(files.discover_plan_file(root, &[]).unwrap().as_deref(), Some("docs/plan.md"));
        assert_eq!(files.discover_plan_file(root, &[]).unwrap(), None);
    }

    #[test]
    fn replays_manifest_listing() {
        let files = ReplayingProjectFiles::new(make_replayer(vec![(
            "discover_manifests",
            json!({"ok": [{"kind": "go_mod", "path": "svc/go.mod"}]}),
        )]));
        let found = files.discover_manifests(Path::new("/checkout")).unwrap();
        assert_eq!(
            found,
            vec![ManifestEntry { kind: ManifestKind::GoMod, path: "svc/go.mod".into() }]
        );
    }

    #[test]
    fn replays_read_errors() {
        let files = ReplayingProjectFiles::new(make_replayer(vec![(
            "read_file",
            json!({"err": "No such file or directory"}),
        )]));
        let err = files.read_file(Path::new("/checkout"), "plan.md").unwrap_err();
        assert!(err.to_string().contains("No such file"));
    }

    #[test]
    fn malformed_output_is_an_error() {
        let files =
            ReplayingProjectFiles::new(make_replayer(vec![("read_file", json!({"ok": 42}))]));
        let err = files.read_file(Path::new("/checkout"), "plan.md").unwrap_err();
        assert!(err.to_string().starts_with("files::read_file"));
    }
}
