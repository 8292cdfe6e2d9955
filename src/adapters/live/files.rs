//! Live project files adapter backed by the local disk.

use std::path::Path;

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::manifest::{ManifestEntry, ManifestKind};
use crate::ports::files::{PortResult, ProjectFiles};

/// Directory names never descended into during manifest discovery.
const SKIPPED_DIRS: &[&str] = &[".git", "node_modules"];

/// Reads a checkout straight from disk.
pub struct LiveProjectFiles;

impl ProjectFiles for LiveProjectFiles {
    fn discover_plan_file(
        &self,
        root: &Path,
        candidates: &[String],
    ) -> PortResult<Option<String>> {
        ensure_dir(root)?;
        Ok(candidates.iter().find(|candidate| root.join(candidate).is_file()).cloned())
    }

    fn discover_manifests(&self, root: &Path) -> PortResult<Vec<ManifestEntry>> {
        ensure_dir(root)?;
        let mut entries = Vec::new();
        let walker = WalkDir::new(root).into_iter().filter_entry(|e| !is_skipped_dir(e));
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(kind) = entry.file_name().to_str().and_then(ManifestKind::from_file_name)
            else {
                continue;
            };
            let relative = entry.path().strip_prefix(root)?;
            let path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            debug!(%kind, %path, "discovered manifest");
            entries.push(ManifestEntry { kind, path });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn read_file(&self, root: &Path, relative_path: &str) -> PortResult<String> {
        let bytes = std::fs::read(root.join(relative_path))?;
        Ok(decode_text(bytes))
    }
}

fn ensure_dir(root: &Path) -> PortResult<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(format!("{} is not a directory", root.display()).into())
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

/// UTF-8 when valid, otherwise Latin-1 (each byte is its own code point).
fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn checkout(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(root: &Path, rel: &str, contents: &[u8]) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn plan_discovery_respects_candidate_order() {
        let root = checkout("repotrack_live_plan");
        write(&root, "plan.md", b"# plan");
        write(&root, "README.md", b"# readme");
        std::fs::create_dir_all(root.join("docs/plan.md")).unwrap();

        let candidates: Vec<String> =
            ["docs/plan.md", "plan.md", "README.md"].map(String::from).to_vec();
        let found = LiveProjectFiles.discover_plan_file(&root, &candidates).unwrap();
        // docs/plan.md is a directory, so it does not count
        assert_eq!(found.as_deref(), Some("plan.md"));

        let none = LiveProjectFiles.discover_plan_file(&root, &["TODO.md".to_string()]).unwrap();
        assert_eq!(none, None);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = std::env::temp_dir().join("repotrack_live_missing_root");
        let _ = std::fs::remove_dir_all(&root);
        assert!(LiveProjectFiles.discover_plan_file(&root, &[]).is_err());
        assert!(LiveProjectFiles.discover_manifests(&root).is_err());
    }

    #[test]
    fn manifests_are_found_recursively_and_sorted() {
        let root = checkout("repotrack_live_manifests");
        write(&root, "requirements.txt", b"flask\n");
        write(&root, "web/package.json", b"{}");
        write(&root, "services/api/Cargo.toml", b"[dependencies]\n");
        write(&root, "Dockerfile", b"FROM rust\n");
        write(&root, "node_modules/left-pad/package.json", b"{}");
        write(&root, ".git/config", b"");
        write(&root, "notes.txt", b"");

        let found = LiveProjectFiles.discover_manifests(&root).unwrap();
        let paths: Vec<&str> = found.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["Dockerfile", "requirements.txt", "services/api/Cargo.toml", "web/package.json"]
        );
        assert_eq!(found[2].kind, ManifestKind::CargoToml);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn read_file_falls_back_to_latin1() {
        let root = checkout("repotrack_live_read");
        write(&root, "utf8.md", "caf\u{e9}".as_bytes());
        write(&root, "latin1.md", b"caf\xe9");

        assert_eq!(LiveProjectFiles.read_file(&root, "utf8.md").unwrap(), "caf\u{e9}");
        assert_eq!(LiveProjectFiles.read_file(&root, "latin1.md").unwrap(), "caf\u{e9}");
        assert!(LiveProjectFiles.read_file(&root, "missing.md").is_err());

        let _ = std::fs::remove_dir_all(&root);
    }
}
