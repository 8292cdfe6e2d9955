//! Project files port: discovery and reading inside a checkout.

use std::path::Path;

use crate::manifest::ManifestEntry;

/// Result type shared by port methods.
pub type PortResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Read-only access to a repository checkout.
///
/// All paths handed back and forth are relative to `root` and use `/` as
/// the separator, so recorded cassettes are portable between machines.
pub trait ProjectFiles: Send + Sync {
    /// Returns the first candidate that exists as a regular file under
    /// `root`, or `None` when none do.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` itself cannot be inspected.
    fn discover_plan_file(&self, root: &Path, candidates: &[String])
        -> PortResult<Option<String>>;

    /// Lists every known manifest anywhere under `root`, sorted by path.
    ///
    /// `.git` and `node_modules` directories are not descended into.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory walk fails.
    fn discover_manifests(&self, root: &Path) -> PortResult<Vec<ManifestEntry>>;

    /// Reads a file as text. Bytes that are not valid UTF-8 are decoded as
    /// Latin-1 instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read_file(&self, root: &Path, relative_path: &str) -> PortResult<String>;
}
