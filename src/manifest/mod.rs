//! Dependency manifest parsing.
//!
//! Each supported manifest kind has its own parser producing [`Package`]s.
//! Parsers never fail: content that cannot be read in the expected format
//! produces a [`ManifestWarning`] alongside whatever packages were salvaged.

mod cargo;
mod confidence;
mod dockerfile;
mod go_mod;
mod package_json;
mod pyproject;
mod requirements;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use confidence::{score, POPULAR_PACKAGES, RELIABLE_SOURCES};

/// A raw dependency reference extracted from one manifest file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Lower-cased package token.
    pub name: String,
    /// Version, when the manifest pins or constrains one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Manifest file name the package came from, e.g. `package.json`.
    pub source: String,
    /// Identification confidence in `[0, 1]`.
    pub confidence: f64,
}

impl Package {
    /// Creates a package from `kind`, scoring its confidence.
    #[must_use]
    pub fn new(name: impl Into<String>, version: Option<String>, kind: ManifestKind) -> Self {
        let name = name.into();
        let source = kind.file_name();
        let confidence = score(&name, source);
        Self { name, version, source: source.to_string(), confidence }
    }
}

/// The closed set of manifest formats understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestKind {
    /// Python `requirements.txt`.
    RequirementsTxt,
    /// Node `package.json`.
    PackageJson,
    /// Python `pyproject.toml`.
    PyprojectToml,
    /// Rust `Cargo.toml`.
    CargoToml,
    /// Go `go.mod`.
    GoMod,
    /// Container `Dockerfile`.
    Dockerfile,
}

impl ManifestKind {
    /// Every kind, in discovery order.
    pub const ALL: [Self; 6] = [
        Self::RequirementsTxt,
        Self::PackageJson,
        Self::PyprojectToml,
        Self::CargoToml,
        Self::GoMod,
        Self::Dockerfile,
    ];

    /// The exact file name this kind is discovered by.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::RequirementsTxt => "requirements.txt",
            Self::PackageJson => "package.json",
            Self::PyprojectToml => "pyproject.toml",
            Self::CargoToml => "Cargo.toml",
            Self::GoMod => "go.mod",
            Self::Dockerfile => "Dockerfile",
        }
    }

    /// Looks up the kind for an exact file name.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.file_name() == name)
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A discovered manifest: its kind and path relative to the checkout root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Manifest format.
    pub kind: ManifestKind,
    /// Path relative to the checkout root.
    pub path: String,
}

/// A recoverable problem found while parsing one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestWarning {
    /// Manifest format that failed.
    pub kind: ManifestKind,
    /// What went wrong.
    pub message: String,
}

impl fmt::Display for ManifestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.kind, self.message)
    }
}

/// Packages recovered from one manifest plus an optional warning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    /// Packages found (possibly empty).
    pub packages: Vec<Package>,
    /// Set when the content could not be fully read.
    pub warning: Option<ManifestWarning>,
}

impl ParseOutcome {
    fn ok(packages: Vec<Package>) -> Self {
        Self { packages, warning: None }
    }

    fn failed(kind: ManifestKind, message: impl Into<String>) -> Self {
        Self {
            packages: Vec::new(),
            warning: Some(ManifestWarning { kind, message: message.into() }),
        }
    }
}

/// Parses `content` as a manifest of the given kind.
#[must_use]
pub fn parse(kind: ManifestKind, content: &str) -> ParseOutcome {
    match kind {
        ManifestKind::RequirementsTxt => requirements::parse(content),
        ManifestKind::PackageJson => package_json::parse(content),
        ManifestKind::PyprojectToml => pyproject::parse(content),
        ManifestKind::CargoToml => cargo::parse(content),
        ManifestKind::GoMod => go_mod::parse(content),
        ManifestKind::Dockerfile => dockerfile::parse(content),
    }
}

/// Parses `content` and returns only the packages, logging any warning.
#[must_use]
pub fn parse_packages(kind: ManifestKind, content: &str) -> Vec<Package> {
    let outcome = parse(kind, content);
    if let Some(warning) = &outcome.warning {
        warn!(%warning, "manifest parse degraded");
    }
    outcome.packages
}

/// Parses a `requirements.txt`.
#[must_use]
pub fn parse_requirements_txt(content: &str) -> Vec<Package> {
    parse_packages(ManifestKind::RequirementsTxt, content)
}

/// Parses a `package.json`.
#[must_use]
pub fn parse_package_json(content: &str) -> Vec<Package> {
    parse_packages(ManifestKind::PackageJson, content)
}

/// Parses a `pyproject.toml`.
#[must_use]
pub fn parse_pyproject_toml(content: &str) -> Vec<Package> {
    parse_packages(ManifestKind::PyprojectToml, content)
}

/// Parses a `Cargo.toml`.
#[must_use]
pub fn parse_cargo_toml(content: &str) -> Vec<Package> {
    parse_packages(ManifestKind::CargoToml, content)
}

/// Parses a `go.mod`.
#[must_use]
pub fn parse_go_mod(content: &str) -> Vec<Package> {
    parse_packages(ManifestKind::GoMod, content)
}

/// Parses a `Dockerfile`.
#[must_use]
pub fn parse_dockerfile(content: &str) -> Vec<Package> {
    parse_packages(ManifestKind::Dockerfile, content)
}
