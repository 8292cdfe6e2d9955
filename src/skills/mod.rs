//! Skills: packages classified into a fixed category taxonomy.
//!
//! [`map_to_skill`] turns one [`Package`](crate::manifest::Package) into a
//! [`Skill`]; [`deduplicate`] merges skills sharing a canonical name.

mod catalog;
mod mapper;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::manifest::Package;

pub use catalog::{categories, lookup, popular_skills, CatalogEntry, CATALOG};
pub use mapper::{infer_category, map_to_skill, normalize, INFERRED_PENALTY};

/// Separator between source file names in a merged [`Skill::source`].
pub const SOURCE_SEPARATOR: &str = ", ";

/// Skill taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    /// Programming language.
    Language,
    /// Application or web framework.
    Framework,
    /// Database engine.
    Database,
    /// ORM or migration tool.
    Orm,
    /// Test framework.
    Testing,
    /// Bundler, compiler or transpiler.
    Build,
    /// Package manager.
    PackageManager,
    /// Cloud platform.
    Cloud,
    /// Deployment and CI tooling.
    Devops,
    /// Monitoring and logging.
    Monitoring,
    /// Anything else.
    Utility,
}

impl SkillCategory {
    /// Every category.
    pub const ALL: [Self; 11] = [
        Self::Language,
        Self::Framework,
        Self::Database,
        Self::Orm,
        Self::Testing,
        Self::Build,
        Self::PackageManager,
        Self::Cloud,
        Self::Devops,
        Self::Monitoring,
        Self::Utility,
    ];

    /// Serialized name, e.g. `package_manager`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::Framework => "framework",
            Self::Database => "database",
            Self::Orm => "orm",
            Self::Testing => "testing",
            Self::Build => "build",
            Self::PackageManager => "package_manager",
            Self::Cloud => "cloud",
            Self::Devops => "devops",
            Self::Monitoring => "monitoring",
            Self::Utility => "utility",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified capability derived from one or more packages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Canonical name after alias resolution.
    pub name: String,
    /// Category from the catalog or inferred from the name.
    pub category: SkillCategory,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Contributing manifest file names joined by [`SOURCE_SEPARATOR`].
    pub source: String,
    /// Known alternate names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Skill {
    /// Individual source file names in first-seen order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.source.split(SOURCE_SEPARATOR).filter(|s| !s.is_empty())
    }

    fn merge(&mut self, other: &Skill) {
        self.confidence = self.confidence.max(other.confidence);
        let source = join_distinct(self.sources().chain(other.sources()));
        self.source = source;
    }
}

fn join_distinct<'a>(sources: impl Iterator<Item = &'a str>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for source in sources {
        if !seen.contains(&source) {
            seen.push(source);
        }
    }
    seen.join(SOURCE_SEPARATOR)
}

/// Maps every package and drops the ones with no skill.
#[must_use]
pub fn map_packages(packages: &[Package]) -> Vec<Skill> {
    packages.iter().filter_map(map_to_skill).collect()
}

/// Merges skills sharing a name.
///
/// The survivor sits where the name first appeared, keeps the highest
/// confidence and lists each contributing source once, in first-seen order.
/// Applying this twice gives the same result as applying it once.
#[must_use]
pub fn deduplicate(skills: Vec<Skill>) -> Vec<Skill> {
    let mut merged: Vec<Skill> = Vec::with_capacity(skills.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for mut skill in skills {
        if let Some(&pos) = positions.get(&skill.name) {
            merged[pos].merge(&skill);
        } else {
            let source = join_distinct(skill.sources());
            skill.source = source;
            positions.insert(skill.name.clone(), merged.len());
            merged.push(skill);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, confidence: f64, source: &str) -> Skill {
        Skill {
            name: name.to_string(),
            category: SkillCategory::Framework,
            confidence,
            source: source.to_string(),
            aliases: Vec::new(),
        }
    }

    #[test]
    fn merges_by_name_keeping_max_confidence() {
        let out = deduplicate(vec![
            skill("react", 0.6, "package.json"),
            skill("django", 0.9, "requirements.txt"),
            skill("react", 0.9, "Dockerfile"),
            skill("react", 0.7, "package.json"),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "react");
        assert!((out[0].confidence - 0.9).abs() < 1e-9);
        assert_eq!(out[0].source, "package.json, Dockerfile");
        assert_eq!(out[1].name, "django");
    }

    #[test]
    fn deduplicate_is_idempotent() {
        let input = vec![
            skill("a", 0.5, "go.mod"),
            skill("b", 0.4, "Cargo.toml, Cargo.toml"),
            skill("a", 0.8, "Cargo.toml"),
            skill("a", 0.1, "go.mod"),
        ];
        let once = deduplicate(input);
        assert_eq!(once[1].source, "Cargo.toml");
        let twice = deduplicate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input() {
        assert!(deduplicate(Vec::new()).is_empty());
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&SkillCategory::PackageManager).unwrap();
        assert_eq!(json, "\"package_manager\"");
        for category in SkillCategory::ALL {
            assert_eq!(serde_json::to_string(&category).unwrap(), format!("\"{category}\""));
        }
    }

    #[test]
    fn packages_map_then_merge() {
        use crate::manifest::{parse_packages, ManifestKind};

        let mut packages = parse_packages(ManifestKind::RequirementsTxt, "Django==4.2\nredis\n");
        packages.extend(parse_packages(ManifestKind::Dockerfile, "FROM redis:7\n"));
        let skills = deduplicate(map_packages(&packages));
        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["django", "redis"]);
        assert_eq!(skills[1].source, "requirements.txt, Dockerfile");
        assert_eq!(skills[1].category, SkillCategory::Database);
    }
}
