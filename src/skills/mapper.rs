//! Package to skill mapping.

use tracing::debug;

use super::catalog::{self, lookup_key};
use super::{Skill, SkillCategory};
use crate::manifest::Package;

/// Confidence multiplier for skills whose category was guessed from the name.
pub const INFERRED_PENALTY: f64 = 0.7;

/// Ordered substring rules; the first category with a matching token wins.
const INFERENCE_RULES: &[(SkillCategory, &[&str])] = &[
    (SkillCategory::Language, &["python", "py-", "-py", "js-", "-js", "ts-", "-ts"]),
    (SkillCategory::Framework, &["framework", "web", "api", "server", "app"]),
    (SkillCategory::Database, &["db", "database", "sql", "nosql", "orm", "model"]),
    (SkillCategory::Testing, &["test", "spec", "mock", "stub", "fixture"]),
    (SkillCategory::Build, &["build", "bundle", "compile", "transpile"]),
    (SkillCategory::Cloud, &["aws", "azure", "gcp", "cloud", "serverless"]),
    (SkillCategory::Devops, &["deploy", "ci", "cd", "pipeline", "docker", "k8s"]),
    (SkillCategory::Monitoring, &["log", "metric", "monitor", "trace", "alert"]),
];

/// Canonical form of a package or skill name.
///
/// Lower-cases, strips `-`, `_` and `.`, then resolves aliases, so
/// `React.js` becomes `react`. Unknown names keep their stripped form.
/// `normalize(normalize(x)) == normalize(x)` for every input.
#[must_use]
pub fn normalize(name: &str) -> String {
    catalog::lookup(name).map_or_else(|| lookup_key(name), |entry| entry.name.to_string())
}

/// Category guessed from substrings of the raw package name, `utility` when
/// nothing matches.
#[must_use]
pub fn infer_category(package_name: &str) -> SkillCategory {
    let name = package_name.to_lowercase();
    INFERENCE_RULES
        .iter()
        .find(|(_, tokens)| tokens.iter().any(|token| name.contains(token)))
        .map_or(SkillCategory::Utility, |(category, _)| *category)
}

/// Maps one package to a skill.
///
/// Known names take their catalog category and the package's confidence.
/// Anything else gets an inferred category at a penalized confidence, so
/// this currently always returns `Some`.
#[must_use]
pub fn map_to_skill(package: &Package) -> Option<Skill> {
    let skill = match catalog::lookup(&package.name) {
        Some(entry) => Skill {
            name: entry.name.to_string(),
            category: entry.category,
            confidence: package.confidence,
            source: package.source.clone(),
            aliases: entry.aliases.iter().map(|a| (*a).to_string()).collect(),
        },
        None => {
            let category = infer_category(&package.name);
            debug!(package = %package.name, %category, "inferred skill category");
            Skill {
                name: lookup_key(&package.name),
                category,
                confidence: package.confidence * INFERRED_PENALTY,
                source: package.source.clone(),
                aliases: Vec::new(),
            }
        }
    };
    Some(skill)
}
