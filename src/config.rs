//! Tracker configuration: thresholds, plan locations, feature switches.
//!
//! Loaded from an optional YAML file, then overridden by `REPOTRACK_*`
//! environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, TrackError};

/// Environment variable overriding [`ProgressConfig::green_threshold`].
pub const ENV_GREEN_THRESHOLD: &str = "REPOTRACK_GREEN_THRESHOLD";
/// Environment variable overriding [`ProgressConfig::yellow_threshold`].
pub const ENV_YELLOW_THRESHOLD: &str = "REPOTRACK_YELLOW_THRESHOLD";
/// Environment variable overriding [`ProgressConfig::stale_after_days`].
pub const ENV_STALE_DAYS: &str = "REPOTRACK_STALE_DAYS";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Progress classification.
    pub progress: ProgressConfig,
    /// Plan file discovery.
    pub plan: PlanConfig,
    /// Skill extraction.
    pub skills: SkillsConfig,
}

/// Thresholds for the green/yellow/red classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Minimum percentage for green.
    pub green_threshold: f64,
    /// Minimum percentage for yellow.
    pub yellow_threshold: f64,
    /// Days without an update after which a project is stale.
    pub stale_after_days: u32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self { green_threshold: 70.0, yellow_threshold: 30.0, stale_after_days: 30 }
    }
}

/// Where to look for the plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Candidate paths relative to the checkout root, highest priority first.
    pub candidates: Vec<String>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            candidates: vec!["docs/plan.md".into(), "plan.md".into(), "README.md".into()],
        }
    }
}

/// Skill extraction switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    /// Run the skills branch of the pipeline.
    pub enabled: bool,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl TrackerConfig {
    /// Loads configuration from `path` (if given and present), applies
    /// environment overrides, and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Config`] if the file cannot be read or parsed,
    /// or if the resulting thresholds are inconsistent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    TrackError::Config(format!("failed to read {}: {e}", path.display()))
                })?;
                Self::from_yaml(&content)?
            }
            _ => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Config`] if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| TrackError::Config(format!("invalid configuration: {e}")))
    }

    /// Overrides fields from variables returned by `lookup`.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, ENV_GREEN_THRESHOLD) {
            self.progress.green_threshold = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_YELLOW_THRESHOLD) {
            self.progress.yellow_threshold = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_STALE_DAYS) {
            self.progress.stale_after_days = v;
        }
    }

    /// Checks threshold ordering and plan candidates.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Config`] listing every violated rule.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        let p = &self.progress;
        if !(0.0..=100.0).contains(&p.green_threshold) {
            errors.push("progress.green_threshold must be between 0 and 100");
        }
        if !(0.0..=100.0).contains(&p.yellow_threshold) {
            errors.push("progress.yellow_threshold must be between 0 and 100");
        }
        if p.yellow_threshold > p.green_threshold {
            errors.push("progress.yellow_threshold must not exceed progress.green_threshold");
        }
        if self.plan.candidates.is_empty() {
            errors.push("plan.candidates must not be empty");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(TrackError::Config(errors.join("; ")))
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}
