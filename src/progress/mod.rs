//! Progress aggregation and project health classification.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ProgressConfig;
use crate::tasks::{Task, TaskStatus};

/// Green/yellow/red project health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// On track.
    Green,
    /// Needs attention.
    Yellow,
    /// Behind or stuck.
    Red,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        })
    }
}

/// A completion percentage with exactly two fractional digits.
///
/// Stored as hundredths of a percent so comparisons and formatting are exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(u32);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// `part / whole * 100`, rounded half-up to two decimals.
    ///
    /// Returns zero when `whole` is zero. `part` is clamped to `whole`.
    #[must_use]
    pub fn of(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let part = part.min(whole) as u128;
        let whole = whole as u128;
        // hundredths = round(part * 10_000 / whole), half-up
        let hundredths = (part * 20_000 + whole) / (2 * whole);
        Self(u32::try_from(hundredths).unwrap_or(10_000))
    }

    /// Value in hundredths of a percent (7500 means 75.00%).
    #[must_use]
    pub fn hundredths(self) -> u32 {
        self.0
    }

    /// Value as a float, e.g. `75.0`.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Percentage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !(0.0..=100.0).contains(&value) {
            return Err(serde::de::Error::custom(format!("percentage out of range: {value}")));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self((value * 100.0).round() as u32))
    }
}

/// Per-status task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// All tasks.
    pub total: usize,
    /// Finished tasks.
    pub done: usize,
    /// In-progress tasks.
    pub doing: usize,
    /// Not-started tasks.
    pub todo: usize,
    /// Blocked tasks.
    pub blocked: usize,
}

impl StatusCounts {
    /// Counts `tasks` by status.
    #[must_use]
    pub fn tally(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut counts, task| {
            counts.total += 1;
            match task.status {
                TaskStatus::Done => counts.done += 1,
                TaskStatus::Doing => counts.doing += 1,
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::Blocked => counts.blocked += 1,
            }
            counts
        })
    }

    /// Done plus doing: in-progress work counts toward completion.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.done + self.doing
    }

    /// Completion percentage over all tasks.
    #[must_use]
    pub fn percentage(&self) -> Percentage {
        Percentage::of(self.completed(), self.total)
    }
}

/// Aggregate over one run's tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Completion percentage in `[0, 100]`.
    pub percentage_complete: Percentage,
    /// Number of tasks.
    pub tasks_total: usize,
    /// Finished tasks.
    pub tasks_done: usize,
    /// In-progress tasks.
    pub tasks_doing: usize,
    /// Not-started tasks.
    pub tasks_todo: usize,
    /// Blocked tasks.
    pub tasks_blocked: usize,
    /// Health classification.
    pub project_status: ProjectStatus,
    /// When the snapshot was computed.
    pub created_at: DateTime<Utc>,
}

/// Classifies progress against configurable thresholds.
#[derive(Debug, Clone)]
pub struct ProgressCalculator {
    green_threshold: f64,
    yellow_threshold: f64,
    stale_after: Duration,
}

impl Default for ProgressCalculator {
    fn default() -> Self {
        Self::new(&ProgressConfig::default())
    }
}

impl ProgressCalculator {
    /// Creates a calculator from the progress section of the configuration.
    #[must_use]
    pub fn new(config: &ProgressConfig) -> Self {
        Self {
            green_threshold: config.green_threshold,
            yellow_threshold: config.yellow_threshold,
            stale_after: Duration::days(i64::from(config.stale_after_days)),
        }
    }

    /// Builds the snapshot for `tasks`, stamped with `created_at`.
    ///
    /// An empty task list is 0% complete and red.
    #[must_use]
    pub fn calculate(&self, tasks: &[Task], created_at: DateTime<Utc>) -> ProgressSnapshot {
        let counts = StatusCounts::tally(tasks);
        let percentage = counts.percentage();
        let project_status = if counts.total == 0 {
            ProjectStatus::Red
        } else {
            self.classify(percentage, counts.blocked)
        };

        info!(
            percentage = %percentage,
            status = %project_status,
            total = counts.total,
            "calculated progress"
        );

        ProgressSnapshot {
            percentage_complete: percentage,
            tasks_total: counts.total,
            tasks_done: counts.done,
            tasks_doing: counts.doing,
            tasks_todo: counts.todo,
            tasks_blocked: counts.blocked,
            project_status,
            created_at,
        }
    }

    /// Applies the thresholds, in order: green, then yellow, else red.
    #[must_use]
    pub fn classify(&self, percentage: Percentage, blocked: usize) -> ProjectStatus {
        let pct = percentage.as_f64();
        if pct >= self.green_threshold && blocked == 0 {
            ProjectStatus::Green
        } else if pct >= self.yellow_threshold && blocked <= 1 {
            ProjectStatus::Yellow
        } else {
            ProjectStatus::Red
        }
    }

    /// Counts and percentage without a timestamp or classification.
    #[must_use]
    pub fn status_summary(&self, tasks: &[Task]) -> StatusCounts {
        StatusCounts::tally(tasks)
    }

    /// True when `last_updated` is unknown or older than the stale window
    /// measured back from `now`.
    #[must_use]
    pub fn is_stale(&self, last_updated: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        last_updated.is_none_or(|updated| updated < now - self.stale_after)
    }
}
