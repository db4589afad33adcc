//! Rescheduling of missed study sessions.
//!
//! Incomplete `study` tasks on a given day are cloned forward, alternating
//! between the next day and the day after. Clones that would land past the
//! end of the plan are dropped and reported, not raised as errors.
//!
//! # Usage
//! ```rust,ignore
//! use studyplan_core::scheduler::{RedistributionEngine, RedistributionPolicy};
//!
//! let engine = RedistributionEngine::with_policy(RedistributionPolicy::default());
//! let result = engine.redistribute(&mut timetable, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::schedule::{TaskType, Timetable};

/// Policy for rescheduling missed tasks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedistributionPolicy {
    /// Recompute `total_hours` and `burnout_risk` on every day whose task
    /// list changed
    pub recompute_aggregates: bool,
    /// Number of following days the clones alternate across
    pub spread_days: usize,
    /// Remove the missed originals from the source day instead of leaving
    /// them in place as a record
    pub remove_missed: bool,
}

impl Default for RedistributionPolicy {
    fn default() -> Self {
        Self {
            recompute_aggregates: true,
            spread_days: 2,
            remove_missed: false,
        }
    }
}

impl RedistributionPolicy {
    /// Create a new policy with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave target days' aggregates untouched after insertion.
    pub fn stale() -> Self {
        Self::default().with_recompute_aggregates(false)
    }

    /// Set whether target day aggregates are recomputed
    pub fn with_recompute_aggregates(mut self, recompute: bool) -> Self {
        self.recompute_aggregates = recompute;
        self
    }

    /// Set whether missed originals are removed from the source day
    pub fn with_remove_missed(mut self, remove: bool) -> Self {
        self.remove_missed = remove;
        self
    }

    /// Set how many following days clones alternate across (at least 1)
    pub fn with_spread_days(mut self, days: usize) -> Self {
        self.spread_days = days.max(1);
        self
    }
}

/// A missed task that was cloned forward
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedTask {
    /// Id of the missed task
    pub source_task_id: String,
    /// Id of the clone
    pub clone_task_id: String,
    /// Day the clone was appended to
    pub target_day: usize,
}

/// A missed task whose target day fell outside the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedTask {
    pub task_id: String,
    pub target_day: usize,
}

/// Result of redistributing one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RedistributionResult {
    pub moved: Vec<MovedTask>,
    pub dropped: Vec<DroppedTask>,
}

impl RedistributionResult {
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty() && self.dropped.is_empty()
    }
}

/// Engine for rescheduling missed study tasks
pub struct RedistributionEngine {
    policy: RedistributionPolicy,
}

impl RedistributionEngine {
    /// Create a new engine with default policy
    pub fn new() -> Self {
        Self {
            policy: RedistributionPolicy::default(),
        }
    }

    /// Create a new engine with custom policy
    pub fn with_policy(policy: RedistributionPolicy) -> Self {
        Self { policy }
    }

    /// Clone the incomplete study tasks of `day_index` into following days.
    ///
    /// The i-th missed task goes to `day_index + 1 + (i % spread_days)`.
    /// An out-of-range `day_index` is a no-op.
    ///
    /// Under the default policy every day that gains or loses a task has its
    /// `total_hours` and `burnout_risk` recomputed. Use
    /// [`RedistributionPolicy::stale`] to leave them as generated so only
    /// the task lists change.
    pub fn redistribute(&self, timetable: &mut Timetable, day_index: usize) -> RedistributionResult {
        let mut result = RedistributionResult::default();
        let Some(day) = timetable.plan.get(day_index) else {
            tracing::debug!(day_index, len = timetable.plan.len(), "redistribute: day out of range");
            return result;
        };

        let missed: Vec<_> = day
            .tasks
            .iter()
            .filter(|t| t.task_type == TaskType::Study && !t.completed)
            .cloned()
            .collect();

        let spread = self.policy.spread_days.max(1);
        let mut touched: Vec<usize> = Vec::new();

        for (i, task) in missed.iter().enumerate() {
            let target_day = day_index + 1 + (i % spread);
            match timetable.plan.get_mut(target_day) {
                Some(target) => {
                    let clone = task.rescheduled_clone();
                    tracing::debug!(
                        subject = %task.subject,
                        from = day_index,
                        to = target_day,
                        "rescheduling missed task"
                    );
                    result.moved.push(MovedTask {
                        source_task_id: task.id.clone(),
                        clone_task_id: clone.id.clone(),
                        target_day,
                    });
                    target.tasks.push(clone);
                    if !touched.contains(&target_day) {
                        touched.push(target_day);
                    }
                }
                None => {
                    tracing::debug!(subject = %task.subject, target_day, "dropping missed task past end of plan");
                    result.dropped.push(DroppedTask {
                        task_id: task.id.clone(),
                        target_day,
                    });
                }
            }
        }

        if self.policy.remove_missed {
            let moved_ids: Vec<&str> = result.moved.iter().map(|m| m.source_task_id.as_str()).collect();
            if let Some(source) = timetable.plan.get_mut(day_index) {
                source.tasks.retain(|t| !moved_ids.contains(&t.id.as_str()));
                touched.push(day_index);
            }
        }

        if self.policy.recompute_aggregates {
            for idx in touched {
                if let Some(target) = timetable.plan.get_mut(idx) {
                    target.recompute_aggregates();
                }
            }
        }

        result
    }
}

impl Default for RedistributionEngine {
    fn default() -> Self {
        Self::new()
    }
}
