//! Timetable types: tasks, day plans and the full multi-day plan.
//!
//! These are the planner's output. After generation the only mutations are
//! toggling a task's `completed` flag and appending rescheduled clones via
//! [`crate::scheduler::RedistributionEngine`].

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::allocation::{round1, SubjectAllocation};
use crate::burnout::{self, BurnoutRisk};
use crate::error::ValidationError;
use crate::time::TimeOfDay;

/// Note attached to a task cloned by redistribution.
pub const RESCHEDULED_NOTE: &str = "Rescheduled from missed session";

/// Kind of work a task represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Study,
    Revision,
    Practice,
    Break,
}

impl TaskType {
    /// Whether minutes of this type count toward a day's study load.
    pub fn counts_toward_load(&self) -> bool {
        matches!(self, TaskType::Study | TaskType::Practice)
    }
}

/// Study technique for a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FocusMode {
    /// 25/5 cycles
    Pomodoro,
    /// One long uninterrupted block
    DeepFocus,
    LightReview,
}

impl FocusMode {
    /// Focus mode matched to a subject's difficulty.
    pub fn for_difficulty(difficulty: u8) -> Self {
        match difficulty {
            d if d >= 4 => FocusMode::DeepFocus,
            3 => FocusMode::Pomodoro,
            _ => FocusMode::LightReview,
        }
    }
}

/// Session length in minutes for a subject's difficulty.
pub fn session_minutes(difficulty: u8) -> u32 {
    match difficulty {
        d if d >= 4 => 90,
        3 => 50,
        _ => 30,
    }
}

/// A single timed block in a day plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub subject: String,
    #[serde(default)]
    pub subject_id: Option<String>,
    pub subject_color: String,
    pub chapter: String,
    #[serde(default)]
    pub chapter_number: u32,
    /// Minutes
    pub duration: u32,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub focus_mode: FocusMode,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
}

impl Task {
    /// Flip the completed flag and return the new value.
    pub fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Copy of this task under a new id, reset to incomplete and marked as
    /// rescheduled.
    pub fn rescheduled_clone(&self) -> Task {
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            completed: false,
            notes: RESCHEDULED_NOTE.to_string(),
            ..self.clone()
        }
    }

    pub fn hours(&self) -> f64 {
        self.duration as f64 / 60.0
    }
}

/// One day of the timetable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub day_of_week: String,
    pub total_hours: f64,
    pub burnout_risk: BurnoutRisk,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub is_rest_day: bool,
    /// Consecutive study days including this one; 0 on a rest day.
    #[serde(default)]
    pub streak: u32,
}

impl DayPlan {
    /// Hours of study load across the day's tasks, one decimal.
    pub fn load_hours(&self) -> f64 {
        let minutes: u32 = self
            .tasks
            .iter()
            .filter(|t| t.task_type.counts_toward_load())
            .map(|t| t.duration)
            .sum();
        round1(minutes as f64 / 60.0)
    }

    /// Re-derive `total_hours` and `burnout_risk` from the task list.
    pub fn recompute_aggregates(&mut self) {
        self.total_hours = self.load_hours();
        self.burnout_risk = burnout::risk(self.total_hours, self.streak, self.tasks.len());
    }

    pub fn completed_hours(&self) -> f64 {
        self.tasks
            .iter()
            .filter(|t| t.completed && t.task_type.counts_toward_load())
            .map(Task::hours)
            .sum()
    }
}

/// The planner's full output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timetable {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub plan: Vec<DayPlan>,
    pub subject_allocation: Vec<SubjectAllocation>,
    #[serde(default = "default_version")]
    pub version: u32,
    pub generated_at: DateTime<Utc>,
}

fn default_version() -> u32 {
    1
}

impl Timetable {
    pub fn day(&self, index: usize) -> Option<&DayPlan> {
        self.plan.get(index)
    }

    /// Toggle a task's completed flag, returning the new value.
    pub fn toggle_task(&mut self, day_index: usize, task_index: usize) -> Result<bool, ValidationError> {
        let len = self.plan.len();
        let day = self.plan.get_mut(day_index).ok_or(ValidationError::OutOfBounds {
            collection: "plan".into(),
            index: day_index,
            len,
        })?;
        let task_len = day.tasks.len();
        let task = day.tasks.get_mut(task_index).ok_or(ValidationError::OutOfBounds {
            collection: format!("tasks of day {day_index}"),
            index: task_index,
            len: task_len,
        })?;
        Ok(task.toggle_completed())
    }

    /// Sum of daily `total_hours`.
    pub fn planned_hours(&self) -> f64 {
        round1(self.plan.iter().map(|d| d.total_hours).sum())
    }

    pub fn completed_hours(&self) -> f64 {
        round1(self.plan.iter().map(DayPlan::completed_hours).sum())
    }

    /// Completed share of planned load, 0.0..=1.0 (0 when nothing is planned).
    pub fn completion_rate(&self) -> f64 {
        let planned = self.planned_hours();
        if planned <= 0.0 {
            return 0.0;
        }
        (self.completed_hours() / planned).min(1.0)
    }

    /// Minutes of study load per subject name.
    pub fn planned_minutes_by_subject(&self) -> BTreeMap<String, u32> {
        let mut minutes = BTreeMap::new();
        for task in self.plan.iter().flat_map(|d| &d.tasks) {
            if task.task_type.counts_toward_load() {
                *minutes.entry(task.subject.clone()).or_insert(0) += task.duration;
            }
        }
        minutes
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::time::hm;

    pub(crate) fn study_task(subject: &str, duration: u32) -> Task {
        Task {
            id: format!("{subject}-{duration}"),
            subject: subject.to_string(),
            subject_id: None,
            subject_color: "#a78bfa".into(),
            chapter: "Ch. 1 - Introduction & Fundamentals".into(),
            chapter_number: 1,
            duration,
            task_type: TaskType::Study,
            focus_mode: FocusMode::Pomodoro,
            start_time: hm(9, 0),
            end_time: hm(9, 0).add_minutes(duration),
            completed: false,
            notes: String::new(),
        }
    }

    fn day(tasks: Vec<Task>, streak: u32) -> DayPlan {
        DayPlan {
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            day_of_week: "Monday".into(),
            total_hours: 0.0,
            burnout_risk: BurnoutRisk::Low,
            tasks,
            is_rest_day: false,
            streak,
        }
    }

    #[test]
    fn focus_mode_and_session_by_difficulty() {
        assert_eq!(FocusMode::for_difficulty(5), FocusMode::DeepFocus);
        assert_eq!(FocusMode::for_difficulty(4), FocusMode::DeepFocus);
        assert_eq!(FocusMode::for_difficulty(3), FocusMode::Pomodoro);
        assert_eq!(FocusMode::for_difficulty(1), FocusMode::LightReview);
        assert_eq!(session_minutes(4), 90);
        assert_eq!(session_minutes(3), 50);
        assert_eq!(session_minutes(2), 30);
    }

    #[test]
    fn task_serializes_with_wire_names() {
        let json = serde_json::to_value(study_task("Maths", 50)).unwrap();
        assert_eq!(json["type"], "study");
        assert_eq!(json["focus_mode"], "pomodoro");
        assert_eq!(json["start_time"], "09:00");
        assert_eq!(json["end_time"], "09:50");
        let json = serde_json::to_value(FocusMode::DeepFocus).unwrap();
        assert_eq!(json, "deep-focus");
    }

    #[test]
    fn toggle_twice_restores_original() {
        let mut task = study_task("Maths", 50);
        assert!(task.toggle_completed());
        assert!(!task.toggle_completed());
        assert!(!task.completed);
    }

    #[test]
    fn rescheduled_clone_gets_new_identity() {
        let mut task = study_task("Maths", 50);
        task.completed = true;
        let clone = task.rescheduled_clone();
        assert_ne!(clone.id, task.id);
        assert!(!clone.completed);
        assert_eq!(clone.notes, RESCHEDULED_NOTE);
        assert_eq!(clone.subject, task.subject);
        assert_eq!(clone.start_time, task.start_time);
    }

    #[test]
    fn recompute_counts_only_study_load() {
        let mut revision = study_task("Maths", 30);
        revision.task_type = TaskType::Revision;
        let mut d = day(vec![study_task("Maths", 90), study_task("Physics", 50), revision], 4);
        d.recompute_aggregates();
        assert_eq!(d.total_hours, 2.3);
        assert_eq!(d.burnout_risk, BurnoutRisk::Low);

        let tasks = (0..7).map(|_| study_task("Maths", 90)).collect();
        let mut heavy = day(tasks, 6);
        heavy.recompute_aggregates();
        assert_eq!(heavy.total_hours, 10.5);
        assert_eq!(heavy.burnout_risk, BurnoutRisk::High);
    }

    #[test]
    fn toggle_task_reports_out_of_bounds() {
        let mut tt = Timetable {
            week_start: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            week_end: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            plan: vec![day(vec![study_task("Maths", 60)], 1)],
            subject_allocation: Vec::new(),
            version: 1,
            generated_at: Utc::now(),
        };
        assert_eq!(tt.toggle_task(0, 0), Ok(true));
        assert!(matches!(
            tt.toggle_task(3, 0),
            Err(ValidationError::OutOfBounds { index: 3, len: 1, .. })
        ));
        assert!(tt.toggle_task(0, 9).is_err());
    }

    #[test]
    fn progress_reporting() {
        let mut d = day(vec![study_task("Maths", 60), study_task("Physics", 60)], 1);
        d.recompute_aggregates();
        let mut tt = Timetable {
            week_start: d.date,
            week_end: d.date,
            plan: vec![d],
            subject_allocation: Vec::new(),
            version: 1,
            generated_at: Utc::now(),
        };
        assert_eq!(tt.planned_hours(), 2.0);
        assert_eq!(tt.completion_rate(), 0.0);
        tt.toggle_task(0, 1).unwrap();
        assert_eq!(tt.completed_hours(), 1.0);
        assert_eq!(tt.completion_rate(), 0.5);
        let by_subject = tt.planned_minutes_by_subject();
        assert_eq!(by_subject.get("Maths"), Some(&60));
    }
}
