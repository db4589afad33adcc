//! Multi-day study planner.
//!
//! Walks the planning horizon one day at a time:
//! - Scores subjects and splits the hour budget between them
//! - Inserts a rest day after a run of consecutive study days
//! - Fills the day's time slots with the most urgent subject, never picking
//!   the same subject three times in a row while another is still eligible
//! - Appends a short revision block when an exam is close
//! - Labels each day with a burnout risk
//!
//! The walk is a fold over days: everything carried from one day to the
//! next lives in [`PlannerState`]. Wall-clock time and the chapter coin
//! flip come from an injected [`Clock`] and [`rand::Rng`].

pub mod redistribute;
pub mod slots;

pub use redistribute::{DroppedTask, MovedTask, RedistributionEngine, RedistributionPolicy, RedistributionResult};
pub use slots::{slots_for_day, TimeSlot};

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::allocation::{allocate, round1, RemainingHours, SubjectAllocation};
use crate::burnout;
use crate::error::ValidationError;
use crate::priority::{self, days_left, ScoredSubject};
use crate::schedule::{session_minutes, DayPlan, FocusMode, Task, TaskType, Timetable};
use crate::subject::{Profile, Subject, DEFAULT_SUBJECT_COLOR};
use crate::time::{hm, Clock, SystemClock, TimeOfDay};

/// Subjects with this many hours or fewer left are not scheduled.
const MIN_REMAINING_HOURS: f64 = 0.2;

/// Effective study hours on a rest day.
const REST_DAY_HOURS: f64 = 0.5;

const REST_TASK_MINUTES: u32 = 30;
const REVISION_TASK_MINUTES: u32 = 30;
/// Gap between the last task of the day and an injected revision block.
const REVISION_GAP_MINUTES: u32 = 10;

/// Picks of the same subject in a row before it is rotated out.
const MAX_SAME_SUBJECT_STREAK: u32 = 2;

const CHAPTER_TITLES: [&str; 10] = [
    "Introduction & Fundamentals",
    "Core Concepts",
    "Key Theorems & Formulas",
    "Advanced Topics",
    "Problem Solving Techniques",
    "Applications & Examples",
    "Case Studies",
    "Deep Dive Analysis",
    "Practice Problems",
    "Revision & Summary",
];

/// Title for a 1-based chapter number, cycling through the title list.
pub fn chapter_title(chapter: u32) -> &'static str {
    let idx = (chapter.max(1) - 1) as usize % CHAPTER_TITLES.len();
    CHAPTER_TITLES[idx]
}

/// Planner configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerConfig {
    /// Days in the plan
    pub horizon_days: u32,
    /// Consecutive study days before a rest day
    pub rest_after_study_days: u32,
    /// Exams this many days away (or fewer) get a daily revision block
    pub revision_window_days: i64,
    /// Start of the revision block when the day has no other task
    pub revision_default_start: TimeOfDay,
    /// Start of the rest-day review block
    pub rest_day_start: TimeOfDay,
    /// Seed for the chapter coin flip and task ids (None = entropy)
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon_days: 14,
            rest_after_study_days: 6,
            revision_window_days: 7,
            revision_default_start: hm(18, 0),
            rest_day_start: hm(10, 0),
            seed: None,
        }
    }
}

/// State threaded from one day to the next.
#[derive(Debug, Clone)]
pub struct PlannerState {
    /// Study days since the last rest day
    pub consecutive_study_days: u32,
    pub remaining: RemainingHours,
    /// Current chapter per subject name, starting at 1
    pub chapter_progress: HashMap<String, u32>,
}

impl PlannerState {
    fn new(scored: &[ScoredSubject], allocations: &[SubjectAllocation]) -> Self {
        Self {
            consecutive_study_days: 0,
            remaining: RemainingHours::from_allocations(allocations),
            chapter_progress: scored.iter().map(|s| (s.subject.name.clone(), 1)).collect(),
        }
    }

    fn chapter(&self, subject_name: &str) -> u32 {
        self.chapter_progress.get(subject_name).copied().unwrap_or(1)
    }
}

/// Inputs that stay fixed for the whole horizon.
struct PlanContext<'a> {
    scored: &'a [ScoredSubject],
    profile: &'a Profile,
    today: NaiveDate,
    now: DateTime<Utc>,
}

/// Tracks the last picked subject for anti-repetition.
#[derive(Default)]
struct PickStreak {
    last: Option<String>,
    count: u32,
}

impl PickStreak {
    fn record(&mut self, name: &str) {
        if self.last.as_deref() == Some(name) {
            self.count += 1;
        } else {
            self.last = Some(name.to_string());
            self.count = 1;
        }
    }
}

/// Choose the next subject for a slot.
///
/// Eligible subjects have more than [`MIN_REMAINING_HOURS`] left. The subject
/// picked for the last two slots is skipped if anything else is eligible.
/// Among the rest, the highest fresh score wins; ties keep ranking order.
fn pick_subject<'a>(
    scored: &'a [ScoredSubject],
    remaining: &RemainingHours,
    streak: &PickStreak,
    now: DateTime<Utc>,
) -> Option<&'a Subject> {
    let mut pool: Vec<&Subject> = scored
        .iter()
        .map(|s| &s.subject)
        .filter(|s| remaining.get(&s.name) > MIN_REMAINING_HOURS)
        .collect();
    if pool.is_empty() {
        return None;
    }
    if streak.count >= MAX_SAME_SUBJECT_STREAK && pool.len() > 1 {
        if let Some(last) = streak.last.as_deref() {
            pool.retain(|s| s.name != last);
        }
    }
    pool.sort_by_key(|s| Reverse(priority::score(s, now)));
    pool.first().copied()
}

fn new_task_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string()
}

/// Adaptive study planner.
pub struct StudyPlanner<C: Clock = SystemClock> {
    config: PlannerConfig,
    clock: C,
}

impl StudyPlanner<SystemClock> {
    /// Create a planner with default config and the system clock
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::default())
    }

    /// Create with custom config
    pub fn with_config(config: PlannerConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }
}

impl Default for StudyPlanner<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> StudyPlanner<C> {
    /// Create with custom config and clock
    pub fn with_clock(config: PlannerConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Generate a timetable, seeding the random source from the config.
    pub fn generate(&self, subjects: &[Subject], profile: &Profile) -> Result<Timetable, ValidationError> {
        let mut rng = match self.config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        self.generate_with_rng(subjects, profile, &mut rng)
    }

    /// Generate a timetable drawing randomness from `rng`.
    ///
    /// # Errors
    /// Returns a validation error if `subjects` is empty or the profile's
    /// daily hours are not a positive number.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        subjects: &[Subject],
        profile: &Profile,
        rng: &mut R,
    ) -> Result<Timetable, ValidationError> {
        if subjects.is_empty() {
            return Err(ValidationError::EmptyCollection(
                "add at least one subject before generating a timetable".into(),
            ));
        }
        profile.validate()?;

        let now = self.clock.now();
        let today = now.date_naive();
        let subjects: Vec<Subject> = subjects.iter().cloned().map(Subject::normalized).collect();

        let scored = priority::rank(&subjects, now);
        let subject_allocation = allocate(&scored, profile.daily_hours, self.config.horizon_days);
        let mut state = PlannerState::new(&scored, &subject_allocation);
        let ctx = PlanContext {
            scored: &scored,
            profile,
            today,
            now,
        };

        let plan: Vec<DayPlan> = (0..self.config.horizon_days)
            .map(|day| self.plan_day(&ctx, &mut state, day, &mut *rng))
            .collect();

        let timetable = Timetable {
            week_start: today,
            week_end: today + Duration::days(self.config.horizon_days.saturating_sub(1) as i64),
            plan,
            subject_allocation,
            version: 1,
            generated_at: now,
        };

        tracing::info!(
            subjects = subjects.len(),
            horizon_days = self.config.horizon_days,
            planned_hours = timetable.planned_hours(),
            "generated study timetable"
        );

        Ok(timetable)
    }

    /// Plan one day and advance the carried state.
    fn plan_day<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        state: &mut PlannerState,
        day: u32,
        rng: &mut R,
    ) -> DayPlan {
        let date = ctx.today + Duration::days(day as i64);

        let is_rest_day = state.consecutive_study_days >= self.config.rest_after_study_days;
        if is_rest_day {
            state.consecutive_study_days = 0;
        } else {
            state.consecutive_study_days += 1;
        }

        let hours = effective_hours(is_rest_day, ctx.profile.daily_hours);
        let (tasks, minutes_used) = if is_rest_day {
            tracing::debug!(%date, effective_hours = hours, "rest day");
            (vec![self.rest_task(rng)], 0)
        } else {
            self.fill_study_day(ctx, state, hours, rng)
        };

        let total_hours = round1(minutes_used as f64 / 60.0);
        DayPlan {
            date,
            day_of_week: date.format("%A").to_string(),
            total_hours,
            burnout_risk: burnout::risk(total_hours, state.consecutive_study_days, tasks.len()),
            tasks,
            is_rest_day,
            streak: state.consecutive_study_days,
        }
    }

    /// Fill a study day's slots. Returns the tasks and study minutes used.
    fn fill_study_day<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        state: &mut PlannerState,
        effective_hours: f64,
        rng: &mut R,
    ) -> (Vec<Task>, u32) {
        let effective_minutes = effective_hours * 60.0;
        let mut tasks = Vec::new();
        let mut minutes_used: u32 = 0;
        let mut streak = PickStreak::default();

        for slot in slots_for_day(ctx.profile.preferred_time, effective_hours) {
            if minutes_used as f64 >= effective_minutes {
                break;
            }
            let Some(subject) = pick_subject(ctx.scored, &state.remaining, &streak, ctx.now) else {
                tracing::debug!(start = %slot.start, "no eligible subject, skipping slot");
                continue;
            };

            let duration = slot.duration.min(session_minutes(subject.difficulty));
            let chapter = state.chapter(&subject.name);
            tasks.push(Task {
                id: new_task_id(rng),
                subject: subject.name.clone(),
                subject_id: Some(subject.id.clone()),
                subject_color: subject.color.clone(),
                chapter: format!("Ch. {chapter} - {}", chapter_title(chapter)),
                chapter_number: chapter,
                duration,
                task_type: TaskType::Study,
                focus_mode: FocusMode::for_difficulty(subject.difficulty),
                start_time: slot.start,
                end_time: slot.start.add_minutes(duration),
                completed: false,
                notes: String::new(),
            });

            state.remaining.consume(&subject.name, duration as f64 / 60.0);
            minutes_used += duration;

            // coin is always flipped so the random stream does not depend on progress
            let advance = rng.gen_bool(0.5);
            if advance && chapter < subject.chapters {
                state.chapter_progress.insert(subject.name.clone(), chapter + 1);
            }

            streak.record(&subject.name);
        }

        if (minutes_used + REVISION_TASK_MINUTES) as f64 <= effective_minutes {
            if let Some(task) = self.revision_task(ctx, state, tasks.last(), rng) {
                tasks.push(task);
            }
        }

        (tasks, minutes_used)
    }

    /// Short revision block for the most urgent subject with an exam inside
    /// the revision window.
    fn revision_task<R: Rng + ?Sized>(
        &self,
        ctx: &PlanContext<'_>,
        state: &PlannerState,
        previous: Option<&Task>,
        rng: &mut R,
    ) -> Option<Task> {
        let subject = ctx
            .scored
            .iter()
            .map(|s| &s.subject)
            .find(|s| s.exam_date.is_some() && days_left(s.exam_date, ctx.now) <= self.config.revision_window_days)?;

        let anchor = previous.map_or(self.config.revision_default_start, |t| t.end_time);
        let start_time = anchor.add_minutes(REVISION_GAP_MINUTES);
        tracing::debug!(subject = %subject.name, start = %start_time, "injecting revision block");

        Some(Task {
            id: new_task_id(rng),
            subject: subject.name.clone(),
            subject_id: Some(subject.id.clone()),
            subject_color: subject.color.clone(),
            chapter: "Rapid Revision - Key Concepts".into(),
            chapter_number: state.chapter(&subject.name),
            duration: REVISION_TASK_MINUTES,
            task_type: TaskType::Revision,
            focus_mode: FocusMode::LightReview,
            start_time,
            end_time: start_time.add_minutes(REVISION_TASK_MINUTES),
            completed: false,
            notes: "Exam approaching!".into(),
        })
    }

    fn rest_task<R: Rng + ?Sized>(&self, rng: &mut R) -> Task {
        let start_time = self.config.rest_day_start;
        Task {
            id: new_task_id(rng),
            subject: "Rest & Light Review".into(),
            subject_id: None,
            subject_color: DEFAULT_SUBJECT_COLOR.into(),
            chapter: "Review your notes lightly, no pressure".into(),
            chapter_number: 0,
            duration: REST_TASK_MINUTES,
            task_type: TaskType::Break,
            focus_mode: FocusMode::LightReview,
            start_time,
            end_time: start_time.add_minutes(REST_TASK_MINUTES),
            completed: false,
            notes: "Rest day - be kind to yourself".into(),
        }
    }
}

/// Study hours available on a day.
fn effective_hours(is_rest_day: bool, daily_hours: f64) -> f64 {
    if is_rest_day {
        REST_DAY_HOURS
    } else {
        daily_hours
    }
}
