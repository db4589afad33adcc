//! # Studyplan Core Library
//!
//! This library provides the adaptive planning engine behind Studyplan. It
//! turns a learner's subject roster and availability profile into a
//! multi-day study timetable, and can later reschedule missed sessions.
//! The CLI binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Priority**: urgency × difficulty × weightage scoring per subject
//! - **Allocation**: proportional hour budget over the planning horizon
//! - **Scheduler**: the day-by-day planner with rest days, subject rotation
//!   and revision injection, plus redistribution of missed tasks
//! - **Burnout**: per-day risk labelling
//! - **Revision**: spaced-repetition date suggestions
//! - **Insights**: analytics summaries over logged study days
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`StudyPlanner`]: Timetable generation
//! - [`RedistributionEngine`]: Rescheduling of missed study tasks
//! - [`Timetable`]: Generated plan with per-day tasks
//! - [`Config`]: Application configuration management

pub mod allocation;
pub mod burnout;
pub mod error;
pub mod insights;
pub mod priority;
pub mod revision;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod subject;
pub mod time;

pub use allocation::SubjectAllocation;
pub use burnout::BurnoutRisk;
pub use error::{ConfigError, CoreError, ValidationError};
pub use insights::{generate_insights, AnalyticsEntry, AnalyticsSummary};
pub use schedule::{DayPlan, FocusMode, Task, TaskType, Timetable};
pub use scheduler::{PlannerConfig, RedistributionEngine, RedistributionPolicy, StudyPlanner};
pub use storage::Config;
pub use subject::{PreferredTime, Profile, Subject};
pub use time::{Clock, FixedClock, SystemClock, TimeOfDay};
