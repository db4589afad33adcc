//! Planner inputs: the learner's subject roster and availability profile.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::priority;
use crate::revision;
use crate::time::TimeOfDay;

pub const DEFAULT_SUBJECT_COLOR: &str = "#a78bfa";

/// A subject the learner is preparing for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    /// Empty when the roster omits it; [`Subject::normalized`] then derives
    /// a stable id from the name.
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// 1 (easy) ..= 5 (hard)
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    /// Total chapter count
    #[serde(default = "default_chapters")]
    pub chapters: u32,
    #[serde(default)]
    pub completed_chapters: u32,
    /// Unparseable dates are treated as absent (far horizon).
    #[serde(default, deserialize_with = "lenient_exam_date")]
    pub exam_date: Option<DateTime<Utc>>,
    /// Importance multiplier, 1 ..= 5
    #[serde(default = "default_weightage")]
    pub weightage: u8,
    #[serde(default = "default_color")]
    pub color: String,
    /// Cached score, refreshed by [`Subject::refresh_priority`]. The planner
    /// never reads it.
    #[serde(default)]
    pub priority: u32,
    #[serde(default)]
    pub revision_schedule: Vec<RevisionEntry>,
}

/// One recommended revision date for a subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevisionEntry {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub done: bool,
}

/// Name-based v5 id, identical for the same subject name on every read.
pub fn subject_id_for(name: &str) -> String {
    uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}
fn default_difficulty() -> u8 {
    3
}
fn default_chapters() -> u32 {
    10
}
fn default_weightage() -> u8 {
    1
}
fn default_color() -> String {
    DEFAULT_SUBJECT_COLOR.into()
}

impl Subject {
    /// Create a subject with default difficulty, chapters and weightage.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: subject_id_for(&name),
            name,
            difficulty: default_difficulty(),
            chapters: default_chapters(),
            completed_chapters: 0,
            exam_date: None,
            weightage: default_weightage(),
            color: default_color(),
            priority: 0,
            revision_schedule: Vec::new(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_weightage(mut self, weightage: u8) -> Self {
        self.weightage = weightage;
        self
    }

    pub fn with_chapters(mut self, chapters: u32) -> Self {
        self.chapters = chapters;
        self
    }

    pub fn with_exam_date(mut self, exam_date: DateTime<Utc>) -> Self {
        self.exam_date = Some(exam_date);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Clamp difficulty and weightage into 1..=5 and chapters to at least 1.
    /// A missing id is derived from the name.
    pub fn normalized(mut self) -> Self {
        if self.id.trim().is_empty() {
            self.id = subject_id_for(&self.name);
        }
        let difficulty = self.difficulty.clamp(1, 5);
        let weightage = self.weightage.clamp(1, 5);
        if difficulty != self.difficulty || weightage != self.weightage {
            tracing::warn!(
                subject = %self.name,
                difficulty = self.difficulty,
                weightage = self.weightage,
                "clamping subject difficulty/weightage into 1..=5"
            );
        }
        self.difficulty = difficulty;
        self.weightage = weightage;
        self.chapters = self.chapters.max(1);
        self
    }

    /// Recompute the cached `priority` field with the same scorer the
    /// planner uses, and return it.
    pub fn refresh_priority(&mut self, now: DateTime<Utc>) -> u32 {
        self.priority = priority::score(self, now);
        self.priority
    }

    /// Replace the stored revision schedule with fresh spaced-repetition
    /// dates. Subjects without an exam get an empty schedule.
    pub fn schedule_revisions(&mut self, now: DateTime<Utc>) -> &[RevisionEntry] {
        self.revision_schedule = match self.exam_date {
            Some(exam) => revision::revision_dates(exam, now)
                .into_iter()
                .map(|date| RevisionEntry { date, done: false })
                .collect(),
            None => Vec::new(),
        };
        &self.revision_schedule
    }
}

fn lenient_exam_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_exam_date(&s)))
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
/// Anything else is logged and treated as "no exam date".
pub fn parse_exam_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Some(dt.and_utc());
    }
    tracing::warn!(exam_date = raw, "unparseable exam date, treating as absent");
    None
}

/// Preferred time-of-day bucket for study slots.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreferredTime {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl std::str::FromStr for PreferredTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(PreferredTime::Morning),
            "afternoon" => Ok(PreferredTime::Afternoon),
            "evening" => Ok(PreferredTime::Evening),
            "night" => Ok(PreferredTime::Night),
            other => Err(ValidationError::InvalidValue {
                field: "preferred_time".into(),
                message: format!("expected morning/afternoon/evening/night, got '{other}'"),
            }),
        }
    }
}

/// A recurring fixed commitment. Accepted and carried, never consulted
/// during slot placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Commitment {
    pub name: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub days: Vec<String>,
}

/// Learner availability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default = "default_daily_hours")]
    pub daily_hours: f64,
    #[serde(default)]
    pub preferred_time: PreferredTime,
    #[serde(default)]
    pub study_goal: String,
    #[serde(default)]
    pub fixed_commitments: Vec<Commitment>,
}

fn default_daily_hours() -> f64 {
    4.0
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            daily_hours: default_daily_hours(),
            preferred_time: PreferredTime::default(),
            study_goal: String::new(),
            fixed_commitments: Vec::new(),
        }
    }
}

impl Profile {
    pub fn new(daily_hours: f64, preferred_time: PreferredTime) -> Self {
        Self {
            daily_hours,
            preferred_time,
            ..Self::default()
        }
    }

    /// `daily_hours` must be positive and finite.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.daily_hours.is_finite() || self.daily_hours <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "daily_hours".into(),
                message: format!("must be a positive number of hours, got {}", self.daily_hours),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn deserialize_applies_defaults() {
        let s: Subject = serde_json::from_str(r#"{"name":"Physics"}"#).unwrap();
        assert_eq!(s.difficulty, 3);
        assert_eq!(s.chapters, 10);
        assert_eq!(s.weightage, 1);
        assert_eq!(s.color, DEFAULT_SUBJECT_COLOR);
        assert!(s.exam_date.is_none());
        assert!(s.id.is_empty());
    }

    #[test]
    fn missing_id_is_derived_from_name() {
        let read = || serde_json::from_str::<Subject>(r#"{"name":"Physics"}"#).unwrap().normalized();
        assert_eq!(read().id, read().id);
        assert_eq!(read().id, subject_id_for("Physics"));
        assert_eq!(Subject::new("Physics").id, read().id);
        assert_ne!(subject_id_for("Physics"), subject_id_for("Maths"));

        let explicit: Subject = serde_json::from_str(r#"{"id":"phys-1","name":"Physics"}"#).unwrap();
        assert_eq!(explicit.normalized().id, "phys-1");
    }

    #[test]
    fn exam_date_accepts_plain_date_and_rfc3339() {
        let s: Subject =
            serde_json::from_str(r#"{"name":"Maths","exam_date":"2026-11-02"}"#).unwrap();
        assert_eq!(s.exam_date, Some(Utc.with_ymd_and_hms(2026, 11, 2, 0, 0, 0).unwrap()));

        let s: Subject =
            serde_json::from_str(r#"{"name":"Maths","exam_date":"2026-11-02T09:30:00+02:00"}"#)
                .unwrap();
        assert_eq!(s.exam_date, Some(Utc.with_ymd_and_hms(2026, 11, 2, 7, 30, 0).unwrap()));
    }

    #[test]
    fn invalid_exam_date_is_treated_as_absent() {
        let s: Subject =
            serde_json::from_str(r#"{"name":"Maths","exam_date":"next tuesday"}"#).unwrap();
        assert!(s.exam_date.is_none());
        let s: Subject = serde_json::from_str(r#"{"name":"Maths","exam_date":null}"#).unwrap();
        assert!(s.exam_date.is_none());
    }

    #[test]
    fn normalized_clamps_into_range() {
        let s = Subject::new("Art").with_difficulty(9).with_weightage(0).with_chapters(0);
        let s = s.normalized();
        assert_eq!(s.difficulty, 5);
        assert_eq!(s.weightage, 1);
        assert_eq!(s.chapters, 1);
    }

    #[test]
    fn refresh_priority_matches_scorer() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut s = Subject::new("Chemistry")
            .with_difficulty(4)
            .with_weightage(2)
            .with_exam_date(now + Duration::days(5));
        assert_eq!(s.refresh_priority(now), 8 * 4 * 2);
        assert_eq!(s.priority, priority::score(&s, now));

        let mut no_exam = Subject::new("History").with_difficulty(2).with_weightage(3);
        assert_eq!(no_exam.refresh_priority(now), 2 * 2 * 3);
    }

    #[test]
    fn schedule_revisions_fills_entries() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut s = Subject::new("Biology").with_exam_date(now + Duration::days(10));
        let entries = s.schedule_revisions(now);
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| !e.done));

        let mut none = Subject::new("Music");
        assert!(none.schedule_revisions(now).is_empty());
    }

    #[test]
    fn profile_validation() {
        assert!(Profile::default().validate().is_ok());
        assert!(Profile::new(0.0, PreferredTime::Night).validate().is_err());
        assert!(Profile::new(f64::NAN, PreferredTime::Night).validate().is_err());
        assert!(Profile::new(-2.0, PreferredTime::Night).validate().is_err());
    }

    #[test]
    fn preferred_time_parses_case_insensitively() {
        assert_eq!("Evening".parse::<PreferredTime>().unwrap(), PreferredTime::Evening);
        assert!("dawn".parse::<PreferredTime>().is_err());
        let p: Profile = serde_json::from_str(r#"{"preferred_time":"night"}"#).unwrap();
        assert_eq!(p.preferred_time, PreferredTime::Night);
        assert_eq!(p.daily_hours, 4.0);
    }
}
