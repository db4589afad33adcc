//! Proportional hour budgeting across subjects.
//!
//! Each subject receives `score / total_score` of the horizon's hours,
//! rounded to one decimal and floored at one hour. The floor means the sum
//! may slightly exceed `daily_hours × horizon_days`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::priority::ScoredSubject;

/// Guard against a zero total score.
const MIN_TOTAL_SCORE: f64 = 1e-9;

/// Minimum hours any subject receives over the horizon.
pub const MIN_ALLOCATED_HOURS: f64 = 1.0;

/// Hour budget for one subject over the whole horizon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectAllocation {
    pub subject_id: String,
    pub subject_name: String,
    pub color: String,
    pub allocated_hours: f64,
}

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Allocate hours to each scored subject, preserving input order.
pub fn allocate(scored: &[ScoredSubject], daily_hours: f64, horizon_days: u32) -> Vec<SubjectAllocation> {
    let total_score = scored
        .iter()
        .map(|s| s.score as f64)
        .sum::<f64>()
        .max(MIN_TOTAL_SCORE);
    let budget = daily_hours * horizon_days as f64;

    scored
        .iter()
        .map(|s| SubjectAllocation {
            subject_id: s.subject.id.clone(),
            subject_name: s.subject.name.clone(),
            color: s.subject.color.clone(),
            allocated_hours: round1(s.score as f64 / total_score * budget).max(MIN_ALLOCATED_HOURS),
        })
        .collect()
}

/// Mutable pool of hours left per subject, drawn down as tasks are placed.
#[derive(Debug, Clone, Default)]
pub struct RemainingHours {
    hours: HashMap<String, f64>,
}

impl RemainingHours {
    pub fn from_allocations(allocations: &[SubjectAllocation]) -> Self {
        Self {
            hours: allocations
                .iter()
                .map(|a| (a.subject_name.clone(), a.allocated_hours))
                .collect(),
        }
    }

    pub fn get(&self, subject_name: &str) -> f64 {
        self.hours.get(subject_name).copied().unwrap_or(0.0)
    }

    /// Draw down a subject's budget, never below zero.
    pub fn consume(&mut self, subject_name: &str, hours: f64) {
        if let Some(left) = self.hours.get_mut(subject_name) {
            *left = (*left - hours).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::rank;
    use crate::subject::Subject;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    #[test]
    fn single_subject_takes_whole_budget() {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        let s = Subject::new("Maths")
            .with_difficulty(5)
            .with_weightage(5)
            .with_exam_date(now + Duration::days(2));
        let scored = rank(&[s], now);
        assert_eq!(scored[0].score, 250);
        let alloc = allocate(&scored, 4.0, 14);
        assert_eq!(alloc.len(), 1);
        assert_eq!(alloc[0].allocated_hours, 56.0);
    }

    #[test]
    fn small_share_is_floored_at_one_hour() {
        let now = Utc::now();
        let heavy = Subject::new("Heavy")
            .with_difficulty(5)
            .with_weightage(5)
            .with_exam_date(now + Duration::days(1));
        let light = Subject::new("Light");
        let scored = rank(&[heavy, light], now);
        let alloc = allocate(&scored, 1.0, 2);
        let light_alloc = alloc.iter().find(|a| a.subject_name == "Light").unwrap();
        assert_eq!(light_alloc.allocated_hours, 1.0);
        let total: f64 = alloc.iter().map(|a| a.allocated_hours).sum();
        assert!(total > 2.0);
    }

    #[test]
    fn zero_scores_do_not_divide_by_zero() {
        let scored = vec![ScoredSubject {
            subject: Subject::new("Zero"),
            score: 0,
        }];
        let alloc = allocate(&scored, 4.0, 14);
        assert_eq!(alloc[0].allocated_hours, 1.0);
    }

    #[test]
    fn remaining_hours_never_negative() {
        let alloc = vec![SubjectAllocation {
            subject_id: "1".into(),
            subject_name: "Maths".into(),
            color: "#fff".into(),
            allocated_hours: 1.0,
        }];
        let mut pool = RemainingHours::from_allocations(&alloc);
        pool.consume("Maths", 1.5);
        assert_eq!(pool.get("Maths"), 0.0);
        assert_eq!(pool.get("Unknown"), 0.0);
    }

    proptest! {
        #[test]
        fn prop_allocation_floor_and_sum(
            specs in prop::collection::vec((1u8..=5, 1u8..=5, proptest::option::of(0i64..90)), 1..8),
            daily_hours in 1.0f64..16.0,
        ) {
            let now = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
            let subjects: Vec<Subject> = specs
                .iter()
                .enumerate()
                .map(|(i, (d, w, exam))| {
                    let s = Subject::new(format!("S{i}")).with_difficulty(*d).with_weightage(*w);
                    match exam {
                        Some(days) => s.with_exam_date(now + Duration::days(*days)),
                        None => s,
                    }
                })
                .collect();
            let alloc = allocate(&rank(&subjects, now), daily_hours, 14);
            let total: f64 = alloc.iter().map(|a| a.allocated_hours).sum();
            prop_assert!(alloc.iter().all(|a| a.allocated_hours >= 1.0));
            // each share rounds by at most 0.05
            prop_assert!(total >= daily_hours * 14.0 - 0.05 * alloc.len() as f64 - 1e-9);
        }
    }
}
