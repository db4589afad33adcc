//! Subject priority scoring.
//!
//! `score = urgency(days_left) × difficulty × weightage`
//!
//! Urgency is a step function of the days remaining until the exam.
//! Subjects without an exam date sit on a far horizon of
//! [`FAR_HORIZON_DAYS`]. This is the only place the formula lives: the
//! planner and [`Subject::refresh_priority`](crate::Subject::refresh_priority)
//! both call [`score`].

use chrono::{DateTime, Utc};

use crate::subject::Subject;

/// Days-left value used when a subject has no exam date.
pub const FAR_HORIZON_DAYS: i64 = 60;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days until `exam_date`, rounded up, never below 1.
pub fn days_left(exam_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    let Some(exam) = exam_date else {
        return FAR_HORIZON_DAYS;
    };
    let millis = (exam - now).num_milliseconds();
    if millis <= 0 {
        return 1;
    }
    let day_millis = SECONDS_PER_DAY * 1000;
    ((millis + day_millis - 1) / day_millis).max(1)
}

/// Step-function urgency. Thresholds are inclusive, first match wins.
pub fn urgency(days_left: i64) -> u32 {
    match days_left {
        i64::MIN..=3 => 10,
        4..=7 => 8,
        8..=14 => 6,
        15..=30 => 4,
        _ => 2,
    }
}

/// Importance score of a subject at `now`.
pub fn score(subject: &Subject, now: DateTime<Utc>) -> u32 {
    urgency(days_left(subject.exam_date, now)) * subject.difficulty as u32 * subject.weightage as u32
}

/// A subject paired with its score, highest first when sorted with
/// [`rank`].
#[derive(Debug, Clone)]
pub struct ScoredSubject {
    pub subject: Subject,
    pub score: u32,
}

/// Score every subject and sort by score descending. Ties keep roster order.
pub fn rank(subjects: &[Subject], now: DateTime<Utc>) -> Vec<ScoredSubject> {
    let mut scored: Vec<ScoredSubject> = subjects
        .iter()
        .map(|s| ScoredSubject {
            subject: s.clone(),
            score: score(s, now),
        })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn days_left_rounds_up_partial_days() {
        let now = now();
        assert_eq!(days_left(Some(now + Duration::hours(1)), now), 1);
        assert_eq!(days_left(Some(now + Duration::hours(25)), now), 2);
        assert_eq!(days_left(Some(now + Duration::days(7)), now), 7);
    }

    #[test]
    fn days_left_never_below_one() {
        let now = now();
        assert_eq!(days_left(Some(now), now), 1);
        assert_eq!(days_left(Some(now - Duration::days(30)), now), 1);
    }

    #[test]
    fn missing_exam_uses_far_horizon() {
        assert_eq!(days_left(None, now()), 60);
        assert_eq!(urgency(days_left(None, now())), 2);
    }

    #[test]
    fn urgency_thresholds_are_inclusive() {
        assert_eq!(urgency(1), 10);
        assert_eq!(urgency(3), 10);
        assert_eq!(urgency(4), 8);
        assert_eq!(urgency(7), 8);
        assert_eq!(urgency(8), 6);
        assert_eq!(urgency(14), 6);
        assert_eq!(urgency(15), 4);
        assert_eq!(urgency(30), 4);
        assert_eq!(urgency(31), 2);
    }

    #[test]
    fn hardest_heaviest_nearest_exam_scores_250() {
        let now = now();
        let s = Subject::new("Maths")
            .with_difficulty(5)
            .with_weightage(5)
            .with_exam_date(now + Duration::days(2));
        assert_eq!(score(&s, now), 250);
    }

    #[test]
    fn rank_orders_by_score_and_keeps_ties_stable() {
        let now = now();
        let a = Subject::new("A").with_difficulty(2);
        let b = Subject::new("B").with_difficulty(5);
        let c = Subject::new("C").with_difficulty(2);
        let ranked = rank(&[a, b, c], now);
        let names: Vec<_> = ranked.iter().map(|s| s.subject.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    proptest! {
        #[test]
        fn prop_days_left_at_least_one(offset_hours in -2000i64..2000) {
            let now = now();
            prop_assert!(days_left(Some(now + Duration::hours(offset_hours)), now) >= 1);
        }

        #[test]
        fn prop_urgency_non_increasing(d in 1i64..400) {
            prop_assert!(urgency(d) >= urgency(d + 1));
        }

        #[test]
        fn prop_doubling_weightage_doubles_score(
            difficulty in 1u8..=5,
            weightage in 1u8..=2,
            exam_days in 0i64..90,
        ) {
            let now = now();
            let base = Subject::new("S")
                .with_difficulty(difficulty)
                .with_weightage(weightage)
                .with_exam_date(now + Duration::days(exam_days));
            let doubled = base.clone().with_weightage(weightage * 2);
            prop_assert_eq!(score(&doubled, now), 2 * score(&base, now));
        }
    }
}
