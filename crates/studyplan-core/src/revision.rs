//! Spaced-repetition revision dates ahead of an exam.
//!
//! Advisory only: the day planner does not turn these into tasks.

use chrono::{DateTime, Duration, Utc};

use crate::priority::days_left;

/// Days before the exam at which a revision is recommended.
pub const REVISION_GAPS_DAYS: [i64; 5] = [1, 3, 7, 14, 21];

/// Revision dates still ahead of `now`, ascending.
///
/// A gap is kept only if its date is strictly in the future and the gap is
/// shorter than the days left until the exam.
pub fn revision_dates(exam_date: DateTime<Utc>, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let left = days_left(Some(exam_date), now);
    let mut dates: Vec<DateTime<Utc>> = REVISION_GAPS_DAYS
        .iter()
        .filter(|&&gap| gap < left)
        .map(|&gap| exam_date - Duration::days(gap))
        .filter(|date| *date > now)
        .collect();
    dates.sort();
    dates
}
