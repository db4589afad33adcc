//! Daily study slot templates.
//!
//! Each preferred time-of-day bucket has five fixed start times. A day uses
//! as many as its hour budget needs at 90 minutes per slot, never more than
//! five. The first slot of the day is the peak slot.

use serde::{Deserialize, Serialize};

use crate::subject::PreferredTime;
use crate::time::{hm, TimeOfDay};

/// Nominal slot length in minutes.
pub const SLOT_MINUTES: u32 = 90;

/// Maximum slots in one day.
pub const MAX_SLOTS: usize = 5;

static MORNING: [TimeOfDay; MAX_SLOTS] = [hm(6, 0), hm(7, 30), hm(9, 0), hm(10, 30), hm(12, 0)];
static AFTERNOON: [TimeOfDay; MAX_SLOTS] = [hm(13, 0), hm(14, 30), hm(16, 0), hm(17, 30), hm(19, 0)];
static EVENING: [TimeOfDay; MAX_SLOTS] = [hm(17, 0), hm(18, 30), hm(20, 0), hm(21, 0), hm(22, 0)];
static NIGHT: [TimeOfDay; MAX_SLOTS] = [hm(19, 0), hm(20, 30), hm(22, 0), hm(23, 0), hm(23, 30)];

/// A candidate study slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: TimeOfDay,
    /// Minutes
    pub duration: u32,
    pub is_peak: bool,
}

/// Start times for a preferred time-of-day bucket.
pub fn template(preferred: PreferredTime) -> &'static [TimeOfDay; MAX_SLOTS] {
    match preferred {
        PreferredTime::Morning => &MORNING,
        PreferredTime::Afternoon => &AFTERNOON,
        PreferredTime::Evening => &EVENING,
        PreferredTime::Night => &NIGHT,
    }
}

/// Number of slots needed to cover `hours`: `ceil(hours × 60 / 90)`, capped.
pub fn slot_count(hours: f64) -> usize {
    if hours <= 0.0 {
        return 0;
    }
    let needed = (hours * 60.0 / SLOT_MINUTES as f64).ceil() as usize;
    needed.min(MAX_SLOTS)
}

/// Slots for a day with `hours` of study time.
pub fn slots_for_day(preferred: PreferredTime, hours: f64) -> Vec<TimeSlot> {
    template(preferred)
        .iter()
        .take(slot_count(hours))
        .enumerate()
        .map(|(i, &start)| TimeSlot {
            start,
            duration: SLOT_MINUTES,
            is_peak: i == 0,
        })
        .collect()
}
