//! Burnout risk estimation for a single planned day.

use serde::{Deserialize, Serialize};

/// Risk label attached to each day plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BurnoutRisk {
    #[default]
    Low,
    Medium,
    High,
}

impl BurnoutRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            BurnoutRisk::Low => "low",
            BurnoutRisk::Medium => "medium",
            BurnoutRisk::High => "high",
        }
    }
}

impl std::fmt::Display for BurnoutRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Additive burnout score before it is bucketed.
pub fn burnout_score(hours_used: f64, consecutive_days: u32, task_count: usize) -> u32 {
    let mut score = 0;
    if hours_used > 8.0 {
        score += 3;
    } else if hours_used > 6.0 {
        score += 1;
    }
    if consecutive_days >= 6 {
        score += 3;
    } else if consecutive_days >= 4 {
        score += 1;
    }
    if task_count > 6 {
        score += 2;
    }
    score
}

/// Bucket a day's load into a risk level: high at 4+, medium at 2+.
pub fn risk(hours_used: f64, consecutive_days: u32, task_count: usize) -> BurnoutRisk {
    match burnout_score(hours_used, consecutive_days, task_count) {
        s if s >= 4 => BurnoutRisk::High,
        s if s >= 2 => BurnoutRisk::Medium,
        _ => BurnoutRisk::Low,
    }
}
