//! Study analytics summaries and advisory insights.
//!
//! Works over daily [`AnalyticsEntry`] records supplied by the caller (one
//! per logged day). Nothing here is persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::allocation::round1;
use crate::burnout::BurnoutRisk;

/// Minutes spent on one subject during a logged day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectMinutes {
    pub name: String,
    pub minutes: u32,
}

/// One day of logged study activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsEntry {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub planned_hours: f64,
    #[serde(default)]
    pub completed_hours: f64,
    #[serde(default)]
    pub focus_score: f64,
    #[serde(default)]
    pub subjects_studied: Vec<SubjectMinutes>,
    #[serde(default)]
    pub burnout_level: BurnoutRisk,
    #[serde(default)]
    pub sessions_completed: u32,
    #[serde(default)]
    pub sessions_missed: u32,
}

/// Aggregate view over a window of analytics entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsSummary {
    pub total_planned: f64,
    pub total_completed: f64,
    /// Percent, rounded
    pub completion_rate: u32,
    /// Percent of the window with any completed study, rounded
    pub consistency_score: u32,
    pub study_days: usize,
    pub subject_breakdown: Vec<SubjectMinutes>,
}

impl AnalyticsSummary {
    /// Summarize `entries` over a window of `window_days` days.
    pub fn from_entries(entries: &[AnalyticsEntry], window_days: u32) -> Self {
        let total_planned: f64 = entries.iter().map(|e| e.planned_hours).sum();
        let total_completed: f64 = entries.iter().map(|e| e.completed_hours).sum();
        let completion_rate = if total_planned > 0.0 {
            (total_completed / total_planned * 100.0).round() as u32
        } else {
            0
        };
        let study_days = entries.iter().filter(|e| e.completed_hours > 0.0).count();
        let consistency_score = if window_days > 0 {
            (study_days as f64 / window_days as f64 * 100.0).round() as u32
        } else {
            0
        };

        let mut by_subject: BTreeMap<&str, u32> = BTreeMap::new();
        for studied in entries.iter().flat_map(|e| &e.subjects_studied) {
            *by_subject.entry(studied.name.as_str()).or_insert(0) += studied.minutes;
        }

        Self {
            total_planned: round1(total_planned),
            total_completed: round1(total_completed),
            completion_rate,
            consistency_score,
            study_days,
            subject_breakdown: by_subject
                .into_iter()
                .map(|(name, minutes)| SubjectMinutes {
                    name: name.to_string(),
                    minutes,
                })
                .collect(),
        }
    }
}

/// Planned hours floor so a zero-plan day does not divide by zero.
const MIN_PLANNED_HOURS: f64 = 0.1;

/// Active days needed for the streak message.
const STREAK_DAYS: usize = 7;

/// Advisory messages derived from recent activity.
pub fn generate_insights(entries: &[AnalyticsEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["Start completing tasks to unlock insights!".to_string()];
    }

    let mut insights = Vec::new();
    let avg_rate = entries
        .iter()
        .map(|e| e.completed_hours / e.planned_hours.max(MIN_PLANNED_HOURS))
        .sum::<f64>()
        / entries.len() as f64;

    if avg_rate < 0.5 {
        insights.push("Completion rate below 50% - consider reducing daily targets.".to_string());
    } else if avg_rate >= 0.9 {
        insights.push("Outstanding completion rate - you're ahead of schedule!".to_string());
    } else {
        insights.push("Good progress - aim for 90% completion to unlock streak bonuses.".to_string());
    }

    let active_days = entries.iter().filter(|e| e.completed_hours > 0.0).count();
    if active_days >= STREAK_DAYS {
        insights.push(format!("{active_days}-day study streak - incredible consistency!"));
    }

    insights.push("Tip: schedule your hardest subjects during your peak energy window.".to_string());
    insights.push("Spaced repetition dates are suggested 1, 3, 7, 14 and 21 days before each exam.".to_string());
    insights
}
