//! Integration tests for rescheduling missed sessions on generated plans.

use chrono::{TimeZone, Utc};
use studyplan_core::schedule::RESCHEDULED_NOTE;
use studyplan_core::{
    DayPlan, FixedClock, PlannerConfig, PreferredTime, Profile, RedistributionEngine, RedistributionPolicy,
    StudyPlanner, Subject, TaskType, Timetable,
};

/// Two subjects at 2.5h/day gives exactly two 50-minute study tasks per
/// study day and no revision block.
fn generated_plan() -> Timetable {
    let planner = StudyPlanner::with_clock(
        PlannerConfig {
            seed: Some(11),
            ..Default::default()
        },
        FixedClock(Utc.with_ymd_and_hms(2026, 9, 7, 6, 0, 0).unwrap()),
    );
    let subjects = vec![Subject::new("Biology"), Subject::new("Economics")];
    planner
        .generate(&subjects, &Profile::new(2.5, PreferredTime::Evening))
        .unwrap()
}

fn study_count(day: &DayPlan) -> usize {
    day.tasks.iter().filter(|t| t.task_type == TaskType::Study).count()
}

#[test]
fn test_generated_day_shape() {
    let plan = generated_plan();
    assert_eq!(study_count(&plan.plan[3]), 2);
    assert_eq!(plan.plan[3].tasks.len(), 2);
}

#[test]
fn test_stale_redistribution_scenario() {
    let mut plan = generated_plan();
    let before = plan.clone();
    let missed: Vec<_> = before.plan[3].tasks.clone();

    let result = RedistributionEngine::with_policy(RedistributionPolicy::stale()).redistribute(&mut plan, 3);
    assert_eq!(result.moved.len(), 2);
    assert!(result.dropped.is_empty());

    // first clone lands on day 4, second on day 5
    let day4_clone = plan.plan[4].tasks.last().unwrap();
    let day5_clone = plan.plan[5].tasks.last().unwrap();
    assert_eq!(day4_clone.subject, missed[0].subject);
    assert_eq!(day5_clone.subject, missed[1].subject);
    assert_eq!(day4_clone.notes, RESCHEDULED_NOTE);
    assert_ne!(day4_clone.id, missed[0].id);
    assert!(!day4_clone.completed);

    assert_eq!(study_count(&plan.plan[4]), study_count(&before.plan[4]) + 1);
    assert_eq!(study_count(&plan.plan[5]), study_count(&before.plan[5]) + 1);

    // aggregates are left as generated
    for i in [4, 5] {
        assert_eq!(plan.plan[i].total_hours, before.plan[i].total_hours);
        assert_eq!(plan.plan[i].burnout_risk, before.plan[i].burnout_risk);
    }
    // originals stay on the source day
    assert_eq!(plan.plan[3], before.plan[3]);
}

#[test]
fn test_default_redistribution_recomputes_hours() {
    let mut plan = generated_plan();
    let before = plan.clone();
    RedistributionEngine::new().redistribute(&mut plan, 3);

    for i in [4, 5] {
        assert_eq!(plan.plan[i].total_hours, plan.plan[i].load_hours());
        assert!(plan.plan[i].total_hours > before.plan[i].total_hours);
    }
    assert_eq!(plan.plan[3].total_hours, before.plan[3].total_hours);
}

#[test]
fn test_remove_missed_shrinks_source_day() {
    let mut plan = generated_plan();
    let engine = RedistributionEngine::with_policy(RedistributionPolicy::new().with_remove_missed(true));
    engine.redistribute(&mut plan, 3);

    assert_eq!(study_count(&plan.plan[3]), 0);
    assert_eq!(plan.plan[3].total_hours, 0.0);
}

#[test]
fn test_completed_tasks_stay_put() {
    let mut plan = generated_plan();
    assert!(plan.toggle_task(3, 0).unwrap());

    let result = RedistributionEngine::new().redistribute(&mut plan, 3);
    assert_eq!(result.moved.len(), 1);
    assert_eq!(result.moved[0].target_day, 4);
    assert_eq!(result.moved[0].source_task_id, plan.plan[3].tasks[1].id);
}

#[test]
fn test_rest_day_and_end_of_plan() {
    let mut plan = generated_plan();
    // day 12 is the last study day; day 13 is a rest day and there is no day 14
    assert!(plan.plan[13].is_rest_day);
    let result = RedistributionEngine::new().redistribute(&mut plan, 12);

    assert_eq!(result.moved.len(), 1);
    assert_eq!(result.moved[0].target_day, 13);
    assert_eq!(result.dropped.len(), 1);
    assert_eq!(result.dropped[0].target_day, 14);
    assert_eq!(plan.plan[13].tasks.len(), 2);
}

#[test]
fn test_rest_day_has_nothing_to_move() {
    let mut plan = generated_plan();
    let result = RedistributionEngine::new().redistribute(&mut plan, 6);
    assert!(result.is_empty());
}

#[test]
fn test_toggle_round_trip_and_progress() {
    let mut plan = generated_plan();
    let original = plan.clone();

    assert!(plan.toggle_task(0, 1).unwrap());
    assert!(plan.completion_rate() > 0.0);
    assert!(!plan.toggle_task(0, 1).unwrap());
    assert_eq!(plan, original);
    assert_eq!(plan.completion_rate(), 0.0);

    assert!(plan.toggle_task(0, 9).is_err());
    assert!(plan.toggle_task(99, 0).is_err());
}
