use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use serde::Serialize;
use studyplan_core::priority;
use studyplan_core::Subject;

use super::document::{self, CmdResult};

#[derive(Args)]
pub struct PriorityArgs {
    /// Subject roster (JSON array or TOML `[[subjects]]`)
    #[arg(long)]
    subjects: PathBuf,
}

#[derive(Serialize)]
struct PriorityRow {
    name: String,
    days_left: i64,
    urgency: u32,
    difficulty: u8,
    weightage: u8,
    score: u32,
}

pub fn run(args: PriorityArgs) -> CmdResult {
    let now = Utc::now();
    let subjects: Vec<Subject> = document::read_subjects(&args.subjects)?
        .into_iter()
        .map(Subject::normalized)
        .collect();

    let rows: Vec<PriorityRow> = priority::rank(&subjects, now)
        .into_iter()
        .map(|scored| {
            let days_left = priority::days_left(scored.subject.exam_date, now);
            PriorityRow {
                days_left,
                urgency: priority::urgency(days_left),
                difficulty: scored.subject.difficulty,
                weightage: scored.subject.weightage,
                score: scored.score,
                name: scored.subject.name,
            }
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
