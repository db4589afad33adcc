use std::path::PathBuf;

use clap::Args;
use studyplan_core::{RedistributionEngine, RedistributionPolicy, Timetable};

use super::document::{self, CmdResult};

#[derive(Args)]
pub struct RedistributeArgs {
    /// Timetable to update
    #[arg(long)]
    plan: PathBuf,
    /// Zero-based index of the day whose missed study tasks move forward
    #[arg(long)]
    day: usize,
    /// Leave hours and burnout risk of receiving days as they were
    #[arg(long)]
    stale: bool,
    /// Remove the missed tasks from their original day
    #[arg(long)]
    remove_missed: bool,
    /// Write the updated timetable here instead of back to --plan
    #[arg(long)]
    out: Option<PathBuf>,
}

pub fn run(args: RedistributeArgs) -> CmdResult {
    let mut timetable: Timetable = document::read(&args.plan)?;

    let policy = if args.stale {
        RedistributionPolicy::stale()
    } else {
        RedistributionPolicy::new()
    }
    .with_remove_missed(args.remove_missed);

    let result = RedistributionEngine::with_policy(policy).redistribute(&mut timetable, args.day);
    if !result.dropped.is_empty() {
        tracing::warn!(
            dropped = result.dropped.len(),
            "missed tasks fell past the end of the plan"
        );
    }

    let out = args.out.as_deref().unwrap_or(&args.plan);
    document::write(&timetable, Some(out))?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
