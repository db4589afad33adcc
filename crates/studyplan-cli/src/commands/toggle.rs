use std::path::PathBuf;

use clap::Args;
use studyplan_core::Timetable;

use super::document::{self, CmdResult};

#[derive(Args)]
pub struct ToggleArgs {
    /// Timetable to update
    #[arg(long)]
    plan: PathBuf,
    /// Zero-based day index
    #[arg(long)]
    day: usize,
    /// Zero-based task index within the day
    #[arg(long)]
    task: usize,
    /// Write the updated timetable here instead of back to --plan
    #[arg(long)]
    out: Option<PathBuf>,
}

pub fn run(args: ToggleArgs) -> CmdResult {
    let mut timetable: Timetable = document::read(&args.plan)?;
    let completed = timetable.toggle_task(args.day, args.task)?;

    let out = args.out.as_deref().unwrap_or(&args.plan);
    document::write(&timetable, Some(out))?;
    println!("{}", if completed { "completed" } else { "pending" });
    println!("progress: {:.0}%", timetable.completion_rate() * 100.0);
    Ok(())
}
