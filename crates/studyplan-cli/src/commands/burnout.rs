use clap::Args;
use serde_json::json;
use studyplan_core::burnout;

use super::document::CmdResult;

#[derive(Args)]
pub struct BurnoutArgs {
    /// Study hours planned for the day
    #[arg(long)]
    hours: f64,
    /// Consecutive study days including this one
    #[arg(long)]
    streak: u32,
    /// Number of tasks on the day
    #[arg(long)]
    tasks: usize,
}

pub fn run(args: BurnoutArgs) -> CmdResult {
    let score = burnout::burnout_score(args.hours, args.streak, args.tasks);
    let risk = burnout::risk(args.hours, args.streak, args.tasks);
    println!("{}", serde_json::to_string_pretty(&json!({ "score": score, "risk": risk }))?);
    Ok(())
}
