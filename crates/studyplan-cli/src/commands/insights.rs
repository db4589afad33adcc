use std::path::PathBuf;

use clap::Args;
use serde_json::json;
use studyplan_core::{generate_insights, AnalyticsSummary};

use super::document::{self, CmdResult};

#[derive(Args)]
pub struct InsightsArgs {
    /// Analytics log (JSON array or TOML `[[entries]]`)
    #[arg(long)]
    analytics: PathBuf,
    /// Window length in days for the consistency score
    #[arg(long, default_value = "14")]
    days: u32,
}

pub fn run(args: InsightsArgs) -> CmdResult {
    let entries = document::read_analytics(&args.analytics)?;
    let summary = AnalyticsSummary::from_entries(&entries, args.days);
    let insights = generate_insights(&entries);
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({ "summary": summary, "insights": insights }))?
    );
    Ok(())
}
