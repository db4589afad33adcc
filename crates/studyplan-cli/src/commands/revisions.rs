use chrono::Utc;
use clap::Args;
use studyplan_core::revision::revision_dates;
use studyplan_core::subject::parse_exam_date;

use super::document::CmdResult;

#[derive(Args)]
pub struct RevisionsArgs {
    /// Exam date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    exam: String,
    /// Reference time instead of now (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    from: Option<String>,
}

pub fn run(args: RevisionsArgs) -> CmdResult {
    let exam = parse_exam_date(&args.exam).ok_or_else(|| format!("invalid exam date: {}", args.exam))?;
    let now = match &args.from {
        Some(raw) => parse_exam_date(raw).ok_or_else(|| format!("invalid reference date: {raw}"))?,
        None => Utc::now(),
    };

    let dates: Vec<String> = revision_dates(exam, now)
        .into_iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    println!("{}", serde_json::to_string_pretty(&dates)?);
    Ok(())
}
