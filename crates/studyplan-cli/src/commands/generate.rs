use std::path::PathBuf;

use clap::Args;
use studyplan_core::{Config, PreferredTime, Profile, StudyPlanner};

use super::document::{self, CmdResult};

#[derive(Args)]
pub struct GenerateArgs {
    /// Subject roster (JSON array or TOML `[[subjects]]`)
    #[arg(long)]
    subjects: PathBuf,
    /// Learner profile; defaults to the `profile` config section
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Override daily study hours
    #[arg(long)]
    hours: Option<f64>,
    /// Override preferred time (morning, afternoon, evening, night)
    #[arg(long)]
    preferred_time: Option<PreferredTime>,
    /// Seed for a reproducible plan
    #[arg(long)]
    seed: Option<u64>,
    /// Write the timetable here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

pub fn run(args: GenerateArgs) -> CmdResult {
    let config = Config::load_or_default();
    let mut planner_config = config.planner_config()?;
    if args.seed.is_some() {
        planner_config.seed = args.seed;
    }

    let subjects = document::read_subjects(&args.subjects)?;
    let mut profile: Profile = match &args.profile {
        Some(path) => document::read(path)?,
        None => config.default_profile(),
    };
    if let Some(hours) = args.hours {
        profile.daily_hours = hours;
    }
    if let Some(preferred_time) = args.preferred_time {
        profile.preferred_time = preferred_time;
    }

    let timetable = StudyPlanner::with_config(planner_config).generate(&subjects, &profile)?;
    document::write(&timetable, args.out.as_deref())?;
    if let Some(out) = &args.out {
        println!(
            "timetable written to {} ({} days, {:.1} hours planned)",
            out.display(),
            timetable.plan.len(),
            timetable.planned_hours()
        );
    }
    Ok(())
}
