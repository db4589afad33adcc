use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studyplan", version, about = "Studyplan CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a timetable from a subject roster
    Generate(commands::generate::GenerateArgs),
    /// Reschedule the missed study tasks of one day
    Redistribute(commands::redistribute::RedistributeArgs),
    /// Flip the completed flag of one task
    Toggle(commands::toggle::ToggleArgs),
    /// Show priority scores for a subject roster
    Priority(commands::priority::PriorityArgs),
    /// Suggest spaced-repetition dates before an exam
    Revisions(commands::revisions::RevisionsArgs),
    /// Estimate burnout risk for a day's load
    Burnout(commands::burnout::BurnoutArgs),
    /// Summarize study analytics
    Insights(commands::insights::InsightsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Redistribute(args) => commands::redistribute::run(args),
        Commands::Toggle(args) => commands::toggle::run(args),
        Commands::Priority(args) => commands::priority::run(args),
        Commands::Revisions(args) => commands::revisions::run(args),
        Commands::Burnout(args) => commands::burnout::run(args),
        Commands::Insights(args) => commands::insights::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
