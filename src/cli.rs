use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ecoscore",
    version,
    about = "Trip eco-efficiency scoring and behavioral profiling CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding ecoscore.toml
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a single trip
    Score(ScoreCommand),
    /// Score a trip and store it in a dataset
    Submit(SubmitCommand),
    /// Append a batch of telemetry events to a dataset
    Ingest(IngestCommand),
    /// List stored trips with recomputed scores
    Trips(TripsCommand),
    /// Build a user's behavioral profile from stored telemetry
    Analyze(AnalyzeCommand),
    /// Aggregate statistics over stored trips
    Stats(StatsCommand),
    /// Print the active tag rule table
    Rules(RulesCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TierArg {
    Warrior,
    Neutral,
    Criminal,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Mode of transport (car, bike, public_transport, walking, other, airplane)
    #[arg(long)]
    pub vehicle: String,
    /// Distance in kilometres
    #[arg(long, allow_negative_numbers = true)]
    pub distance: f64,
    /// Duration in minutes
    #[arg(long, allow_negative_numbers = true)]
    pub duration: f64,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct SubmitCommand {
    pub dataset: PathBuf,
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub vehicle: String,
    /// Distance in kilometres
    #[arg(long, allow_negative_numbers = true)]
    pub distance: f64,
    /// Duration in minutes
    #[arg(long, allow_negative_numbers = true)]
    pub duration: f64,
    /// Trip id; defaults to the next free `t<n>`
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub origin: Option<String>,
    #[arg(long)]
    pub destination: Option<String>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct IngestCommand {
    pub dataset: PathBuf,
    /// JSON array of events, or an object with an `events` array
    pub events: PathBuf,
    /// Assign every event in the batch to this user
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Args)]
pub struct TripsCommand {
    pub dataset: PathBuf,
    #[arg(long)]
    pub user: Option<String>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct AnalyzeCommand {
    pub dataset: PathBuf,
    #[arg(long)]
    pub user: String,
    /// Only use events at or after this RFC 3339 timestamp
    #[arg(long)]
    pub since: Option<String>,
    /// Store the refreshed profile back into the dataset
    #[arg(long)]
    pub write: bool,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct StatsCommand {
    pub dataset: PathBuf,
    #[arg(long)]
    pub vehicle: Option<String>,
    #[arg(long, value_enum)]
    pub tier: Option<TierArg>,
    #[arg(long)]
    pub user: Option<String>,
    /// RFC 3339 lower bound on trip creation time
    #[arg(long)]
    pub from: Option<String>,
    /// RFC 3339 upper bound on trip creation time
    #[arg(long)]
    pub to: Option<String>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct RulesCommand {
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}
