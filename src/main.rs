mod cli;

use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use ecoscore::behavior::TelemetryAnalyzer;
use ecoscore::config;
use ecoscore::error::{EcoError, Result};
use ecoscore::logging;
use ecoscore::report::{self, OutputFormat, Report};
use ecoscore::scoring::ScoreEngine;
use ecoscore::service::{self, ProfileService, TripService};
use ecoscore::stats::{self, StatsFilter};
use ecoscore::store::{dataset, ProfileStore};
use ecoscore::types::config::EcoConfig;
use ecoscore::types::report::{ProfileReport, ScoreReport};
use ecoscore::types::trip::{Tier, Trip, TripRecord, Vehicle};
use tracing::{info, warn};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet)?;

    if !cli.config_dir.exists() {
        return Err(EcoError::PathNotFound(cli.config_dir.display().to_string()));
    }
    let loaded = config::load_config(&cli.config_dir)?;
    let missing_config = loaded.is_none();
    if missing_config {
        warn!(
            dir = %cli.config_dir.display(),
            "no {} found; using built-in defaults",
            config::DEFAULT_CONFIG_FILE
        );
    }
    let cfg = loaded.unwrap_or_default();
    let engine = ScoreEngine::new(cfg.tier_thresholds());

    let mut warnings = missing_config;
    match cli.command {
        cli::Commands::Score(cmd) => {
            let vehicle = parse_vehicle(&cmd.vehicle)?;
            service::validate_measure("distance", cmd.distance)?;
            service::validate_measure("duration", cmd.duration)?;

            let score = engine.score(&Trip::new(vehicle, cmd.distance, cmd.duration));
            let score_report = ScoreReport {
                vehicle,
                distance_km: cmd.distance,
                duration_min: cmd.duration,
                score,
            };
            print_report(Report::Score(&score_report), cmd.format)?;
        }
        cli::Commands::Submit(cmd) => {
            let vehicle = parse_vehicle(&cmd.vehicle)?;
            let mut store = dataset::load(&cmd.dataset)?;
            let id = match cmd.id {
                Some(id) => id,
                None => service::next_trip_id(&store.trips),
            };
            let record = TripRecord {
                id,
                user_id: cmd.user,
                origin: cmd.origin,
                destination: cmd.destination,
                vehicle,
                distance_km: cmd.distance,
                duration_min: cmd.duration,
                created_at: Utc::now(),
            };

            let scored = TripService::new(engine).submit(&mut store, record)?;
            dataset::save(&cmd.dataset, &store)?;
            print_report(Report::Trips(std::slice::from_ref(&scored)), cmd.format)?;
        }
        cli::Commands::Ingest(cmd) => {
            let mut store = dataset::load(&cmd.dataset)?;
            let events = dataset::load_events(&cmd.events)?;
            let count = service::ingest_events(&mut store, events, cmd.user.as_deref())?;
            dataset::save(&cmd.dataset, &store)?;
            println!("ingested {count} events into {}", cmd.dataset.display());
        }
        cli::Commands::Trips(cmd) => {
            let store = dataset::load(&cmd.dataset)?;
            let trips = TripService::new(engine).scored_trips(&store, cmd.user.as_deref())?;
            info!(trips = trips.len(), "scored stored trips");
            print_report(Report::Trips(&trips), cmd.format)?;
        }
        cli::Commands::Analyze(cmd) => {
            let now = Utc::now();
            let since = match cmd.since.as_deref() {
                Some(raw) => Some(parse_timestamp("--since", raw)?),
                None => lookback_start(&cfg, now),
            };

            let mut store = dataset::load(&cmd.dataset)?;
            let profiles = ProfileService::new(TelemetryAnalyzer::new(
                cfg.analyzer_settings(),
                cfg.rule_set(),
            ));
            let profile = if cmd.write {
                let profile = profiles.refresh(&mut store, &cmd.user, since, now)?;
                dataset::save(&cmd.dataset, &store)?;
                profile
            } else {
                profiles.build_profile(&store, &cmd.user, since, now)?
            };

            if profile.data_points == 0 {
                warn!(user = %cmd.user, "no telemetry events for user; profile is neutral");
                warnings = true;
            }

            let population = store.profiles()?;
            let profile_report = ProfileReport {
                profile,
                population: service::average_metrics(&population),
                population_size: population.len(),
            };
            print_report(Report::Profile(&profile_report), cmd.format)?;
        }
        cli::Commands::Stats(cmd) => {
            let filter = StatsFilter {
                vehicle: cmd.vehicle.as_deref().map(parse_vehicle).transpose()?,
                tier: cmd.tier.map(|tier| match tier {
                    cli::TierArg::Warrior => Tier::EcoWarrior,
                    cli::TierArg::Neutral => Tier::EcoNeutral,
                    cli::TierArg::Criminal => Tier::ClimateCriminal,
                }),
                user_id: cmd.user.clone(),
                from: cmd
                    .from
                    .as_deref()
                    .map(|raw| parse_timestamp("--from", raw))
                    .transpose()?,
                to: cmd
                    .to
                    .as_deref()
                    .map(|raw| parse_timestamp("--to", raw))
                    .transpose()?,
            };

            let store = dataset::load(&cmd.dataset)?;
            let trips = TripService::new(engine).scored_trips(&store, None)?;
            let overview = stats::overview(&trips, &filter);
            print_report(Report::Stats(&overview), cmd.format)?;
        }
        cli::Commands::Rules(cmd) => {
            let rules = cfg.rule_set();
            print_report(Report::Rules(&rules), cmd.format)?;
        }
    }

    if warnings {
        Ok(exit_code::WARNINGS)
    } else {
        Ok(exit_code::SUCCESS)
    }
}

fn print_report(report: Report<'_>, format: cli::ReportFormat) -> Result<()> {
    let format = match format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    };
    let rendered = report::render(report, format)?;
    println!("{rendered}");
    Ok(())
}

fn parse_vehicle(raw: &str) -> Result<Vehicle> {
    match raw.parse::<Vehicle>().unwrap_or(Vehicle::Unrecognized) {
        Vehicle::Unrecognized => Err(EcoError::InvalidTrip(format!(
            "unrecognized vehicle: {raw}"
        ))),
        vehicle => Ok(vehicle),
    }
}

fn parse_timestamp(flag: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| EcoError::InvalidArgument(format!("{flag} '{raw}': {e}")))
}

fn lookback_start(cfg: &EcoConfig, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    cfg.lookback_minutes()
        .map(|minutes| now - Duration::minutes(i64::from(minutes)))
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_invalid_input() {
                exit_code::INVALID_INPUT
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
