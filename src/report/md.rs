use super::Report;
use crate::behavior::rules::RuleSet;
use crate::stats::OverviewStats;
use crate::types::report::{ProfileReport, ScoreReport};
use crate::types::telemetry::MetricKind;
use crate::types::trip::ScoredTrip;

pub fn to_markdown(report: Report<'_>) -> String {
    match report {
        Report::Score(score) => score_markdown(score),
        Report::Trips(trips) => trips_markdown(trips),
        Report::Profile(profile) => profile_markdown(profile),
        Report::Stats(stats) => stats_markdown(stats),
        Report::Rules(rules) => rules_markdown(rules),
    }
}

fn score_markdown(report: &ScoreReport) -> String {
    let mut output = String::new();
    output.push_str("# Trip Score\n\n");
    output.push_str(&format!(
        "- vehicle: {}\n- distance: {} km\n- duration: {} min\n\n",
        report.vehicle, report.distance_km, report.duration_min
    ));
    output.push_str(&format!(
        "Efficiency score: {} ({}, {})\n",
        report.score.efficiency_score, report.score.status, report.score.color
    ));
    output
}

fn trips_markdown(trips: &[ScoredTrip]) -> String {
    let mut output = String::new();
    output.push_str("# Trips\n\n");
    if trips.is_empty() {
        output.push_str("- none\n");
        return output;
    }
    output.push_str("| id | user | vehicle | km | min | score | status |\n");
    output.push_str("|---|---|---|---|---|---|---|\n");
    for trip in trips {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            trip.record.id,
            trip.record.user_id,
            trip.record.vehicle,
            trip.record.distance_km,
            trip.record.duration_min,
            trip.score.efficiency_score,
            trip.score.status
        ));
    }
    output
}

fn profile_markdown(report: &ProfileReport) -> String {
    let profile = &report.profile;
    let mut output = String::new();
    output.push_str(&format!("# Behavioral Profile: {}\n\n", profile.user_id));
    output.push_str(&format!(
        "Analyzed {} events at {}\n\n",
        profile.data_points,
        profile.analyzed_at.to_rfc3339()
    ));
    output.push_str("## Tags\n\n");
    for tag in &profile.tags {
        output.push_str(&format!("- {tag}\n"));
    }
    output.push('\n');

    output.push_str(&format!(
        "## Metrics\n\n| metric | user | population (n={}) |\n|---|---|---|\n",
        report.population_size
    ));
    for kind in MetricKind::ALL {
        output.push_str(&format!(
            "| {} | {:.3} | {:.3} |\n",
            kind,
            profile.metrics.value(kind),
            report.population.value(kind)
        ));
    }
    output
}

fn stats_markdown(stats: &OverviewStats) -> String {
    let mut output = String::new();
    output.push_str("# Trip Statistics\n\n");
    output.push_str(&format!(
        "- trips: {}\n- users: {}\n- average efficiency: {:.1}\n\n",
        stats.total_trips, stats.distinct_users, stats.average_efficiency
    ));

    output.push_str("## Vehicles\n\n");
    if stats.vehicles.is_empty() {
        output.push_str("- none\n");
    }
    for vehicle in &stats.vehicles {
        output.push_str(&format!(
            "- {}: {} trips, {:.1} km, avg {:.1}\n",
            vehicle.vehicle, vehicle.trips, vehicle.total_distance_km, vehicle.average_efficiency
        ));
    }

    output.push_str("\n## Tiers\n\n");
    for tier in &stats.tiers {
        output.push_str(&format!("- {}: {}\n", tier.tier, tier.trips));
    }

    output.push_str("\n## Monthly Activity\n\n");
    if stats.monthly.is_empty() {
        output.push_str("- none\n");
    }
    for month in &stats.monthly {
        output.push_str(&format!(
            "- {}: {} trips, avg {:.1}\n",
            month.month, month.trips, month.average_efficiency
        ));
    }

    output.push_str("\n## User Rankings\n\n");
    if stats.rankings.is_empty() {
        output.push_str("- none\n");
    }
    for (rank, user) in stats.rankings.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} (avg {:.1}, {} trips, {:.1} km)\n",
            rank + 1,
            user.user_id,
            user.average_efficiency,
            user.trips,
            user.total_distance_km
        ));
    }

    output.push_str("\n## Hourly Pattern\n\n");
    if stats.hourly.is_empty() {
        output.push_str("- none\n");
    }
    for hour in &stats.hourly {
        output.push_str(&format!("- {:02}:00 {}\n", hour.hour, hour.trips));
    }
    output
}

fn rules_markdown(rules: &RuleSet) -> String {
    let mut output = String::new();
    output.push_str("# Tag Rules\n\n");
    for rule in &rules.rules {
        let conditions = rule
            .when
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" and ");
        output.push_str(&format!("- **{}**: {}", rule.tag, conditions));
        if !rule.description.is_empty() {
            output.push_str(&format!(" ({})", rule.description));
        }
        output.push('\n');
    }
    output.push_str(&format!("\nFallback: {}\n", rules.fallback));
    output
}
