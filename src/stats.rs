//! Read-side aggregation over already-scored trips.

use crate::types::trip::{ScoredTrip, Tier, Vehicle};
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Every field narrows the selection; an empty filter keeps every trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsFilter {
    pub vehicle: Option<Vehicle>,
    pub tier: Option<Tier>,
    pub user_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl StatsFilter {
    pub fn matches(&self, trip: &ScoredTrip) -> bool {
        let record = &trip.record;
        self.vehicle.map_or(true, |vehicle| record.vehicle == vehicle)
            && self.tier.map_or(true, |tier| trip.score.status == tier)
            && self
                .user_id
                .as_deref()
                .map_or(true, |user| record.user_id == user)
            && self.from.map_or(true, |from| record.created_at >= from)
            && self.to.map_or(true, |to| record.created_at <= to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleStat {
    pub vehicle: Vehicle,
    pub trips: usize,
    pub total_distance_km: f64,
    pub average_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierStat {
    pub tier: Tier,
    pub trips: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthStat {
    /// `YYYY-MM`
    pub month: String,
    pub trips: usize,
    pub average_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRanking {
    pub user_id: String,
    pub trips: usize,
    pub total_distance_km: f64,
    pub average_efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourStat {
    pub hour: u32,
    pub trips: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewStats {
    pub total_trips: usize,
    pub distinct_users: usize,
    pub average_efficiency: f64,
    pub vehicles: Vec<VehicleStat>,
    pub tiers: Vec<TierStat>,
    pub monthly: Vec<MonthStat>,
    pub rankings: Vec<UserRanking>,
    pub hourly: Vec<HourStat>,
}

#[derive(Default)]
struct Bucket {
    trips: usize,
    score_sum: u64,
    distance_km: f64,
}

impl Bucket {
    fn add(&mut self, trip: &ScoredTrip) {
        self.trips += 1;
        self.score_sum += u64::from(trip.score.efficiency_score);
        self.distance_km += trip.record.distance_km;
    }

    fn average(&self) -> f64 {
        if self.trips == 0 {
            0.0
        } else {
            self.score_sum as f64 / self.trips as f64
        }
    }
}

pub fn overview(trips: &[ScoredTrip], filter: &StatsFilter) -> OverviewStats {
    let selected: Vec<&ScoredTrip> = trips.iter().filter(|trip| filter.matches(trip)).collect();

    let mut all = Bucket::default();
    let mut users: BTreeSet<&str> = BTreeSet::new();
    let mut by_vehicle: BTreeMap<Vehicle, Bucket> = BTreeMap::new();
    let mut by_tier: BTreeMap<Tier, usize> = BTreeMap::new();
    let mut by_month: BTreeMap<(i32, u32), Bucket> = BTreeMap::new();
    let mut by_user: BTreeMap<&str, Bucket> = BTreeMap::new();
    let mut by_hour: BTreeMap<u32, usize> = BTreeMap::new();

    for trip in &selected {
        let record = &trip.record;
        all.add(trip);
        users.insert(record.user_id.as_str());
        by_vehicle.entry(record.vehicle).or_default().add(trip);
        *by_tier.entry(trip.score.status).or_default() += 1;
        by_month
            .entry((record.created_at.year(), record.created_at.month()))
            .or_default()
            .add(trip);
        by_user.entry(record.user_id.as_str()).or_default().add(trip);
        *by_hour.entry(record.created_at.hour()).or_default() += 1;
    }

    let mut vehicles: Vec<VehicleStat> = by_vehicle
        .into_iter()
        .map(|(vehicle, bucket)| VehicleStat {
            vehicle,
            trips: bucket.trips,
            total_distance_km: bucket.distance_km,
            average_efficiency: bucket.average(),
        })
        .collect();
    // stable: ties keep vehicle order
    vehicles.sort_by(|a, b| b.trips.cmp(&a.trips));

    let tiers = [Tier::EcoWarrior, Tier::EcoNeutral, Tier::ClimateCriminal]
        .into_iter()
        .map(|tier| TierStat {
            tier,
            trips: by_tier.get(&tier).copied().unwrap_or(0),
        })
        .collect();

    let monthly = by_month
        .into_iter()
        .map(|((year, month), bucket)| MonthStat {
            month: format!("{year:04}-{month:02}"),
            trips: bucket.trips,
            average_efficiency: bucket.average(),
        })
        .collect();

    let mut rankings: Vec<UserRanking> = by_user
        .into_iter()
        .map(|(user_id, bucket)| UserRanking {
            user_id: user_id.to_string(),
            trips: bucket.trips,
            total_distance_km: bucket.distance_km,
            average_efficiency: bucket.average(),
        })
        .collect();
    rankings.sort_by(|a, b| b.average_efficiency.total_cmp(&a.average_efficiency));

    let hourly = by_hour
        .into_iter()
        .map(|(hour, trips)| HourStat { hour, trips })
        .collect();

    OverviewStats {
        total_trips: selected.len(),
        distinct_users: users.len(),
        average_efficiency: all.average(),
        vehicles,
        tiers,
        monthly,
        rankings,
        hourly,
    }
}
