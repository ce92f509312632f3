pub mod active;
pub mod car;
pub mod piecewise;
pub mod transit;

use crate::types::trip::{Tier, Trip, TripScore, Vehicle};
use tracing::warn;

/// Score given to airplanes and anything the engine does not recognize.
pub const WORST_CASE_SCORE: f64 = 5.0;

/// Score bands for the three tiers. Scores at or above `eco_warrior_min` are
/// the top tier, scores below `eco_neutral_min` the bottom tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierThresholds {
    pub eco_warrior_min: u8,
    pub eco_neutral_min: u8,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            eco_warrior_min: 75,
            eco_neutral_min: 25,
        }
    }
}

impl TierThresholds {
    pub fn tier(&self, score: u8) -> Tier {
        if score >= self.eco_warrior_min {
            Tier::EcoWarrior
        } else if score >= self.eco_neutral_min {
            Tier::EcoNeutral
        } else {
            Tier::ClimateCriminal
        }
    }
}

/// Deterministic trip scoring. Holds no state beyond its tier thresholds, so
/// one engine can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine {
    thresholds: TierThresholds,
}

impl ScoreEngine {
    pub fn new(thresholds: TierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> TierThresholds {
        self.thresholds
    }

    pub fn score(&self, trip: &Trip) -> TripScore {
        let efficiency_score = efficiency_score(trip);
        TripScore::new(efficiency_score, self.thresholds.tier(efficiency_score))
    }
}

/// Scores one trip with the default tier thresholds.
///
/// Distance is in kilometres and duration in minutes.
pub fn score_trip(vehicle: Vehicle, distance_km: f64, duration_min: f64) -> TripScore {
    ScoreEngine::default().score(&Trip::new(vehicle, distance_km, duration_min))
}

/// The raw 0–100 efficiency score. Negative or non-finite inputs count as 0.
pub fn efficiency_score(trip: &Trip) -> u8 {
    let distance = sanitize(trip.distance_km);
    let duration = sanitize(trip.duration_min);

    let raw = match trip.vehicle {
        Vehicle::Car => car::car_score(distance, duration),
        Vehicle::PublicTransport => transit::public_transport_score(distance),
        vehicle if vehicle.is_active() => active::active_score(vehicle, distance, duration),
        Vehicle::Unrecognized => {
            warn!("scoring unrecognized vehicle as worst case");
            WORST_CASE_SCORE
        }
        _ => WORST_CASE_SCORE,
    };

    raw.round().clamp(0.0, 100.0) as u8
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
