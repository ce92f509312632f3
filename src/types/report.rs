use crate::types::telemetry::{BehavioralMetrics, BehavioralProfile};
use crate::types::trip::{TripScore, Vehicle};
use serde::Serialize;

/// One ad hoc score with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub vehicle: Vehicle,
    pub distance_km: f64,
    pub duration_min: f64,
    #[serde(flatten)]
    pub score: TripScore,
}

/// A user's profile next to the population it is compared against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub profile: BehavioralProfile,
    pub population: BehavioralMetrics,
    pub population_size: usize,
}
