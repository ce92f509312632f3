use super::piecewise::{accumulate, band_index, Band};
use crate::types::trip::Vehicle;

const BIKE_BASE: f64 = 98.0;
const ON_FOOT_BASE: f64 = 100.0;

const DISTANCE_BONUS: [Band; 3] = [
    Band::new(10.0, 1.0),
    Band::new(25.0, 0.4),
    Band::new(f64::INFINITY, 0.2),
];

const TIME_BONUS_PER_MIN: f64 = 0.5;
const TIME_BONUS_FACTOR: [f64; 3] = [1.0, 0.6, 0.3];

/// Bike, walking and "other" trips. Rewards shrink with distance and the
/// result is capped at 100.
pub fn active_score(vehicle: Vehicle, distance_km: f64, duration_min: f64) -> f64 {
    let base = if vehicle == Vehicle::Bike {
        BIKE_BASE
    } else {
        ON_FOOT_BASE
    };

    let distance_bonus = accumulate(&DISTANCE_BONUS, distance_km);
    let factor = TIME_BONUS_FACTOR[band_index(&DISTANCE_BONUS, distance_km)];
    let time_bonus = TIME_BONUS_PER_MIN * duration_min * factor;

    (base + distance_bonus + time_bonus).min(100.0)
}
